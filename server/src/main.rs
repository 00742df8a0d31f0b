/*
 * Copyright (c) 2021 gematik GmbH
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *    http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 */

use std::path::PathBuf;

use log::info;
use structopt::StructOpt;

use hms_server::{
    error::Error,
    logging::init_logger,
    service::{Service, TokenConfig},
    state::State,
};

#[actix_rt::main]
async fn main() -> Result<(), Error> {
    let opts = Options::from_args();

    init_logger(&opts.log_config)?;

    let state = State::new();
    if opts.state.is_file() {
        state.load(&opts.state).await?;

        info!(target: "hms_server", "State loaded from {}", opts.state.display());
    }

    let token_config = TokenConfig::new(opts.secret.as_bytes(), i64::from(opts.token_ttl))?;

    Service::new(state.clone(), token_config)
        .listen(&opts.server_addr)?
        .run()
        .await?;

    state.save(&opts.state).await?;

    info!(target: "hms_server", "State saved to {}", opts.state.display());

    Ok(())
}

#[derive(Clone, StructOpt)]
struct Options {
    /// Secret key the token service signs and verifies access tokens with.
    #[structopt(short = "s", long = "secret", env = "HMS_SECRET_KEY", hide_env_values = true)]
    secret: String,

    /// Lifetime of issued access tokens in minutes.
    #[structopt(long = "token-ttl", default_value = "30")]
    token_ttl: u32,

    #[structopt(short = "d", long = "state", default_value = "./state.json")]
    state: PathBuf,

    #[structopt(short = "c", long = "config", default_value = "./log4rs.yml")]
    log_config: PathBuf,

    #[structopt(short = "l", long = "listen", default_value = "[::]:3000")]
    server_addr: String,
}
