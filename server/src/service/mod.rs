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

mod error;
mod header;
mod middleware;
mod misc;
mod routes;

use std::net::{SocketAddr, ToSocketAddrs};

use actix_cors::Cors;
use actix_web::{http::header as http_header, App, HttpServer};

use crate::{error::Error, state::State};

pub use error::{AsReqErr, RequestError};
pub use misc::TokenConfig;

use middleware::Logging;
use routes::configure_routes;

pub struct Service {
    state: State,
    token_config: TokenConfig,
    addresses: Vec<SocketAddr>,
}

impl Service {
    pub fn new(state: State, token_config: TokenConfig) -> Self {
        Self {
            state,
            token_config,
            addresses: Vec::new(),
        }
    }

    pub fn listen<T: ToSocketAddrs>(mut self, addrs: T) -> Result<Self, Error> {
        for addr in addrs.to_socket_addrs()? {
            self.addresses.push(addr);
        }

        Ok(self)
    }

    pub async fn run(self) -> Result<(), Error> {
        let Self {
            state,
            token_config,
            addresses,
        } = self;

        let mut server = HttpServer::new(move || {
            let cors = Cors::default()
                .allowed_origin("http://localhost")
                .allowed_origin("http://localhost:5173")
                .allowed_origin("http://127.0.0.1:5173")
                .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
                .allowed_headers(vec![http_header::AUTHORIZATION, http_header::ACCEPT])
                .allowed_header(http_header::CONTENT_TYPE)
                .supports_credentials();

            App::new()
                .wrap(Logging)
                .wrap(cors)
                .data(state.clone())
                .data(token_config.clone())
                .configure(configure_routes)
        });

        for addr in addresses {
            server = server.bind(addr)?;
        }

        server.shutdown_timeout(10).run().await?;

        Ok(())
    }
}
