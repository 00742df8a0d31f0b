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

use actix_web::{
    web::{Data, Form},
    HttpResponse,
};
use chrono::Utc;
use log::debug;
use serde_json::json;

use resources::credential::LoginArgs;

use crate::service::{
    error::RequestError,
    misc::{password, AccessToken, TokenConfig},
};
use crate::state::State;

pub async fn login(
    state: Data<State>,
    config: Data<TokenConfig>,
    args: Form<LoginArgs>,
) -> Result<HttpResponse, RequestError> {
    let args = args.into_inner();

    let state = state.lock().await;
    let credential = state
        .credentials
        .by_username(&args.username)
        .ok_or_else(invalid_credentials)?;

    if !password::verify(&args.password, &credential.password_hash) {
        debug!(target: "hms_server", "Login rejected for user: {}", args.username);

        return Err(invalid_credentials());
    }

    if !credential.is_active {
        return Err(RequestError::unauthenticated("Inactive user"));
    }

    let access_token = AccessToken::issue(
        credential.username.clone(),
        credential.role,
        config.key(),
        Some(config.ttl()),
        Utc::now(),
    )
    .map_err(|err| RequestError::internal(format!("Unable to issue access token: {}", err)))?;

    Ok(HttpResponse::Ok().json(json!({
        "access_token": access_token,
        "token_type": "bearer",
    })))
}

fn invalid_credentials() -> RequestError {
    RequestError::unauthenticated("Incorrect username or password")
}
