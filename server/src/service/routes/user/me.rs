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

use actix_web::{web::Data, HttpResponse};

use resources::credential::UserInfo;

use crate::service::{error::RequestError, header::Authorization};
use crate::state::State;

pub async fn me(
    state: Data<State>,
    access_token: Authorization,
) -> Result<HttpResponse, RequestError> {
    let state = state.lock().await;
    let credential = state
        .credentials
        .by_username(&access_token.sub)
        .ok_or_else(|| RequestError::unauthenticated("Could not validate credentials"))?;

    if !credential.is_active {
        return Err(RequestError::unauthenticated("Inactive user"));
    }

    Ok(HttpResponse::Ok().json(UserInfo::from(credential)))
}
