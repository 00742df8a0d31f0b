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
    web::{Data, Json},
    HttpResponse,
};
use log::info;

use resources::credential::{UserCreate, UserInfo};

use crate::service::{error::RequestError, misc::password};
use crate::state::State;

pub async fn register(
    state: Data<State>,
    user: Json<UserCreate>,
) -> Result<HttpResponse, RequestError> {
    let UserCreate {
        username,
        password,
        role,
    } = user.into_inner();

    let password_hash = password::hash(&password)
        .map_err(|err| RequestError::internal(format!("Unable to hash password: {}", err)))?;

    let mut state = state.lock().await;
    let credential = state.credentials.insert(username, password_hash, role)?;

    info!(target: "hms_server", "User registered: {} ({})", credential.username, credential.role);

    Ok(HttpResponse::Created().json(UserInfo::from(credential)))
}
