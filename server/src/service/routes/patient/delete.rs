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
    web::{Data, Path},
    HttpResponse,
};

use resources::misc::Id;

use crate::service::{
    error::RequestError,
    header::Authorization,
    misc::policy::{self, Operation, Resource},
};
use crate::state::State;

pub async fn delete(
    state: Data<State>,
    access_token: Authorization,
    id: Path<Id>,
) -> Result<HttpResponse, RequestError> {
    policy::check(access_token.role, Operation::Delete, Resource::Patient)?;

    let id = id.into_inner();
    let mut state = state.lock().await;

    if state.remove_patient(id) {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(RequestError::not_found(format!(
            "Patient with ID {} not found",
            id
        )))
    }
}
