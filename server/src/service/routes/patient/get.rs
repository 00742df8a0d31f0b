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
    misc::{
        policy::{self, Operation, Resource},
        Pagination, Query,
    },
};
use crate::state::State;

pub async fn get_all(
    state: Data<State>,
    access_token: Authorization,
    pagination: Query<Pagination>,
) -> Result<HttpResponse, RequestError> {
    policy::check(access_token.role, Operation::Read, Resource::Patient)?;

    let state = state.lock().await;
    let patients = state.patients.list(pagination.offset, pagination.limit);

    Ok(HttpResponse::Ok().json(patients))
}

pub async fn get_one(
    state: Data<State>,
    access_token: Authorization,
    id: Path<Id>,
) -> Result<HttpResponse, RequestError> {
    policy::check(access_token.role, Operation::Read, Resource::Patient)?;

    let state = state.lock().await;
    let patient = state.patients.get(id.into_inner())?;

    Ok(HttpResponse::Ok().json(patient))
}
