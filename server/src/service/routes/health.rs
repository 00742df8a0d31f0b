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
    web::{get, resource, ServiceConfig},
    HttpResponse,
};
use serde_json::json;

use crate::service::error::RequestError;

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.service(resource("/").route(get().to(get_root)));
    cfg.service(resource("/health").route(get().to(get_health)));
}

async fn get_root() -> Result<HttpResponse, RequestError> {
    Ok(HttpResponse::Ok().json(json!({
        "message": "Welcome to the Hospital Management System API!"
    })))
}

async fn get_health() -> Result<HttpResponse, RequestError> {
    Ok(HttpResponse::Ok().finish())
}
