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

mod create;
mod delete;
mod get;
mod update;

use actix_web::web::{self, resource, ServiceConfig};

pub use create::create;
pub use delete::delete;
pub use get::{get_all, get_by_doctor, get_by_patient, get_one};
pub use update::update;

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.service(
        resource("/patient_visits")
            .route(web::post().to(create::create))
            .route(web::get().to(get::get_all)),
    );
    cfg.service(
        resource("/patient_visits/patient/{id}").route(web::get().to(get::get_by_patient)),
    );
    cfg.service(resource("/patient_visits/doctor/{id}").route(web::get().to(get::get_by_doctor)));
    cfg.service(
        resource("/patient_visits/{id}")
            .route(web::get().to(get::get_one))
            .route(web::put().to(update::update))
            .route(web::delete().to(delete::delete)),
    );
}
