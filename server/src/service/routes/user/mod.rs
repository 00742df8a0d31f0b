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

mod login;
mod me;
mod register;

use actix_web::web::{get, post, resource, ServiceConfig};

pub use login::login;
pub use register::register;

pub fn configure_routes(cfg: &mut ServiceConfig) {
    cfg.service(resource("/token").route(post().to(login::login)));
    cfg.service(resource("/users/register").route(post().to(register::register)));
    cfg.service(resource("/users/me").route(get().to(me::me)));
}
