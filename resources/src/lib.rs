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

#[macro_use]
extern crate lazy_static;

pub mod appointment;
pub mod chatbot;
pub mod credential;
pub mod doctor;
pub mod misc;
pub mod patient;
pub mod visit;

pub use appointment::Appointment;
pub use chatbot::{ChatbotQuery, ChatbotResponse};
pub use credential::{Credential, Role, UserInfo};
pub use doctor::Doctor;
pub use misc::{Email, Id};
pub use patient::Patient;
pub use visit::Visit;
