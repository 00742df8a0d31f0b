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

use serde::{Deserialize, Serialize};

use super::misc::{Email, Id};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone_number: String,
    pub specialization: String,
    pub license_number: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DoctorCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone_number: String,
    pub specialization: String,
    pub license_number: String,
}

/// Patch parameters: absent fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DoctorUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub phone_number: Option<String>,
    pub specialization: Option<String>,
    pub license_number: Option<String>,
}

impl DoctorUpdate {
    pub fn apply_to(&self, doctor: &mut Doctor) {
        if let Some(first_name) = &self.first_name {
            doctor.first_name = first_name.clone();
        }

        if let Some(last_name) = &self.last_name {
            doctor.last_name = last_name.clone();
        }

        if let Some(email) = &self.email {
            doctor.email = email.clone();
        }

        if let Some(phone_number) = &self.phone_number {
            doctor.phone_number = phone_number.clone();
        }

        if let Some(specialization) = &self.specialization {
            doctor.specialization = specialization.clone();
        }

        if let Some(license_number) = &self.license_number {
            doctor.license_number = license_number.clone();
        }
    }
}
