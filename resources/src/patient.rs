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

use std::fmt::{Display, Formatter, Result as FmtResult};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::misc::{Email, Id};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone_number: String,
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub gender: Gender,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,

    #[serde(rename = "Prefer not to say")]
    PreferNotToSay,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PatientCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone_number: String,
    pub date_of_birth: NaiveDate,
    pub address: String,
    pub gender: Gender,
}

/// Patch parameters: absent fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PatientUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub gender: Option<Gender>,
}

impl PatientUpdate {
    pub fn apply_to(&self, patient: &mut Patient) {
        if let Some(first_name) = &self.first_name {
            patient.first_name = first_name.clone();
        }

        if let Some(last_name) = &self.last_name {
            patient.last_name = last_name.clone();
        }

        if let Some(email) = &self.email {
            patient.email = email.clone();
        }

        if let Some(phone_number) = &self.phone_number {
            patient.phone_number = phone_number.clone();
        }

        if let Some(date_of_birth) = self.date_of_birth {
            patient.date_of_birth = date_of_birth;
        }

        if let Some(address) = &self.address {
            patient.address = address.clone();
        }

        if let Some(gender) = self.gender {
            patient.gender = gender;
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Male => f.write_str("Male"),
            Self::Female => f.write_str("Female"),
            Self::Other => f.write_str("Other"),
            Self::PreferNotToSay => f.write_str("Prefer not to say"),
        }
    }
}
