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

use std::collections::BTreeMap;

use resources::{
    misc::Id,
    patient::{Patient, PatientCreate, PatientUpdate},
};

use super::StorageError;

#[derive(Default)]
pub struct Patients {
    by_id: BTreeMap<Id, Patient>,
    next_id: Id,
}

impl Patients {
    pub fn insert(&mut self, args: PatientCreate) -> Result<&Patient, StorageError> {
        if self.by_email(args.email.as_str()).is_some() {
            return Err(StorageError::Conflict(format!(
                "Patient with email {} already registered",
                args.email
            )));
        }

        let id = self.next_id();
        let patient = Patient {
            id,
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone_number: args.phone_number,
            date_of_birth: args.date_of_birth,
            address: args.address,
            gender: args.gender,
        };

        Ok(self.by_id.entry(id).or_insert(patient))
    }

    pub fn get(&self, id: Id) -> Result<&Patient, StorageError> {
        self.by_id
            .get(&id)
            .ok_or(StorageError::NotFound("Patient", id))
    }

    pub fn contains(&self, id: Id) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn list(&self, offset: usize, limit: usize) -> Vec<&Patient> {
        self.by_id.values().skip(offset).take(limit).collect()
    }

    pub fn update(&mut self, id: Id, patch: PatientUpdate) -> Result<&Patient, StorageError> {
        if let Some(email) = &patch.email {
            match self.by_email(email.as_str()) {
                Some(other) if other.id != id => {
                    return Err(StorageError::Conflict(format!(
                        "Patient with email {} already registered",
                        email
                    )));
                }
                _ => (),
            }
        }

        let patient = self
            .by_id
            .get_mut(&id)
            .ok_or(StorageError::NotFound("Patient", id))?;
        patch.apply_to(patient);

        Ok(patient)
    }

    pub fn remove(&mut self, id: Id) -> bool {
        self.by_id.remove(&id).is_some()
    }

    pub fn by_email(&self, email: &str) -> Option<&Patient> {
        self.by_id.values().find(|p| p.email.as_str() == email)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Patient> {
        self.by_id.values()
    }

    pub(super) fn restore(&mut self, patients: Vec<Patient>) {
        for patient in patients {
            self.next_id = self.next_id.max(patient.id);
            self.by_id.insert(patient.id, patient);
        }
    }

    fn next_id(&mut self) -> Id {
        self.next_id += 1;
        self.next_id
    }
}
