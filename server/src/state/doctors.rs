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
    doctor::{Doctor, DoctorCreate, DoctorUpdate},
    misc::Id,
};

use super::StorageError;

#[derive(Default)]
pub struct Doctors {
    by_id: BTreeMap<Id, Doctor>,
    next_id: Id,
}

impl Doctors {
    pub fn insert(&mut self, args: DoctorCreate) -> Result<&Doctor, StorageError> {
        if self.by_email(args.email.as_str()).is_some() {
            return Err(StorageError::Conflict(format!(
                "Doctor with email {} already registered",
                args.email
            )));
        }

        if self.by_license_number(&args.license_number).is_some() {
            return Err(StorageError::Conflict(format!(
                "Doctor with license number {} already registered",
                args.license_number
            )));
        }

        let id = self.next_id();
        let doctor = Doctor {
            id,
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone_number: args.phone_number,
            specialization: args.specialization,
            license_number: args.license_number,
        };

        Ok(self.by_id.entry(id).or_insert(doctor))
    }

    pub fn get(&self, id: Id) -> Result<&Doctor, StorageError> {
        self.by_id
            .get(&id)
            .ok_or(StorageError::NotFound("Doctor", id))
    }

    pub fn contains(&self, id: Id) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn list(&self, offset: usize, limit: usize) -> Vec<&Doctor> {
        self.by_id.values().skip(offset).take(limit).collect()
    }

    pub fn update(&mut self, id: Id, patch: DoctorUpdate) -> Result<&Doctor, StorageError> {
        if let Some(email) = &patch.email {
            match self.by_email(email.as_str()) {
                Some(other) if other.id != id => {
                    return Err(StorageError::Conflict(format!(
                        "Doctor with email {} already registered",
                        email
                    )));
                }
                _ => (),
            }
        }

        if let Some(license_number) = &patch.license_number {
            match self.by_license_number(license_number) {
                Some(other) if other.id != id => {
                    return Err(StorageError::Conflict(format!(
                        "Doctor with license number {} already registered",
                        license_number
                    )));
                }
                _ => (),
            }
        }

        let doctor = self
            .by_id
            .get_mut(&id)
            .ok_or(StorageError::NotFound("Doctor", id))?;
        patch.apply_to(doctor);

        Ok(doctor)
    }

    pub fn remove(&mut self, id: Id) -> bool {
        self.by_id.remove(&id).is_some()
    }

    pub fn by_email(&self, email: &str) -> Option<&Doctor> {
        self.by_id.values().find(|d| d.email.as_str() == email)
    }

    pub fn by_license_number(&self, license_number: &str) -> Option<&Doctor> {
        self.by_id
            .values()
            .find(|d| d.license_number == license_number)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Doctor> {
        self.by_id.values()
    }

    pub(super) fn restore(&mut self, doctors: Vec<Doctor>) {
        for doctor in doctors {
            self.next_id = self.next_id.max(doctor.id);
            self.by_id.insert(doctor.id, doctor);
        }
    }

    fn next_id(&mut self) -> Id {
        self.next_id += 1;
        self.next_id
    }
}
