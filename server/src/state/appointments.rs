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
    appointment::{Appointment, AppointmentCreate, AppointmentUpdate},
    misc::Id,
};

use super::StorageError;

#[derive(Default)]
pub struct Appointments {
    by_id: BTreeMap<Id, Appointment>,
    next_id: Id,
}

impl Appointments {
    /// Foreign keys are validated by [`Inner::insert_appointment`](super::Inner)
    /// before the row is created.
    pub(super) fn insert(&mut self, args: AppointmentCreate) -> &Appointment {
        let id = self.next_id();
        let appointment = Appointment {
            id,
            patient_id: args.patient_id,
            doctor_id: args.doctor_id,
            appointment_time: args.appointment_time,
            reason: args.reason,
            status: args.status,
        };

        self.by_id.entry(id).or_insert(appointment)
    }

    pub fn get(&self, id: Id) -> Result<&Appointment, StorageError> {
        self.by_id
            .get(&id)
            .ok_or(StorageError::NotFound("Appointment", id))
    }

    pub fn list(&self, offset: usize, limit: usize) -> Vec<&Appointment> {
        self.by_id.values().skip(offset).take(limit).collect()
    }

    pub fn by_patient(&self, patient_id: Id) -> Vec<&Appointment> {
        self.by_id
            .values()
            .filter(|a| a.patient_id == patient_id)
            .collect()
    }

    pub fn by_doctor(&self, doctor_id: Id) -> Vec<&Appointment> {
        self.by_id
            .values()
            .filter(|a| a.doctor_id == doctor_id)
            .collect()
    }

    pub(super) fn update(
        &mut self,
        id: Id,
        patch: AppointmentUpdate,
    ) -> Result<&Appointment, StorageError> {
        let appointment = self
            .by_id
            .get_mut(&id)
            .ok_or(StorageError::NotFound("Appointment", id))?;
        patch.apply_to(appointment);

        Ok(appointment)
    }

    pub fn remove(&mut self, id: Id) -> bool {
        self.by_id.remove(&id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Appointment> {
        self.by_id.values()
    }

    pub(super) fn remove_by_patient(&mut self, patient_id: Id) {
        self.by_id.retain(|_, a| a.patient_id != patient_id);
    }

    pub(super) fn remove_by_doctor(&mut self, doctor_id: Id) {
        self.by_id.retain(|_, a| a.doctor_id != doctor_id);
    }

    pub(super) fn restore(&mut self, appointments: Vec<Appointment>) {
        for appointment in appointments {
            self.next_id = self.next_id.max(appointment.id);
            self.by_id.insert(appointment.id, appointment);
        }
    }

    fn next_id(&mut self) -> Id {
        self.next_id += 1;
        self.next_id
    }
}
