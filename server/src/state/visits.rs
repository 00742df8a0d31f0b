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
    visit::{Visit, VisitCreate, VisitUpdate},
};

use super::StorageError;

#[derive(Default)]
pub struct Visits {
    by_id: BTreeMap<Id, Visit>,
    next_id: Id,
}

impl Visits {
    /// Foreign keys are validated by [`Inner::insert_visit`](super::Inner)
    /// before the row is created.
    pub(super) fn insert(&mut self, args: VisitCreate) -> &Visit {
        let id = self.next_id();
        let visit = Visit {
            id,
            patient_id: args.patient_id,
            doctor_id: args.doctor_id,
            visit_date: args.visit_date,
            chief_complaint: args.chief_complaint,
            clinical_notes: args.clinical_notes,
            blood_pressure: args.blood_pressure,
            temperature: args.temperature,
            pulse_rate: args.pulse_rate,
            respiration_rate: args.respiration_rate,
            weight_kg: args.weight_kg,
            height_cm: args.height_cm,
            diagnosis: args.diagnosis,
            treatment: args.treatment,
            procedures_performed: args.procedures_performed,
            prescriptions: args.prescriptions,
            follow_up_instructions: args.follow_up_instructions,
            next_appointment_date: args.next_appointment_date,
        };

        self.by_id.entry(id).or_insert(visit)
    }

    pub fn get(&self, id: Id) -> Result<&Visit, StorageError> {
        self.by_id
            .get(&id)
            .ok_or(StorageError::NotFound("Patient visit record", id))
    }

    pub fn list(&self, offset: usize, limit: usize) -> Vec<&Visit> {
        self.by_id.values().skip(offset).take(limit).collect()
    }

    pub fn by_patient(&self, patient_id: Id) -> Vec<&Visit> {
        self.by_id
            .values()
            .filter(|v| v.patient_id == patient_id)
            .collect()
    }

    pub fn by_doctor(&self, doctor_id: Id) -> Vec<&Visit> {
        self.by_id
            .values()
            .filter(|v| v.doctor_id == Some(doctor_id))
            .collect()
    }

    pub(super) fn update(&mut self, id: Id, patch: VisitUpdate) -> Result<&Visit, StorageError> {
        let visit = self
            .by_id
            .get_mut(&id)
            .ok_or(StorageError::NotFound("Patient visit record", id))?;
        patch.apply_to(visit);

        Ok(visit)
    }

    pub fn remove(&mut self, id: Id) -> bool {
        self.by_id.remove(&id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Visit> {
        self.by_id.values()
    }

    pub(super) fn remove_by_patient(&mut self, patient_id: Id) {
        self.by_id.retain(|_, v| v.patient_id != patient_id);
    }

    pub(super) fn detach_doctor(&mut self, doctor_id: Id) {
        for visit in self.by_id.values_mut() {
            if visit.doctor_id == Some(doctor_id) {
                visit.doctor_id = None;
            }
        }
    }

    pub(super) fn restore(&mut self, visits: Vec<Visit>) {
        for visit in visits {
            self.next_id = self.next_id.max(visit.id);
            self.by_id.insert(visit.id, visit);
        }
    }

    fn next_id(&mut self) -> Id {
        self.next_id += 1;
        self.next_id
    }
}
