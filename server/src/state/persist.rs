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

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use serde_json::{from_reader, to_writer};

use resources::{Appointment, Credential, Doctor, Patient, Visit};

use crate::error::Error;

use super::Inner;

#[derive(Serialize, Deserialize)]
struct Data {
    credentials: Vec<Credential>,
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    appointments: Vec<Appointment>,
    visits: Vec<Visit>,
}

impl Inner {
    pub fn load<R>(&mut self, reader: R) -> Result<(), Error>
    where
        R: Read,
    {
        let data: Data = from_reader(reader)?;

        self.credentials.restore(data.credentials);
        self.patients.restore(data.patients);
        self.doctors.restore(data.doctors);
        self.appointments.restore(data.appointments);
        self.visits.restore(data.visits);

        Ok(())
    }

    pub fn save<W>(&self, writer: W) -> Result<(), Error>
    where
        W: Write,
    {
        // the tables iterate in id order, so the snapshot is stable
        let data = Data {
            credentials: self.credentials.iter().cloned().collect(),
            patients: self.patients.iter().cloned().collect(),
            doctors: self.doctors.iter().cloned().collect(),
            appointments: self.appointments.iter().cloned().collect(),
            visits: self.visits.iter().cloned().collect(),
        };

        to_writer(writer, &data)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{appointment_args, doctor_args, patient_args, visit_args};
    use super::*;

    use resources::credential::Role;

    #[test]
    fn snapshot_round_trip_preserves_tables_and_id_sequence() {
        let mut inner = Inner::default();

        inner
            .credentials
            .insert("admin".into(), "hash".into(), Role::Admin)
            .unwrap();
        inner.patients.insert(patient_args("a@example.com")).unwrap();
        inner.patients.insert(patient_args("b@example.com")).unwrap();
        inner
            .doctors
            .insert(doctor_args("dr.a@example.com", "LIC-1"))
            .unwrap();
        inner.insert_appointment(appointment_args(1, 1)).unwrap();
        inner.insert_visit(visit_args(2, None)).unwrap();

        let mut buffer = Vec::new();
        inner.save(&mut buffer).unwrap();

        let mut restored = Inner::default();
        restored.load(buffer.as_slice()).unwrap();

        assert_eq!(
            restored.patients.get(1).unwrap(),
            inner.patients.get(1).unwrap()
        );
        assert_eq!(
            restored.visits.get(1).unwrap(),
            inner.visits.get(1).unwrap()
        );
        assert_eq!(
            restored.credentials.by_username("admin").unwrap().role,
            Role::Admin
        );

        // new rows continue the id sequence instead of reusing ids
        let id = restored
            .patients
            .insert(patient_args("c@example.com"))
            .unwrap()
            .id;
        assert_eq!(id, 3);
    }
}
