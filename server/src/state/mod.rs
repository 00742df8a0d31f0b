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

mod appointments;
mod credentials;
mod doctors;
mod patients;
mod persist;
mod visits;

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

use resources::{
    appointment::{Appointment, AppointmentCreate, AppointmentUpdate},
    misc::Id,
    visit::{Visit, VisitCreate, VisitUpdate},
};

use crate::error::Error;

pub use appointments::Appointments;
pub use credentials::Credentials;
pub use doctors::Doctors;
pub use patients::Patients;
pub use visits::Visits;

#[derive(Clone, Default)]
pub struct State {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
pub struct Inner {
    pub credentials: Credentials,
    pub patients: Patients,
    pub doctors: Doctors,
    pub appointments: Appointments,
    pub visits: Visits,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("{0} with ID {1} not found")]
    NotFound(&'static str, Id),

    #[error("{0}")]
    Conflict(String),
}

impl State {
    pub fn new() -> Self {
        Default::default()
    }

    pub async fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().await
    }

    pub async fn load(&self, path: &Path) -> Result<(), Error> {
        let file = File::open(path)?;

        self.lock().await.load(file)
    }

    pub async fn save(&self, path: &Path) -> Result<(), Error> {
        let file = File::create(path)?;

        self.lock().await.save(file)
    }
}

impl Inner {
    pub fn insert_appointment(
        &mut self,
        args: AppointmentCreate,
    ) -> Result<&Appointment, StorageError> {
        if !self.patients.contains(args.patient_id) {
            return Err(StorageError::NotFound("Patient", args.patient_id));
        }

        if !self.doctors.contains(args.doctor_id) {
            return Err(StorageError::NotFound("Doctor", args.doctor_id));
        }

        Ok(self.appointments.insert(args))
    }

    pub fn update_appointment(
        &mut self,
        id: Id,
        patch: AppointmentUpdate,
    ) -> Result<&Appointment, StorageError> {
        if let Some(patient_id) = patch.patient_id {
            if !self.patients.contains(patient_id) {
                return Err(StorageError::NotFound("Patient", patient_id));
            }
        }

        if let Some(doctor_id) = patch.doctor_id {
            if !self.doctors.contains(doctor_id) {
                return Err(StorageError::NotFound("Doctor", doctor_id));
            }
        }

        self.appointments.update(id, patch)
    }

    pub fn insert_visit(&mut self, args: VisitCreate) -> Result<&Visit, StorageError> {
        if !self.patients.contains(args.patient_id) {
            return Err(StorageError::NotFound("Patient", args.patient_id));
        }

        if let Some(doctor_id) = args.doctor_id {
            if !self.doctors.contains(doctor_id) {
                return Err(StorageError::NotFound("Doctor", doctor_id));
            }
        }

        Ok(self.visits.insert(args))
    }

    pub fn update_visit(&mut self, id: Id, patch: VisitUpdate) -> Result<&Visit, StorageError> {
        if let Some(patient_id) = patch.patient_id {
            if !self.patients.contains(patient_id) {
                return Err(StorageError::NotFound("Patient", patient_id));
            }
        }

        if let Some(Some(doctor_id)) = patch.doctor_id {
            if !self.doctors.contains(doctor_id) {
                return Err(StorageError::NotFound("Doctor", doctor_id));
            }
        }

        self.visits.update(id, patch)
    }

    /// Removes the patient together with its dependent appointments and
    /// visit records, keeping every remaining foreign key valid.
    pub fn remove_patient(&mut self, id: Id) -> bool {
        if !self.patients.remove(id) {
            return false;
        }

        self.appointments.remove_by_patient(id);
        self.visits.remove_by_patient(id);

        true
    }

    /// Removes the doctor together with its appointments. Visit records
    /// survive with the doctor attribution cleared.
    pub fn remove_doctor(&mut self, id: Id) -> bool {
        if !self.doctors.remove(id) {
            return false;
        }

        self.appointments.remove_by_doctor(id);
        self.visits.detach_doctor(id);

        true
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    use chrono::{NaiveDate, TimeZone, Utc};
    use resources::{
        credential::Role,
        doctor::{DoctorCreate, DoctorUpdate},
        misc::Email,
        patient::{Gender, PatientCreate, PatientUpdate},
    };

    pub fn patient_args(email: &str) -> PatientCreate {
        PatientCreate {
            first_name: "Juna".into(),
            last_name: "Fuchs".into(),
            email: Email::new(email).unwrap(),
            phone_number: "030-1234567".into(),
            date_of_birth: NaiveDate::from_ymd(1985, 4, 12),
            address: "Friedrichstr. 136, Berlin".into(),
            gender: Gender::Female,
        }
    }

    pub fn doctor_args(email: &str, license_number: &str) -> DoctorCreate {
        DoctorCreate {
            first_name: "Max".into(),
            last_name: "Mustermann".into(),
            email: Email::new(email).unwrap(),
            phone_number: "030-7654321".into(),
            specialization: "Cardiology".into(),
            license_number: license_number.into(),
        }
    }

    pub fn appointment_args(patient_id: Id, doctor_id: Id) -> AppointmentCreate {
        AppointmentCreate {
            patient_id,
            doctor_id,
            appointment_time: Utc.ymd(2021, 3, 9).and_hms(10, 30, 0),
            reason: "Routine checkup".into(),
            status: Default::default(),
        }
    }

    pub fn visit_args(patient_id: Id, doctor_id: Option<Id>) -> VisitCreate {
        VisitCreate {
            patient_id,
            doctor_id,
            visit_date: Utc.ymd(2021, 3, 9).and_hms(11, 0, 0),
            chief_complaint: Some("Chest pain".into()),
            clinical_notes: Some("Patient reports intermittent chest pain".into()),
            blood_pressure: Some("120/80".into()),
            temperature: Some("36.8 C".into()),
            pulse_rate: Some(72),
            respiration_rate: Some(16),
            weight_kg: Some("81".into()),
            height_cm: Some("178".into()),
            diagnosis: Some("Angina pectoris".into()),
            treatment: Some("Nitroglycerin".into()),
            procedures_performed: Some("ECG".into()),
            prescriptions: Some("Nitroglycerin 0.4mg".into()),
            follow_up_instructions: Some("Return in two weeks".into()),
            next_appointment_date: Some(NaiveDate::from_ymd(2021, 3, 23)),
        }
    }

    #[test]
    fn patients_are_assigned_increasing_ids() {
        let mut inner = Inner::default();

        let id_a = inner.patients.insert(patient_args("a@example.com")).unwrap().id;
        let id_b = inner.patients.insert(patient_args("b@example.com")).unwrap().id;

        assert_eq!(id_a, 1);
        assert_eq!(id_b, 2);
        assert_eq!(inner.patients.get(id_a).unwrap().email.as_str(), "a@example.com");
    }

    #[test]
    fn patient_email_must_be_unique() {
        let mut inner = Inner::default();

        inner.patients.insert(patient_args("a@example.com")).unwrap();

        let err = inner
            .patients
            .insert(patient_args("a@example.com"))
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
    }

    #[test]
    fn patient_update_is_a_patch() {
        let mut inner = Inner::default();

        let id = inner.patients.insert(patient_args("a@example.com")).unwrap().id;

        let patch = PatientUpdate {
            phone_number: Some("030-9999999".into()),
            ..Default::default()
        };
        inner.patients.update(id, patch).unwrap();

        let patient = inner.patients.get(id).unwrap();
        assert_eq!(patient.phone_number, "030-9999999");
        assert_eq!(patient.first_name, "Juna");
        assert_eq!(patient.email.as_str(), "a@example.com");
        assert_eq!(patient.date_of_birth, NaiveDate::from_ymd(1985, 4, 12));
    }

    #[test]
    fn patient_update_rechecks_email_uniqueness() {
        let mut inner = Inner::default();

        inner.patients.insert(patient_args("a@example.com")).unwrap();
        let id = inner.patients.insert(patient_args("b@example.com")).unwrap().id;

        let patch = PatientUpdate {
            email: Some(Email::new("a@example.com").unwrap()),
            ..Default::default()
        };
        let err = inner.patients.update(id, patch).unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));

        // updating a patient to its own email is not a conflict
        let patch = PatientUpdate {
            email: Some(Email::new("b@example.com").unwrap()),
            ..Default::default()
        };
        inner.patients.update(id, patch).unwrap();
    }

    #[test]
    fn doctor_license_number_must_be_unique() {
        let mut inner = Inner::default();

        inner
            .doctors
            .insert(doctor_args("dr.a@example.com", "LIC-1"))
            .unwrap();

        let err = inner
            .doctors
            .insert(doctor_args("dr.b@example.com", "LIC-1"))
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));

        // updating a doctor to its own email is not a conflict
        let res = inner
            .doctors
            .update(
                1,
                DoctorUpdate {
                    email: Some(Email::new("dr.a@example.com").unwrap()),
                    ..Default::default()
                },
            )
            .map(|_| ());
        assert!(res.is_ok());
    }

    #[test]
    fn appointment_requires_existing_patient_and_doctor() {
        let mut inner = Inner::default();

        let err = inner.insert_appointment(appointment_args(1, 1)).unwrap_err();
        assert!(matches!(err, StorageError::NotFound("Patient", 1)));

        inner.patients.insert(patient_args("a@example.com")).unwrap();

        let err = inner
            .insert_appointment(appointment_args(1, 999))
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound("Doctor", 999)));

        inner
            .doctors
            .insert(doctor_args("dr.a@example.com", "LIC-1"))
            .unwrap();

        let id = inner.insert_appointment(appointment_args(1, 1)).unwrap().id;
        assert_eq!(inner.appointments.get(id).unwrap().patient_id, 1);
    }

    #[test]
    fn appointment_update_validates_new_references() {
        let mut inner = Inner::default();

        inner.patients.insert(patient_args("a@example.com")).unwrap();
        inner
            .doctors
            .insert(doctor_args("dr.a@example.com", "LIC-1"))
            .unwrap();
        let id = inner.insert_appointment(appointment_args(1, 1)).unwrap().id;

        let patch = AppointmentUpdate {
            doctor_id: Some(7),
            ..Default::default()
        };
        let err = inner.update_appointment(id, patch).unwrap_err();
        assert!(matches!(err, StorageError::NotFound("Doctor", 7)));

        let patch = AppointmentUpdate {
            reason: Some("Follow up".into()),
            ..Default::default()
        };
        let appointment = inner.update_appointment(id, patch).unwrap();
        assert_eq!(appointment.reason, "Follow up");
        assert_eq!(appointment.doctor_id, 1);
    }

    #[test]
    fn visit_doctor_attribution_is_optional() {
        let mut inner = Inner::default();

        inner.patients.insert(patient_args("a@example.com")).unwrap();

        let id = inner.insert_visit(visit_args(1, None)).unwrap().id;
        assert_eq!(inner.visits.get(id).unwrap().doctor_id, None);

        let err = inner.insert_visit(visit_args(1, Some(999))).unwrap_err();
        assert!(matches!(err, StorageError::NotFound("Doctor", 999)));

        let err = inner.insert_visit(visit_args(42, None)).unwrap_err();
        assert!(matches!(err, StorageError::NotFound("Patient", 42)));
    }

    #[test]
    fn visit_update_of_diagnosis_leaves_other_fields_untouched() {
        let mut inner = Inner::default();

        inner.patients.insert(patient_args("a@example.com")).unwrap();
        let id = inner.insert_visit(visit_args(1, None)).unwrap().id;

        let patch = VisitUpdate {
            diagnosis: Some(Some("Stable angina".into())),
            ..Default::default()
        };
        inner.update_visit(id, patch).unwrap();

        let visit = inner.visits.get(id).unwrap();
        assert_eq!(visit.diagnosis.as_deref(), Some("Stable angina"));
        assert_eq!(visit.chief_complaint.as_deref(), Some("Chest pain"));
        assert_eq!(visit.blood_pressure.as_deref(), Some("120/80"));
        assert_eq!(visit.pulse_rate, Some(72));
        assert_eq!(visit.treatment.as_deref(), Some("Nitroglycerin"));
    }

    #[test]
    fn visit_update_distinguishes_clear_from_absent() {
        let mut inner = Inner::default();

        inner.patients.insert(patient_args("a@example.com")).unwrap();
        let id = inner.insert_visit(visit_args(1, None)).unwrap().id;

        let patch: VisitUpdate =
            serde_json::from_str(r#"{ "chief_complaint": null }"#).unwrap();
        inner.update_visit(id, patch).unwrap();

        let visit = inner.visits.get(id).unwrap();
        assert_eq!(visit.chief_complaint, None);
        assert_eq!(visit.clinical_notes.as_deref(), Some("Patient reports intermittent chest pain"));
    }

    #[test]
    fn deleting_a_patient_cascades_to_dependents() {
        let mut inner = Inner::default();

        inner.patients.insert(patient_args("a@example.com")).unwrap();
        inner
            .doctors
            .insert(doctor_args("dr.a@example.com", "LIC-1"))
            .unwrap();
        inner.insert_appointment(appointment_args(1, 1)).unwrap();
        inner.insert_visit(visit_args(1, Some(1))).unwrap();

        assert!(inner.remove_patient(1));
        assert!(inner.appointments.by_patient(1).is_empty());
        assert!(inner.visits.by_patient(1).is_empty());

        assert!(!inner.remove_patient(1));
    }

    #[test]
    fn deleting_a_doctor_detaches_visits_and_removes_appointments() {
        let mut inner = Inner::default();

        inner.patients.insert(patient_args("a@example.com")).unwrap();
        inner
            .doctors
            .insert(doctor_args("dr.a@example.com", "LIC-1"))
            .unwrap();
        inner.insert_appointment(appointment_args(1, 1)).unwrap();
        let visit_id = inner.insert_visit(visit_args(1, Some(1))).unwrap().id;

        assert!(inner.remove_doctor(1));
        assert!(inner.appointments.by_doctor(1).is_empty());

        let visit = inner.visits.get(visit_id).unwrap();
        assert_eq!(visit.doctor_id, None);
        assert_eq!(visit.diagnosis.as_deref(), Some("Angina pectoris"));
    }

    #[test]
    fn listing_is_ordered_and_paginated() {
        let mut inner = Inner::default();

        for i in 0..5 {
            inner
                .patients
                .insert(patient_args(&format!("p{}@example.com", i)))
                .unwrap();
        }

        let page = inner.patients.list(1, 2);
        let ids = page.iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![2, 3]);

        assert_eq!(inner.patients.list(0, 100).len(), 5);
        assert!(inner.patients.list(5, 100).is_empty());
    }

    #[test]
    fn usernames_must_be_unique() {
        let mut inner = Inner::default();

        inner
            .credentials
            .insert("drsmith".into(), "hash-a".into(), Role::Doctor)
            .unwrap();

        let err = inner
            .credentials
            .insert("drsmith".into(), "hash-b".into(), Role::Nurse)
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));

        let credential = inner.credentials.by_username("drsmith").unwrap();
        assert_eq!(credential.role, Role::Doctor);
        assert!(credential.is_active);
    }
}
