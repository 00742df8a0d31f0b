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

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::misc::Id;

/// A clinical encounter record. Doctor attribution is optional so that
/// walk-in visits without an assigned doctor remain valid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    pub id: Id,
    pub patient_id: Id,
    pub doctor_id: Option<Id>,
    pub visit_date: DateTime<Utc>,

    pub chief_complaint: Option<String>,
    pub clinical_notes: Option<String>,

    pub blood_pressure: Option<String>,
    pub temperature: Option<String>,
    pub pulse_rate: Option<i32>,
    pub respiration_rate: Option<i32>,
    pub weight_kg: Option<String>,
    pub height_cm: Option<String>,

    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub procedures_performed: Option<String>,
    pub prescriptions: Option<String>,

    pub follow_up_instructions: Option<String>,
    pub next_appointment_date: Option<NaiveDate>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct VisitCreate {
    pub patient_id: Id,

    #[serde(default)]
    pub doctor_id: Option<Id>,

    #[serde(default = "Utc::now")]
    pub visit_date: DateTime<Utc>,

    #[serde(default)]
    pub chief_complaint: Option<String>,

    #[serde(default)]
    pub clinical_notes: Option<String>,

    #[serde(default)]
    pub blood_pressure: Option<String>,

    #[serde(default)]
    pub temperature: Option<String>,

    #[serde(default)]
    pub pulse_rate: Option<i32>,

    #[serde(default)]
    pub respiration_rate: Option<i32>,

    #[serde(default)]
    pub weight_kg: Option<String>,

    #[serde(default)]
    pub height_cm: Option<String>,

    #[serde(default)]
    pub diagnosis: Option<String>,

    #[serde(default)]
    pub treatment: Option<String>,

    #[serde(default)]
    pub procedures_performed: Option<String>,

    #[serde(default)]
    pub prescriptions: Option<String>,

    #[serde(default)]
    pub follow_up_instructions: Option<String>,

    #[serde(default)]
    pub next_appointment_date: Option<NaiveDate>,
}

/// Patch parameters. The nested options distinguish an absent field
/// (left untouched) from an explicit `null` (cleared).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct VisitUpdate {
    pub patient_id: Option<Id>,

    #[serde(default, deserialize_with = "double_option")]
    pub doctor_id: Option<Option<Id>>,

    pub visit_date: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "double_option")]
    pub chief_complaint: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub clinical_notes: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub blood_pressure: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub temperature: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub pulse_rate: Option<Option<i32>>,

    #[serde(default, deserialize_with = "double_option")]
    pub respiration_rate: Option<Option<i32>>,

    #[serde(default, deserialize_with = "double_option")]
    pub weight_kg: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub height_cm: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub diagnosis: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub treatment: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub procedures_performed: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub prescriptions: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub follow_up_instructions: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub next_appointment_date: Option<Option<NaiveDate>>,
}

// a bare `Option` would swallow an explicit `null` and make it
// indistinguishable from an absent field
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::deserialize(deserializer).map(Some)
}

impl VisitUpdate {
    pub fn apply_to(&self, visit: &mut Visit) {
        if let Some(patient_id) = self.patient_id {
            visit.patient_id = patient_id;
        }

        if let Some(doctor_id) = self.doctor_id {
            visit.doctor_id = doctor_id;
        }

        if let Some(visit_date) = self.visit_date {
            visit.visit_date = visit_date;
        }

        if let Some(chief_complaint) = &self.chief_complaint {
            visit.chief_complaint = chief_complaint.clone();
        }

        if let Some(clinical_notes) = &self.clinical_notes {
            visit.clinical_notes = clinical_notes.clone();
        }

        if let Some(blood_pressure) = &self.blood_pressure {
            visit.blood_pressure = blood_pressure.clone();
        }

        if let Some(temperature) = &self.temperature {
            visit.temperature = temperature.clone();
        }

        if let Some(pulse_rate) = self.pulse_rate {
            visit.pulse_rate = pulse_rate;
        }

        if let Some(respiration_rate) = self.respiration_rate {
            visit.respiration_rate = respiration_rate;
        }

        if let Some(weight_kg) = &self.weight_kg {
            visit.weight_kg = weight_kg.clone();
        }

        if let Some(height_cm) = &self.height_cm {
            visit.height_cm = height_cm.clone();
        }

        if let Some(diagnosis) = &self.diagnosis {
            visit.diagnosis = diagnosis.clone();
        }

        if let Some(treatment) = &self.treatment {
            visit.treatment = treatment.clone();
        }

        if let Some(procedures_performed) = &self.procedures_performed {
            visit.procedures_performed = procedures_performed.clone();
        }

        if let Some(prescriptions) = &self.prescriptions {
            visit.prescriptions = prescriptions.clone();
        }

        if let Some(follow_up_instructions) = &self.follow_up_instructions {
            visit.follow_up_instructions = follow_up_instructions.clone();
        }

        if let Some(next_appointment_date) = self.next_appointment_date {
            visit.next_appointment_date = next_appointment_date;
        }
    }
}
