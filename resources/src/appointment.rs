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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::misc::Id;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Id,
    pub patient_id: Id,
    pub doctor_id: Id,
    pub appointment_time: DateTime<Utc>,
    pub reason: String,
    pub status: Status,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Scheduled,
    Completed,
    Cancelled,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppointmentCreate {
    pub patient_id: Id,
    pub doctor_id: Id,
    pub appointment_time: DateTime<Utc>,
    pub reason: String,

    #[serde(default)]
    pub status: Status,
}

/// Patch parameters: absent fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppointmentUpdate {
    pub patient_id: Option<Id>,
    pub doctor_id: Option<Id>,
    pub appointment_time: Option<DateTime<Utc>>,
    pub reason: Option<String>,
    pub status: Option<Status>,
}

impl AppointmentUpdate {
    pub fn apply_to(&self, appointment: &mut Appointment) {
        if let Some(patient_id) = self.patient_id {
            appointment.patient_id = patient_id;
        }

        if let Some(doctor_id) = self.doctor_id {
            appointment.doctor_id = doctor_id;
        }

        if let Some(appointment_time) = self.appointment_time {
            appointment.appointment_time = appointment_time;
        }

        if let Some(reason) = &self.reason {
            appointment.reason = reason.clone();
        }

        if let Some(status) = self.status {
            appointment.status = status;
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Scheduled
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Scheduled => f.write_str("Scheduled"),
            Self::Completed => f.write_str("Completed"),
            Self::Cancelled => f.write_str("Cancelled"),
        }
    }
}
