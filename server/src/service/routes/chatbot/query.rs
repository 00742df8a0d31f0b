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

use actix_web::{
    web::{Data, Json},
    HttpResponse,
};

use resources::{
    chatbot::{ChatbotQuery, ChatbotResponse},
    credential::Role,
    misc::Id,
};

use crate::service::{
    error::RequestError,
    header::Authorization,
    misc::policy::{self, Operation, Resource},
};
use crate::state::{Inner, State};

const LIST_LIMIT: usize = 10;

/// The facade is a presentation layer: past the endpoint's role gate it
/// never raises. Lookup and parsing failures degrade to explanatory
/// text.
pub async fn query(
    state: Data<State>,
    access_token: Authorization,
    args: Json<ChatbotQuery>,
) -> Result<HttpResponse, RequestError> {
    let role = access_token.role;

    if role != Role::Admin && role != Role::Doctor {
        return Err(RequestError::Forbidden(
            "Not authorized to use the chatbot for patient information.".into(),
        ));
    }

    let state = state.lock().await;
    let response = answer(&state, role, &args.query);

    Ok(HttpResponse::Ok().json(ChatbotResponse { response }))
}

fn answer(state: &Inner, role: Role, query: &str) -> String {
    use super::intent::{classify, extract_id, Intent};

    match classify(query) {
        Intent::PatientDetails => {
            if !policy::allowed(role, Operation::Read, Resource::Patient) {
                return "Access denied. You are not authorized to view patient records.".into();
            }

            patient_details(state, extract_id(query))
        }
        Intent::ListPatients => {
            if role != Role::Admin {
                return "You are not authorized to list all patients.".into();
            }

            list_patients(state)
        }
        Intent::DoctorDetails => {
            if !policy::allowed(role, Operation::Read, Resource::Doctor) {
                return "Access denied. You are not authorized to view doctor records.".into();
            }

            doctor_details(state, extract_id(query))
        }
        Intent::ListDoctors => {
            if role != Role::Admin {
                return "You are not authorized to list all doctors.".into();
            }

            list_doctors(state)
        }
        Intent::PatientAppointments => {
            if !policy::allowed(role, Operation::Read, Resource::Appointment) {
                return "Access denied. You are not authorized to view appointments.".into();
            }

            patient_appointments(state, extract_id(query))
        }
        Intent::PatientVisitHistory => {
            if !policy::allowed(role, Operation::Read, Resource::Visit) {
                return "Access denied. You are not authorized to view patient visit history."
                    .into();
            }

            patient_visit_history(state, extract_id(query))
        }
        Intent::Greeting => "Hello! How can I assist you with patient information today?".into(),
        Intent::Unknown => "I'm sorry, I couldn't understand that query. Please try rephrasing \
                            or ask about patient ID, doctor ID, appointments, or patient visit \
                            history."
            .into(),
    }
}

fn patient_details(state: &Inner, id: Option<Id>) -> String {
    let id = match id {
        Some(id) => id,
        None => {
            return "Please specify a patient ID (e.g., 'What are the details for patient ID 1?')."
                .into()
        }
    };

    match state.patients.get(id) {
        Ok(patient) => format!(
            "Patient ID: {}\nName: {} {}\nEmail: {}\nPhone: {}\nDate of Birth: {}\nAddress: {}\nGender: {}",
            patient.id,
            patient.first_name,
            patient.last_name,
            patient.email,
            patient.phone_number,
            patient.date_of_birth,
            patient.address,
            patient.gender,
        ),
        Err(_) => format!("Patient with ID {} not found.", id),
    }
}

fn list_patients(state: &Inner) -> String {
    let patients = state.patients.list(0, LIST_LIMIT);
    if patients.is_empty() {
        return "No patients found in the system.".into();
    }

    let patients = patients
        .iter()
        .map(|p| {
            format!(
                "- {} {} (ID: {}, Email: {})",
                p.first_name, p.last_name, p.id, p.email
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("Here are some patients:\n{}", patients)
}

fn doctor_details(state: &Inner, id: Option<Id>) -> String {
    let id = match id {
        Some(id) => id,
        None => {
            return "Please specify a doctor ID (e.g., 'What are the details for doctor ID 1?')."
                .into()
        }
    };

    match state.doctors.get(id) {
        Ok(doctor) => format!(
            "Doctor ID: {}\nName: {} {}\nEmail: {}\nSpecialization: {}\nPhone: {}\nLicense: {}",
            doctor.id,
            doctor.first_name,
            doctor.last_name,
            doctor.email,
            doctor.specialization,
            doctor.phone_number,
            doctor.license_number,
        ),
        Err(_) => format!("Doctor with ID {} not found.", id),
    }
}

fn list_doctors(state: &Inner) -> String {
    let doctors = state.doctors.list(0, LIST_LIMIT);
    if doctors.is_empty() {
        return "No doctors found in the system.".into();
    }

    let doctors = doctors
        .iter()
        .map(|d| {
            format!(
                "- {} {} (ID: {}, Spec: {})",
                d.first_name, d.last_name, d.id, d.specialization
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("Here are some doctors:\n{}", doctors)
}

fn patient_appointments(state: &Inner, id: Option<Id>) -> String {
    let id = match id {
        Some(id) => id,
        None => {
            return "Please specify a patient ID for appointments (e.g., 'Show appointments for \
                    patient 1')."
                .into()
        }
    };

    let patient = match state.patients.get(id) {
        Ok(patient) => patient,
        Err(_) => return format!("Patient with ID {} not found.", id),
    };

    let appointments = state.appointments.by_patient(id);
    if appointments.is_empty() {
        return format!("No appointments found for Patient ID {}.", id);
    }

    let appointments = appointments
        .iter()
        .map(|a| {
            format!(
                "- Appt ID: {}, Doctor: {}, Time: {}, Reason: {}, Status: {}",
                a.id,
                doctor_name(state, Some(a.doctor_id)),
                a.appointment_time.format("%Y-%m-%d %H:%M"),
                a.reason,
                a.status,
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Appointments for Patient {} {} (ID: {}):\n{}",
        patient.first_name, patient.last_name, id, appointments
    )
}

fn patient_visit_history(state: &Inner, id: Option<Id>) -> String {
    let id = match id {
        Some(id) => id,
        None => {
            return "Please specify a patient ID for visit history (e.g., 'Show medical records \
                    for patient 1')."
                .into()
        }
    };

    let patient = match state.patients.get(id) {
        Ok(patient) => patient,
        Err(_) => return format!("Patient with ID {} not found.", id),
    };

    let visits = state.visits.by_patient(id);
    if visits.is_empty() {
        return format!("No visit history found for Patient ID {}.", id);
    }

    let visits = visits
        .iter()
        .map(|v| {
            format!(
                "- Visit ID: {}, Date: {}, Doctor: {}\n  Chief Complaint: {}\n  Diagnosis: {}\n  Treatment: {}",
                v.id,
                v.visit_date.format("%Y-%m-%d %H:%M"),
                doctor_name(state, v.doctor_id),
                v.chief_complaint.as_deref().unwrap_or("N/A"),
                v.diagnosis.as_deref().unwrap_or("N/A"),
                v.treatment.as_deref().unwrap_or("N/A"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Visit history for Patient {} {} (ID: {}):\n{}",
        patient.first_name, patient.last_name, id, visits
    )
}

fn doctor_name(state: &Inner, id: Option<Id>) -> String {
    id.and_then(|id| state.doctors.get(id).ok())
        .map(|d| format!("{} {}", d.first_name, d.last_name))
        .unwrap_or_else(|| "N/A".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;

    use crate::service::misc::AccessToken;
    use crate::state::tests::{appointment_args, doctor_args, patient_args, visit_args};

    async fn state() -> State {
        let state = State::new();

        {
            let mut inner = state.lock().await;
            inner.patients.insert(patient_args("a@example.com")).unwrap();
            inner
                .doctors
                .insert(doctor_args("dr.a@example.com", "LIC-1"))
                .unwrap();
            inner.insert_appointment(appointment_args(1, 1)).unwrap();
            inner.insert_visit(visit_args(1, Some(1))).unwrap();
        }

        state
    }

    fn token(role: Role) -> Authorization {
        Authorization(AccessToken {
            sub: "someone".into(),
            role,
            exp: Utc::now() + chrono::Duration::minutes(30),
            iat: Utc::now(),
        })
    }

    async fn ask(state: &State, role: Role, query: &str) -> String {
        answer(&*state.lock().await, role, query)
    }

    #[actix_rt::test]
    async fn doctor_can_query_patient_details() {
        let state = state().await;

        let response = ask(
            &state,
            Role::Doctor,
            "What are the details for patient ID 1?",
        )
        .await;

        assert!(response.contains("Juna Fuchs"));
        assert!(response.contains("a@example.com"));
    }

    #[actix_rt::test]
    async fn missing_patient_degrades_to_text() {
        let state = state().await;

        let response = ask(
            &state,
            Role::Doctor,
            "What are the details for patient ID 999?",
        )
        .await;
        assert!(response.contains("not found"));

        let response = ask(&state, Role::Doctor, "patient details please").await;
        assert!(response.contains("Please specify a patient ID"));
    }

    #[actix_rt::test]
    async fn listing_is_admin_only_inside_the_facade() {
        let state = state().await;

        let response = ask(&state, Role::Doctor, "list patients").await;
        assert_eq!(response, "You are not authorized to list all patients.");

        let response = ask(&state, Role::Admin, "list patients").await;
        assert!(response.starts_with("Here are some patients:"));
        assert!(response.contains("(ID: 1, Email: a@example.com)"));

        let response = ask(&state, Role::Doctor, "list doctors").await;
        assert_eq!(response, "You are not authorized to list all doctors.");
    }

    #[actix_rt::test]
    async fn appointments_and_visits_render_doctor_names() {
        let state = state().await;

        let response = ask(&state, Role::Admin, "Show appointments for patient 1").await;
        assert!(response.contains("Doctor: Max Mustermann"));
        assert!(response.contains("Status: Scheduled"));

        let response = ask(&state, Role::Admin, "show medical records for patient 1").await;
        assert!(response.contains("Chief Complaint: Chest pain"));
        assert!(response.contains("Diagnosis: Angina pectoris"));
    }

    #[actix_rt::test]
    async fn greeting_and_fallback() {
        let state = state().await;

        let response = ask(&state, Role::Admin, "hello").await;
        assert!(response.starts_with("Hello!"));

        let response = ask(&state, Role::Admin, "make me a sandwich").await;
        assert!(response.contains("couldn't understand"));
    }

    #[actix_rt::test]
    async fn nurse_is_rejected_at_the_endpoint() {
        let state = state().await;

        let err = query(
            Data::new(state),
            token(Role::Nurse),
            Json(ChatbotQuery {
                query: "What are the details for patient ID 1?".into(),
            }),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, RequestError::Forbidden(_)));
        assert!(err.to_string().contains("Not authorized"));
    }

    #[actix_rt::test]
    async fn doctor_query_is_always_a_successful_response() {
        let state = state().await;

        let res = query(
            Data::new(state),
            token(Role::Doctor),
            Json(ChatbotQuery {
                query: "gibberish with no intent".into(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(res.status(), actix_web::http::StatusCode::OK);
    }
}
