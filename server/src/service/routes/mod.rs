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

pub mod appointment;
pub mod chatbot;
pub mod doctor;
pub mod health;
pub mod patient;
pub mod user;
pub mod visit;

use actix_web::web::ServiceConfig;

pub fn configure_routes(cfg: &mut ServiceConfig) {
    health::configure_routes(cfg);
    user::configure_routes(cfg);
    patient::configure_routes(cfg);
    doctor::configure_routes(cfg);
    appointment::configure_routes(cfg);
    visit::configure_routes(cfg);
    chatbot::configure_routes(cfg);
}

#[cfg(test)]
mod tests {
    use actix_web::{
        http::StatusCode,
        web::{Data, Form, Json, Path},
    };
    use chrono::{Duration, Utc};

    use resources::credential::{LoginArgs, Role, UserCreate};

    use crate::service::{
        error::RequestError,
        header::Authorization,
        misc::{AccessToken, TokenConfig},
    };
    use crate::state::{
        tests::{appointment_args, doctor_args, patient_args},
        State,
    };

    use super::{appointment, doctor, patient, user};

    fn token(role: Role) -> Authorization {
        Authorization(AccessToken {
            sub: "someone".into(),
            role,
            exp: Utc::now() + Duration::minutes(30),
            iat: Utc::now(),
        })
    }

    #[actix_rt::test]
    async fn register_login_and_crud_scenario() {
        let state = State::new();
        let config = TokenConfig::new(b"test-secret", 30).unwrap();

        // register a doctor account
        let res = user::register(
            Data::new(state.clone()),
            Json(UserCreate {
                username: "drsmith".into(),
                password: "cardio-2021".into(),
                role: Role::Doctor,
            }),
        )
        .await
        .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        // login yields a bearer token, wrong passwords do not
        let res = user::login(
            Data::new(state.clone()),
            Data::new(config.clone()),
            Form(LoginArgs {
                username: "drsmith".into(),
                password: "cardio-2021".into(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let err = user::login(
            Data::new(state.clone()),
            Data::new(config),
            Form(LoginArgs {
                username: "drsmith".into(),
                password: "wrong".into(),
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RequestError::Unauthenticated(_)));

        // a receptionist creates the patient
        let res = patient::create(
            Data::new(state.clone()),
            token(Role::Receptionist),
            Json(patient_args("a@x.com")),
        )
        .await
        .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        // the appointment is rejected while the doctor record is missing
        let err = appointment::create(
            Data::new(state.clone()),
            token(Role::Receptionist),
            Json(appointment_args(1, 999)),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RequestError::NotFound(_)));

        let res = doctor::create(
            Data::new(state.clone()),
            token(Role::Admin),
            Json(doctor_args("dr.smith@x.com", "LIC-77")),
        )
        .await
        .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let res = appointment::create(
            Data::new(state.clone()),
            token(Role::Receptionist),
            Json(appointment_args(1, 1)),
        )
        .await
        .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        // the patient role may not list appointments
        let err = appointment::get_all(
            Data::new(state.clone()),
            token(Role::Patient),
            crate::service::misc::Query(Default::default()),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RequestError::Forbidden(_)));
    }

    #[actix_rt::test]
    async fn duplicate_registration_conflicts() {
        let state = State::new();

        let args = UserCreate {
            username: "nurse1".into(),
            password: "pass".into(),
            role: Role::Nurse,
        };

        user::register(Data::new(state.clone()), Json(args.clone()))
            .await
            .unwrap();

        let err = user::register(Data::new(state.clone()), Json(args))
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::Conflict(_)));
    }

    #[actix_rt::test]
    async fn authorization_is_checked_before_existence() {
        let state = State::new();

        // id 42 does not exist; the unauthorized caller still sees 403
        let err = patient::get_one(Data::new(state.clone()), token(Role::Pharmacist), Path::from(42))
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::Forbidden(_)));

        // an authorized caller gets the 404
        let err = patient::get_one(Data::new(state), token(Role::Doctor), Path::from(42))
            .await
            .unwrap_err();
        assert!(matches!(err, RequestError::NotFound(_)));
    }
}
