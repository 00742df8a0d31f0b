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
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::misc::Id;

/// Stored login identity. Never serialized into API responses; use
/// [`UserInfo`] for that.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub id: Id,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Nurse,
    Receptionist,
    Patient,
    Pharmacist,
}

/// The view of a credential that is safe to return to clients.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: Id,
    pub username: String,
    pub role: Role,
    pub is_active: bool,
}

#[derive(Clone, Debug, Deserialize)]
pub struct UserCreate {
    pub username: String,
    pub password: String,
    pub role: Role,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoginArgs {
    pub username: String,
    pub password: String,
}

#[derive(Error, Debug)]
#[error("Unknown role: {0}!")]
pub struct UnknownRole(String);

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Doctor => "doctor",
            Self::Nurse => "nurse",
            Self::Receptionist => "receptionist",
            Self::Patient => "patient",
            Self::Pharmacist => "pharmacist",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "doctor" => Ok(Self::Doctor),
            "nurse" => Ok(Self::Nurse),
            "receptionist" => Ok(Self::Receptionist),
            "patient" => Ok(Self::Patient),
            "pharmacist" => Ok(Self::Pharmacist),
            _ => Err(UnknownRole(s.into())),
        }
    }
}

impl From<&Credential> for UserInfo {
    fn from(credential: &Credential) -> Self {
        Self {
            id: credential.id,
            username: credential.username.clone(),
            role: credential.role,
            is_active: credential.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_its_name() {
        let roles = [
            Role::Admin,
            Role::Doctor,
            Role::Nurse,
            Role::Receptionist,
            Role::Patient,
            Role::Pharmacist,
        ];

        for role in &roles {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), *role);
        }

        assert!("janitor".parse::<Role>().is_err());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
        assert_eq!(
            serde_json::from_str::<Role>(r#""receptionist""#).unwrap(),
            Role::Receptionist
        );
        assert!(serde_json::from_str::<Role>(r#""Admin""#).is_err());
    }

    #[test]
    fn user_info_carries_no_password_hash() {
        let credential = Credential {
            id: 1,
            username: "drsmith".into(),
            password_hash: "pbkdf2-sha256$1$abc$def".into(),
            role: Role::Doctor,
            is_active: true,
        };

        let info = UserInfo::from(&credential);
        let json = serde_json::to_string(&info).unwrap();

        assert!(!json.contains("pbkdf2"));
        assert!(json.contains("drsmith"));
    }
}
