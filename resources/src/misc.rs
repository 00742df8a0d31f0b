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

use std::convert::TryFrom;
use std::fmt::{Display, Formatter, Result as FmtResult};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Record identifier assigned by the repository.
pub type Id = i32;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

#[derive(Error, Debug)]
#[error("Invalid email address: {0}!")]
pub struct InvalidEmail(String);

impl Email {
    pub fn new<T: Into<String>>(value: T) -> Result<Self, InvalidEmail> {
        let value = value.into();

        if EMAIL.is_match(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidEmail(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = InvalidEmail;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plausible_addresses() {
        assert!(Email::new("jane.doe@example.com").is_ok());
        assert!(Email::new("a@b.co").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(Email::new("").is_err());
        assert!(Email::new("no-at-sign").is_err());
        assert!(Email::new("two@@example.com").is_err());
        assert!(Email::new("spaces in@example.com").is_err());
        assert!(Email::new("missing@tld").is_err());
    }

    #[test]
    fn deserialize_rejects_malformed_addresses() {
        assert!(serde_json::from_str::<Email>(r#""jane@example.com""#).is_ok());
        assert!(serde_json::from_str::<Email>(r#""jane""#).is_err());
    }
}
