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

use actix_web::{dev::HttpResponseBuilder, error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use thiserror::Error;

use crate::state::StorageError;

use super::misc::AccessTokenError;

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("Could not validate credentials: {0}")]
    AccessTokenError(AccessTokenError),

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Invalid(String),

    #[error("Internal Error: {0}")]
    Internal(String),
}

impl RequestError {
    pub fn unauthenticated<T: Into<String>>(msg: T) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal<T: Into<String>>(msg: T) -> Self {
        Self::Internal(msg.into())
    }
}

impl ResponseError for RequestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AccessTokenError(_) | Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Invalid(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut res = HttpResponseBuilder::new(self.status_code());

        if self.status_code() == StatusCode::UNAUTHORIZED {
            res.header("WWW-Authenticate", "Bearer");
        }

        res.json(json!({ "detail": self.to_string() }))
    }
}

/* AsReqErr */

pub trait AsReqErr {
    fn as_req_err(self) -> RequestError;
}

impl<T> From<T> for RequestError
where
    T: AsReqErr,
{
    fn from(err: T) -> RequestError {
        err.as_req_err()
    }
}

impl AsReqErr for AccessTokenError {
    fn as_req_err(self) -> RequestError {
        RequestError::AccessTokenError(self)
    }
}

impl AsReqErr for StorageError {
    fn as_req_err(self) -> RequestError {
        match &self {
            StorageError::NotFound(..) => RequestError::NotFound(self.to_string()),
            StorageError::Conflict(_) => RequestError::Conflict(self.to_string()),
        }
    }
}
