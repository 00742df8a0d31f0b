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

use base64::{decode_config, encode_config, URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use jwt::{Error as JwtError, FromBase64, ToBase64};
use openssl::{
    error::ErrorStack as OpenSslError,
    hash::MessageDigest,
    memcmp,
    pkey::{PKey, Private},
    sign::Signer,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use resources::credential::Role;

/// Token signing material and lifetime, loaded once at startup and
/// injected into the service.
#[derive(Clone)]
pub struct TokenConfig {
    key: PKey<Private>,
    ttl: Duration,
}

impl TokenConfig {
    pub fn new(secret: &[u8], ttl_minutes: i64) -> Result<Self, OpenSslError> {
        let key = PKey::hmac(secret)?;

        Ok(Self {
            key,
            ttl: Duration::minutes(ttl_minutes),
        })
    }

    pub fn key(&self) -> &PKey<Private> {
        &self.key
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

/// The claims carried by a bearer token. Stateless: everything needed to
/// authorize a request is in here, nothing is kept on the server, and a
/// token stays valid until its natural expiry.
#[derive(Serialize, Deserialize)]
pub struct AccessToken {
    pub sub: String,
    pub role: Role,

    #[serde(with = "timestamp")]
    pub exp: DateTime<Utc>,

    #[serde(with = "timestamp")]
    pub iat: DateTime<Utc>,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("JWT Error: {0}")]
    JwtError(JwtError),

    #[error("OpenSSL Error: {0}")]
    OpenSslError(OpenSslError),

    #[error("Authorization header is missing!")]
    Missing,

    #[error("Authorization header has invalid value!")]
    InvalidValue,

    #[error("Invalid signature!")]
    InvalidSignature,

    #[error("Expired!")]
    Expired,
}

#[derive(Serialize, Deserialize)]
struct Header {
    alg: Algorithm,
}

#[derive(Serialize, Deserialize)]
enum Algorithm {
    #[serde(rename = "HS256")]
    Hs256,
}

impl AccessToken {
    pub fn issue(
        sub: String,
        role: Role,
        key: &PKey<Private>,
        ttl: Option<Duration>,
        now: DateTime<Utc>,
    ) -> Result<String, Error> {
        let ttl = ttl.unwrap_or_else(|| Duration::minutes(15));
        let claims = Self {
            sub,
            role,
            exp: now + ttl,
            iat: now,
        };

        let header = Header {
            alg: Algorithm::Hs256,
        }
        .to_base64()?;
        let claims = claims.to_base64()?;
        let signature = hmac(key, header.as_bytes(), claims.as_bytes())?;
        let signature = encode_config(&signature, URL_SAFE_NO_PAD);

        Ok([&*header, &*claims, &*signature].join("."))
    }

    pub fn verify(
        access_token: &str,
        key: &PKey<Private>,
        now: DateTime<Utc>,
    ) -> Result<Self, Error> {
        let mut access_token = access_token.split('.');
        let header_str = access_token.next().ok_or(JwtError::NoHeaderComponent)?;
        let claims_str = access_token.next().ok_or(JwtError::NoClaimsComponent)?;
        let signature_str = access_token.next().ok_or(JwtError::NoSignatureComponent)?;

        if access_token.next().is_some() {
            return Err(JwtError::TooManyComponents.into());
        }

        let header = Header::from_base64(header_str)?;

        match header.alg {
            Algorithm::Hs256 => {
                let expected = hmac(key, header_str.as_bytes(), claims_str.as_bytes())?;
                let given = decode_config(signature_str, URL_SAFE_NO_PAD)
                    .map_err(|_| Error::InvalidSignature)?;

                if given.len() != expected.len() || !memcmp::eq(&given, &expected) {
                    return Err(Error::InvalidSignature);
                }
            }
        }

        let access_token = Self::from_base64(claims_str)?;

        if now >= access_token.exp {
            return Err(Error::Expired);
        }

        Ok(access_token)
    }
}

fn hmac(key: &PKey<Private>, header: &[u8], claims: &[u8]) -> Result<Vec<u8>, Error> {
    let mut signer = Signer::new(MessageDigest::sha256(), key)?;

    signer.update(header)?;
    signer.update(b".")?;
    signer.update(claims)?;

    Ok(signer.sign_to_vec()?)
}

impl From<JwtError> for Error {
    fn from(err: JwtError) -> Self {
        Self::JwtError(err)
    }
}

impl From<OpenSslError> for Error {
    fn from(err: OpenSslError) -> Self {
        Self::OpenSslError(err)
    }
}

mod timestamp {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value.timestamp().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let timestamp = i64::deserialize(deserializer)?;

        Ok(Utc.timestamp(timestamp, 0))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    fn key() -> PKey<Private> {
        PKey::hmac(b"test-secret").unwrap()
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2021-03-09T12:00:00Z")
            .unwrap()
            .into()
    }

    #[test]
    fn issue_then_verify_yields_the_same_claims() {
        let key = key();
        let token = AccessToken::issue(
            "drsmith".into(),
            Role::Doctor,
            &key,
            Some(Duration::minutes(30)),
            now(),
        )
        .unwrap();

        let claims = AccessToken::verify(&token, &key, now()).unwrap();
        assert_eq!(claims.sub, "drsmith");
        assert_eq!(claims.role, Role::Doctor);
        assert_eq!(claims.exp, now() + Duration::minutes(30));
    }

    #[test]
    fn verify_fails_at_and_after_expiry() {
        let key = key();
        let token = AccessToken::issue(
            "drsmith".into(),
            Role::Doctor,
            &key,
            Some(Duration::minutes(30)),
            now(),
        )
        .unwrap();

        let just_before = now() + Duration::minutes(30) - Duration::seconds(1);
        assert!(AccessToken::verify(&token, &key, just_before).is_ok());

        let at_expiry = now() + Duration::minutes(30);
        assert!(matches!(
            AccessToken::verify(&token, &key, at_expiry),
            Err(Error::Expired)
        ));
    }

    #[test]
    fn verify_rejects_a_foreign_key() {
        let token =
            AccessToken::issue("drsmith".into(), Role::Doctor, &key(), None, now()).unwrap();

        let other = PKey::hmac(b"other-secret").unwrap();
        assert!(matches!(
            AccessToken::verify(&token, &other, now()),
            Err(Error::InvalidSignature)
        ));
    }

    #[test]
    fn verify_rejects_tampered_claims() {
        let key = key();
        let token =
            AccessToken::issue("nurse".into(), Role::Nurse, &key, None, now()).unwrap();

        let mut parts = token.split('.').map(str::to_owned).collect::<Vec<_>>();
        let forged = AccessToken {
            sub: "nurse".into(),
            role: Role::Admin,
            exp: now() + Duration::minutes(15),
            iat: now(),
        };
        parts[1] = forged.to_base64().unwrap().into_owned();
        let forged = parts.join(".");

        assert!(matches!(
            AccessToken::verify(&forged, &key, now()),
            Err(Error::InvalidSignature)
        ));
    }

    #[test]
    fn verify_rejects_malformed_tokens() {
        let key = key();

        assert!(AccessToken::verify("", &key, now()).is_err());
        assert!(AccessToken::verify("a.b", &key, now()).is_err());
        assert!(AccessToken::verify("a.b.c.d", &key, now()).is_err());
        assert!(AccessToken::verify("!!!.???.###", &key, now()).is_err());
    }

    #[test]
    fn issue_defaults_to_fifteen_minutes() {
        let key = key();
        let token =
            AccessToken::issue("drsmith".into(), Role::Doctor, &key, None, now()).unwrap();

        let claims = AccessToken::verify(&token, &key, now()).unwrap();
        assert_eq!(claims.exp, now() + Duration::minutes(15));
    }
}
