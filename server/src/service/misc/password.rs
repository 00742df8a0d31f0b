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

use base64::{decode, encode};
use openssl::{error::ErrorStack as OpenSslError, hash::MessageDigest, memcmp, pkcs5::pbkdf2_hmac};
use rand::{thread_rng, RngCore};

const SCHEME: &str = "pbkdf2-sha256";
const ITERATIONS: usize = 100_000;
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;

/// Derives a salted hash in the form
/// `pbkdf2-sha256$<iterations>$<salt>$<key>`.
pub fn hash(password: &str) -> Result<String, OpenSslError> {
    let mut salt = [0u8; SALT_LEN];
    thread_rng().fill_bytes(&mut salt);

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac(
        password.as_bytes(),
        &salt,
        ITERATIONS,
        MessageDigest::sha256(),
        &mut key,
    )?;

    Ok(format!(
        "{}${}${}${}",
        SCHEME,
        ITERATIONS,
        encode(&salt),
        encode(&key)
    ))
}

/// Recomputes the derivation and compares in constant time. Any parse
/// failure of the stored value verifies as false.
pub fn verify(password: &str, stored: &str) -> bool {
    let fields = stored.split('$').collect::<Vec<_>>();
    if fields.len() != 4 || fields[0] != SCHEME {
        return false;
    }

    let iterations = match fields[1].parse::<usize>() {
        Ok(iterations) => iterations,
        Err(_) => return false,
    };

    let salt = match decode(fields[2]) {
        Ok(salt) => salt,
        Err(_) => return false,
    };

    let expected = match decode(fields[3]) {
        Ok(expected) => expected,
        Err(_) => return false,
    };

    if expected.is_empty() {
        return false;
    }

    let mut key = vec![0u8; expected.len()];
    if pbkdf2_hmac(
        password.as_bytes(),
        &salt,
        iterations,
        MessageDigest::sha256(),
        &mut key,
    )
    .is_err()
    {
        return false;
    }

    memcmp::eq(&key, &expected)
}
