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

use std::collections::BTreeMap;

use resources::{
    credential::{Credential, Role},
    misc::Id,
};

use super::StorageError;

#[derive(Default)]
pub struct Credentials {
    by_id: BTreeMap<Id, Credential>,
    next_id: Id,
}

impl Credentials {
    pub fn insert(
        &mut self,
        username: String,
        password_hash: String,
        role: Role,
    ) -> Result<&Credential, StorageError> {
        if self.by_username(&username).is_some() {
            return Err(StorageError::Conflict(format!(
                "Username {} already registered",
                username
            )));
        }

        let id = self.next_id();
        let credential = Credential {
            id,
            username,
            password_hash,
            role,
            is_active: true,
        };

        Ok(self.by_id.entry(id).or_insert(credential))
    }

    pub fn get(&self, id: Id) -> Result<&Credential, StorageError> {
        self.by_id
            .get(&id)
            .ok_or(StorageError::NotFound("User", id))
    }

    pub fn by_username(&self, username: &str) -> Option<&Credential> {
        self.by_id.values().find(|c| c.username == username)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Credential> {
        self.by_id.values()
    }

    pub(super) fn restore(&mut self, credentials: Vec<Credential>) {
        for credential in credentials {
            self.next_id = self.next_id.max(credential.id);
            self.by_id.insert(credential.id, credential);
        }
    }

    fn next_id(&mut self) -> Id {
        self.next_id += 1;
        self.next_id
    }
}
