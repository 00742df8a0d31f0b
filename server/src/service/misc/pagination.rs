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

use super::from_query::{FromQuery, QueryValue};

/// Window into an id-ordered listing. Offsets are not stable under
/// concurrent writes between pages.
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 100,
        }
    }
}

impl FromQuery for Pagination {
    fn parse_key_value_pair(&mut self, key: &str, value: QueryValue) -> Result<(), String> {
        match key {
            "offset" => self.offset = value.ok()?.parse().map_err(|_| "Invalid offset!")?,
            "limit" => self.limit = value.ok()?.parse().map_err(|_| "Invalid limit!")?,
            _ => (),
        }

        Ok(())
    }
}
