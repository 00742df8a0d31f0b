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

use resources::credential::Role;

use crate::service::error::RequestError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Patient,
    Doctor,
    Appointment,
    Visit,
}

/// The single source of truth for role-based access. The sets are exact;
/// handlers must not add role logic of their own.
pub fn allowed(role: Role, operation: Operation, resource: Resource) -> bool {
    let roles: &[Role] = match (operation, resource) {
        (Operation::Create, Resource::Patient) => &[Role::Admin, Role::Receptionist, Role::Nurse],
        (Operation::Read, Resource::Patient) => {
            &[Role::Admin, Role::Doctor, Role::Receptionist, Role::Nurse]
        }
        (Operation::Update, Resource::Patient) => &[Role::Admin, Role::Receptionist, Role::Nurse],
        (Operation::Delete, Resource::Patient) => &[Role::Admin],

        (Operation::Create, Resource::Doctor) => &[Role::Admin],
        (Operation::Read, Resource::Doctor) => {
            &[Role::Admin, Role::Doctor, Role::Receptionist, Role::Nurse]
        }
        (Operation::Update, Resource::Doctor) => &[Role::Admin],
        (Operation::Delete, Resource::Doctor) => &[Role::Admin],

        (Operation::Create, Resource::Appointment) => {
            &[Role::Admin, Role::Receptionist, Role::Nurse]
        }
        (Operation::Read, Resource::Appointment) => {
            &[Role::Admin, Role::Doctor, Role::Receptionist, Role::Nurse]
        }
        (Operation::Update, Resource::Appointment) => {
            &[Role::Admin, Role::Receptionist, Role::Nurse]
        }
        (Operation::Delete, Resource::Appointment) => &[Role::Admin],

        (Operation::Create, Resource::Visit) => &[Role::Doctor, Role::Nurse],
        (Operation::Read, Resource::Visit) => &[Role::Admin, Role::Doctor, Role::Nurse],
        (Operation::Update, Resource::Visit) => &[Role::Doctor, Role::Nurse],
        (Operation::Delete, Resource::Visit) => &[Role::Admin],
    };

    roles.contains(&role)
}

pub fn check(role: Role, operation: Operation, resource: Resource) -> Result<(), RequestError> {
    if allowed(role, operation, resource) {
        Ok(())
    } else {
        Err(RequestError::Forbidden(format!(
            "Not authorized to {} {} records",
            operation.name(),
            resource.name()
        )))
    }
}

impl Operation {
    fn name(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Read => "view",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl Resource {
    fn name(&self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Doctor => "doctor",
            Self::Appointment => "appointment",
            Self::Visit => "patient visit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ROLES: [Role; 6] = [
        Role::Admin,
        Role::Doctor,
        Role::Nurse,
        Role::Receptionist,
        Role::Patient,
        Role::Pharmacist,
    ];

    const ALL_OPERATIONS: [Operation; 4] = [
        Operation::Create,
        Operation::Read,
        Operation::Update,
        Operation::Delete,
    ];

    const ALL_RESOURCES: [Resource; 4] = [
        Resource::Patient,
        Resource::Doctor,
        Resource::Appointment,
        Resource::Visit,
    ];

    fn expected(operation: Operation, resource: Resource) -> &'static [Role] {
        match (operation, resource) {
            (Operation::Create, Resource::Doctor)
            | (Operation::Update, Resource::Doctor)
            | (Operation::Delete, _) => &[Role::Admin],

            (Operation::Create, Resource::Visit) | (Operation::Update, Resource::Visit) => {
                &[Role::Doctor, Role::Nurse]
            }

            (Operation::Read, Resource::Visit) => &[Role::Admin, Role::Doctor, Role::Nurse],

            (Operation::Create, _) | (Operation::Update, _) => {
                &[Role::Admin, Role::Receptionist, Role::Nurse]
            }

            (Operation::Read, _) => &[Role::Admin, Role::Doctor, Role::Receptionist, Role::Nurse],
        }
    }

    #[test]
    fn table_matches_the_documented_role_sets() {
        for &operation in &ALL_OPERATIONS {
            for &resource in &ALL_RESOURCES {
                for &role in &ALL_ROLES {
                    assert_eq!(
                        allowed(role, operation, resource),
                        expected(operation, resource).contains(&role),
                        "({:?}, {:?}, {:?})",
                        role,
                        operation,
                        resource
                    );
                }
            }
        }
    }

    #[test]
    fn denied_combinations_fail_with_forbidden() {
        let err = check(Role::Patient, Operation::Read, Resource::Patient).unwrap_err();
        assert!(matches!(err, RequestError::Forbidden(_)));

        let err = check(Role::Receptionist, Operation::Delete, Resource::Visit).unwrap_err();
        assert!(matches!(err, RequestError::Forbidden(_)));

        assert!(check(Role::Admin, Operation::Delete, Resource::Visit).is_ok());
    }

    #[test]
    fn patient_and_pharmacist_roles_have_no_repository_access() {
        for &operation in &ALL_OPERATIONS {
            for &resource in &ALL_RESOURCES {
                assert!(!allowed(Role::Patient, operation, resource));
                assert!(!allowed(Role::Pharmacist, operation, resource));
            }
        }
    }
}
