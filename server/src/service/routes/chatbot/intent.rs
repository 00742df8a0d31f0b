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

use resources::misc::Id;

/// The closed set of queries the chatbot understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    PatientDetails,
    ListPatients,
    DoctorDetails,
    ListDoctors,
    PatientAppointments,
    PatientVisitHistory,
    Greeting,
    Unknown,
}

/// Keyword matcher over the lowercased query. The rules are ordered and
/// the first match wins, so a query naming both an id and appointments
/// resolves to `PatientDetails`. Kept as a pure function so a real
/// classifier can replace it without touching authorization or
/// formatting.
pub fn classify(query: &str) -> Intent {
    let q = query.to_lowercase();

    if q.contains("patient") && (q.contains("id") || q.contains("details")) {
        Intent::PatientDetails
    } else if q.contains("all patients") || q.contains("list patients") {
        Intent::ListPatients
    } else if q.contains("doctor") && (q.contains("id") || q.contains("details")) {
        Intent::DoctorDetails
    } else if q.contains("all doctors") || q.contains("list doctors") {
        Intent::ListDoctors
    } else if q.contains("patient") && q.contains("appointments") {
        Intent::PatientAppointments
    } else if q.contains("patient")
        && (q.contains("visit history") || q.contains("medical records") || q.contains("ehr"))
    {
        Intent::PatientVisitHistory
    } else if q.contains("hello") || q.contains("hi") {
        Intent::Greeting
    } else {
        Intent::Unknown
    }
}

/// Concatenates every decimal digit in the query and parses the run as
/// one id.
pub fn extract_id(query: &str) -> Option<Id> {
    let digits = query
        .chars()
        .filter(char::is_ascii_digit)
        .collect::<String>();

    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_the_documented_intents() {
        assert_eq!(
            classify("What are the details for patient ID 1?"),
            Intent::PatientDetails
        );
        assert_eq!(classify("list patients please"), Intent::ListPatients);
        assert_eq!(classify("Show all patients"), Intent::ListPatients);
        assert_eq!(
            classify("details for doctor 3"),
            Intent::DoctorDetails
        );
        assert_eq!(classify("list doctors"), Intent::ListDoctors);
        assert_eq!(
            classify("Show appointments for patient 1"),
            Intent::PatientAppointments
        );
        assert_eq!(
            classify("show medical records for patient 2"),
            Intent::PatientVisitHistory
        );
        assert_eq!(
            classify("patient 2 ehr please"),
            Intent::PatientVisitHistory
        );
        assert_eq!(classify("hello"), Intent::Greeting);
        assert_eq!(classify("what is the weather"), Intent::Unknown);
    }

    #[test]
    fn matching_is_ordered_and_first_match_wins() {
        // "id" takes the query into the details rule even though it also
        // mentions appointments
        assert_eq!(
            classify("Show appointments for patient ID 1"),
            Intent::PatientDetails
        );

        // doctor details outranks the list rule
        assert_eq!(
            classify("list doctors with details of doctor id 2"),
            Intent::DoctorDetails
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            classify("DETAILS FOR PATIENT ID 7"),
            Intent::PatientDetails
        );
        assert_eq!(classify("HELLO"), Intent::Greeting);
    }

    #[test]
    fn extracts_the_digit_run() {
        assert_eq!(extract_id("details for patient id 1"), Some(1));
        assert_eq!(extract_id("patient 12 and 3"), Some(123));
        assert_eq!(extract_id("no digits here"), None);
        assert_eq!(extract_id(""), None);
    }
}
