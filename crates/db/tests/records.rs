// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

mod support;

use capstone_common::{GatewayError, RecordCore, RecordError, VersionedRecord, params};
use capstone_db::CallKind;
use capstone_var::ErrorCode::{E_MISSING_DATA, E_NONE};
use capstone_var::{DateTimeValue, FlagValue, IdValue, QueryState, TypedValue};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use support::{gateway_from, init_logging};

const FACULTY: &str = r#"
responses:
  - query: SELECT * FROM faculty WHERE faculty_id = @FACULTY_ID
    params: { FACULTY_ID: "42" }
    results:
      rows:
        - - { field: faculty_id, value: "42" }
          - { field: name, value: Ada Lovelace }
          - { field: active, value: "Y" }
          - { field: hired, value: "2019-08-15 09:00:00" }
  - query: >
      UPDATE faculty SET name = @NAME, active = @ACTIVE
      WHERE faculty_id = @FACULTY_ID
    results:
      rows_affected: 1
"#;

struct Faculty {
    core: RecordCore,
}

impl Faculty {
    fn new(id: i32) -> Self {
        let mut core = RecordCore::new();
        core.add_primary_key("faculty_id");
        core.set::<IdValue>("faculty_id", &id)
            .expect("faculty id is writable");
        Self { core }
    }

    fn name(&self) -> Option<&str> {
        self.core.text("name")
    }

    fn active(&self) -> bool {
        self.core.get::<FlagValue>("active").unwrap_or_default()
    }
}

impl VersionedRecord for Faculty {
    fn core(&self) -> &RecordCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut RecordCore {
        &mut self.core
    }

    fn fetch_query(&self) -> String {
        "SELECT * FROM faculty WHERE faculty_id = @FACULTY_ID".into()
    }

    fn store_query(&self) -> Option<String> {
        Some("UPDATE faculty SET name = @NAME, active = @ACTIVE\nWHERE faculty_id = @FACULTY_ID".into())
    }
}

#[test]
fn test_fetch_edit_store_and_roll_back() {
    init_logging();
    let (gateway, _fixtures) = gateway_from(FACULTY);
    let mut faculty = Faculty::new(42);

    let results = faculty.fetch(&gateway).unwrap();
    assert_eq!(results.state(), QueryState::Success);
    assert_eq!(faculty.name(), Some("Ada Lovelace"));
    assert!(faculty.active());
    assert_eq!(
        faculty.core().get::<DateTimeValue>("hired").unwrap(),
        NaiveDate::from_ymd_opt(2019, 8, 15)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    );

    faculty.save();
    faculty.core_mut().set_text("name", "A. Lovelace").unwrap();
    faculty.core_mut().set::<FlagValue>("active", &false).unwrap();
    faculty.save();
    assert_eq!(faculty.core().model().value("active"), Some("0"));

    let stored = faculty.store(&gateway).unwrap();
    assert_eq!(stored.rows_affected(), 1);
    assert_eq!(stored.state(), QueryState::Success);

    // Scratch edits after the last save are discarded by a restore.
    faculty.core_mut().set_text("name", "scratch").unwrap();
    faculty.restore();
    assert_eq!(faculty.name(), Some("A. Lovelace"));
    assert_eq!(faculty.history_len(), 1);

    let calls = gateway.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].kind, CallKind::Read);
    assert_eq!(calls[0].params, params([("FACULTY_ID", "42")]));
    assert_eq!(calls[1].kind, CallKind::Write);
    assert_eq!(
        calls[1].query,
        "UPDATE faculty SET name = @NAME, active = @ACTIVE WHERE faculty_id = @FACULTY_ID"
    );
    assert_eq!(calls[1].params.get("NAME").map(String::as_str), Some("A. Lovelace"));
}

#[test]
fn test_fetch_of_unknown_key_fails_quietly() {
    init_logging();
    let (gateway, _fixtures) = gateway_from(FACULTY);
    let mut faculty = Faculty::new(7);

    let results = faculty.fetch(&gateway).unwrap();
    assert_eq!(results.state(), QueryState::Failure);
    assert!(results.is_empty());
    assert_eq!(faculty.name(), None);
    assert_eq!(faculty.core().model().len(), 1);
}

#[test]
fn test_missing_key_never_reaches_gateway() {
    init_logging();
    let (gateway, _fixtures) = gateway_from(FACULTY);
    let mut faculty = Faculty::new(42);
    faculty.core_mut().set_text("faculty_id", "").unwrap();

    let outcome = faculty.try_fetch(&gateway).unwrap();
    assert!(!outcome.fetched());
    assert_eq!(outcome.code, E_MISSING_DATA);
    assert_eq!(outcome.results.state(), QueryState::Error);
    assert!(matches!(
        faculty.store(&gateway),
        Err(RecordError::MissingKey(key)) if key == "FACULTY_ID"
    ));
    assert_eq!(gateway.call_count(), 0);
}

#[test]
fn test_offline_gateway_is_an_error() {
    init_logging();
    let (mut gateway, _fixtures) = gateway_from(FACULTY);
    gateway.set_offline(true);
    let mut faculty = Faculty::new(42);

    assert!(matches!(
        faculty.try_fetch(&gateway),
        Err(GatewayError::Connection(_))
    ));
    let err = faculty.fetch(&gateway).unwrap_err();
    assert!(matches!(err, RecordError::Gateway(_)));

    gateway.set_offline(false);
    let outcome = faculty.try_fetch(&gateway).unwrap();
    assert!(outcome.fetched());
    assert_eq!(outcome.code, E_NONE);
    assert_eq!(faculty.name(), Some("Ada Lovelace"));
}

#[test]
fn test_typed_defaults_for_null_fields() {
    let mut faculty = Faculty::new(42);
    faculty.core_mut().model_mut().add_field("retired");
    assert_eq!(
        faculty.core().get::<DateTimeValue>("retired").unwrap(),
        DateTimeValue::default_value()
    );
    assert_eq!(
        faculty.core().get::<IdValue>("faculty_id").unwrap(),
        42
    );
}
