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

use capstone_common::{Glossary, GlossaryRegistry, RecordError, VersionedRecord, params};
use capstone_db::{DatabaseConfig, MemoryGateway};
use capstone_var::ErrorCode::E_UNKNOWN;
use capstone_var::{Entry, QueryState, ResultSet, Row};
use pretty_assertions::assert_eq;
use support::{gateway_from, init_logging};

struct Roles;

impl Glossary for Roles {
    const TABLE: &'static str = "role";
}

struct Terms;

impl Glossary for Terms {
    const TABLE: &'static str = "term";
    const CODE_FIELD: &'static str = "TERM_CODE";
    const NAME_FIELD: &'static str = "DESCRIPTION";
}

const REFERENCE_TABLES: &str = r#"
responses:
  - query: SELECT * FROM role
    results:
      rows:
        - - { field: code, value: "1" }
          - { field: name, value: Admin }
        - - { field: code, value: "2" }
          - { field: name, value: Chair }
  - query: SELECT * FROM term
    results:
      state: ERROR
"#;

fn role_row(code: &str, name: &str) -> Row {
    vec![Entry::new("code", code), Entry::new("name", name)].into()
}

#[test]
fn test_roles_read_once() {
    init_logging();
    let (gateway, _fixtures) = gateway_from(REFERENCE_TABLES);
    let mut registry = GlossaryRegistry::new();

    let roles = registry.glossary::<Roles>(&gateway).unwrap();
    assert_eq!(roles.state(), QueryState::Success);
    assert_eq!(roles.codes().collect::<Vec<_>>(), vec!["1", "2"]);
    assert_eq!(roles.find("2").map(|r| r.name()), Some("Chair"));
    assert_eq!(roles.find_by_name(" admin ").map(|r| r.code()), Some("1"));

    registry.glossary::<Roles>(&gateway).unwrap();
    assert_eq!(gateway.call_count(), 1);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_failed_table_is_retried() {
    init_logging();
    let (gateway, _fixtures) = gateway_from(REFERENCE_TABLES);
    let mut registry = GlossaryRegistry::new();

    let err = registry.glossary::<Terms>(&gateway).unwrap_err();
    assert!(matches!(err, RecordError::Structural(_)));
    assert_eq!(err.code(), E_UNKNOWN);
    assert!(registry.cached::<Terms>().is_none());

    assert!(registry.glossary::<Terms>(&gateway).is_err());
    assert_eq!(gateway.call_count(), 2);
}

#[test]
fn test_unknown_table_caches_empty() {
    init_logging();
    let gateway = MemoryGateway::new(DatabaseConfig::default());
    let mut registry = GlossaryRegistry::new();

    struct Buildings;
    impl Glossary for Buildings {
        const TABLE: &'static str = "building";
    }

    let buildings = registry.glossary::<Buildings>(&gateway).unwrap();
    assert!(buildings.is_empty());
    assert_eq!(buildings.state(), QueryState::Failure);
    assert!(registry.invalidate::<Buildings>());
    assert!(registry.is_empty());
}

#[test]
fn test_code_item_refetches_itself() {
    init_logging();
    let mut gateway = MemoryGateway::new(DatabaseConfig::default());
    gateway.respond(
        "SELECT * FROM role",
        ResultSet::with_rows("", vec![role_row("1", "Admin"), role_row("2", "Chair")]),
    );
    gateway.respond_with_params(
        "SELECT * FROM role WHERE CODE = @CODE",
        params([("CODE", "2")]),
        ResultSet::with_rows("", vec![role_row("2", "Department Chair")]),
    );

    let mut registry = GlossaryRegistry::new();
    let mut chair = registry
        .glossary::<Roles>(&gateway)
        .unwrap()
        .find("2")
        .cloned()
        .unwrap();
    chair.save();

    chair.fetch(&gateway).unwrap();
    assert_eq!(chair.name(), "Department Chair");

    chair.restore();
    assert_eq!(chair.name(), "Department Chair");
    assert_eq!(chair.history_len(), 1);
}

#[test]
fn test_code_item_binds_configured_prefix() {
    init_logging();
    let config = DatabaseConfig {
        parameter_prefix: "?".into(),
        ..Default::default()
    };
    let mut gateway = MemoryGateway::new(config);
    gateway.respond(
        "SELECT * FROM role",
        ResultSet::with_rows("", vec![role_row("1", "Admin")]),
    );
    gateway.respond_with_params(
        "SELECT * FROM role WHERE CODE = ?CODE",
        params([("CODE", "1")]),
        ResultSet::with_rows("", vec![role_row("1", "Administrator")]),
    );

    let mut registry = GlossaryRegistry::new();
    let mut admin = registry
        .glossary::<Roles>(&gateway)
        .unwrap()
        .find("1")
        .cloned()
        .unwrap();
    let results = admin.fetch(&gateway).unwrap();
    assert_eq!(results.state(), QueryState::Success);
    assert_eq!(admin.name(), "Administrator");
    assert_eq!(gateway.calls()[1].query, "SELECT * FROM role WHERE CODE = ?CODE");
}
