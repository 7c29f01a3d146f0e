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

use crate::normalize::normalize;
use crate::traits::{Nullable, ReadOnly};
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

/// The wire sentinel for an absent value.
pub const NULL_VALUE: &str = "NULL";

/// A single field/value pair. The field is always stored normalized (trimmed, uppercased).
///
/// A readonly entry ignores every mutator. Cloning an entry yields an editable copy.
#[derive(Debug, Serialize, Deserialize)]
pub struct Entry {
    #[serde(deserialize_with = "deserialize_field")]
    field: String,
    value: String,
    #[serde(skip)]
    readonly: bool,
}

fn deserialize_field<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(normalize(&raw))
}

impl Entry {
    pub fn new(field: &str, value: &str) -> Self {
        Self {
            field: normalize(field),
            value: value.to_string(),
            readonly: false,
        }
    }

    /// An entry for `field` holding the null sentinel.
    pub fn null(field: &str) -> Self {
        Self::new(field, NULL_VALUE)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn data(&self) -> (&str, &str) {
        (&self.field, &self.value)
    }

    pub fn set_field(&mut self, field: &str) -> &mut Self {
        if !self.readonly {
            self.field = normalize(field);
        }
        self
    }

    pub fn set_value(&mut self, value: &str) -> &mut Self {
        if !self.readonly {
            self.value = value.to_string();
        }
        self
    }

    pub fn set_data(&mut self, field: &str, value: &str) -> &mut Self {
        self.set_field(field).set_value(value)
    }

    /// True iff `key`, once normalized, names this entry's field.
    pub fn has_field(&self, key: &str) -> bool {
        normalize(key) == self.field
    }

    /// Exact, case-sensitive value match.
    pub fn has_value(&self, value: &str) -> bool {
        self.value == value
    }
}

impl Nullable for Entry {
    fn is_null(&self) -> bool {
        self.field.is_empty() || self.value == NULL_VALUE
    }

    /// Sets the value to the null sentinel; the field is left alone.
    fn make_null(&mut self) {
        self.set_value(NULL_VALUE);
    }
}

impl ReadOnly for Entry {
    fn is_readonly(&self) -> bool {
        self.readonly
    }

    fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
    }
}

impl Clone for Entry {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            value: self.value.clone(),
            readonly: false,
        }
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.value == other.value
    }
}

impl Eq for Entry {}

impl Hash for Entry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.field.hash(state);
        self.value.hash(state);
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.field
            .cmp(&other.field)
            .then_with(|| self.value.cmp(&other.value))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.field, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode::E_TYPE;
    use crate::traits::DynCompare;

    #[test]
    fn test_field_is_normalized() {
        let e = Entry::new(" userId ", "42");
        assert_eq!(e.field(), "USERID");
        assert!(e.has_field("userid"));
        assert!(e.has_field(" USERID "));
        assert!(!e.has_field("user"));
    }

    #[test]
    fn test_has_value_is_case_sensitive() {
        let e = Entry::new("name", "Admin");
        assert!(e.has_value("Admin"));
        assert!(!e.has_value("admin"));
    }

    #[test]
    fn test_null_semantics() {
        assert!(Entry::null("code").is_null());
        assert!(Entry::new("", "value").is_null());
        assert!(!Entry::new("code", "").is_null());

        let mut e = Entry::new("code", "A1");
        e.make_null();
        assert!(e.is_null());
        assert_eq!(e.field(), "CODE");
        assert_eq!(e.value(), NULL_VALUE);
    }

    #[test]
    fn test_readonly_ignores_mutation() {
        let mut e = Entry::new("code", "A1");
        e.set_readonly(true);
        e.set_value("B2").set_field("other");
        e.make_null();
        assert_eq!(e.data(), ("CODE", "A1"));
    }

    #[test]
    fn test_clone_is_editable() {
        let mut e = Entry::new("code", "A1");
        e.set_readonly(true);
        let mut c = e.clone();
        assert!(!c.is_readonly());
        c.set_value("B2");
        assert_eq!(c.value(), "B2");
        assert_eq!(e.value(), "A1");
    }

    #[test]
    fn test_ordering_by_field_then_value() {
        let a1 = Entry::new("a", "1");
        let a2 = Entry::new("a", "2");
        let b0 = Entry::new("b", "0");
        assert!(a1 < a2);
        assert!(a2 < b0);
        assert_eq!(a1, Entry::new("A", "1"));
        assert_ne!(a1, Entry::new("A", "1 "));
    }

    #[test]
    fn test_compare_against_other_type_fails() {
        let e = Entry::new("a", "1");
        assert_eq!(e.compare_dyn(&Entry::new("a", "1")), Ok(Ordering::Equal));
        assert_eq!(e.compare_dyn(&17i32).unwrap_err(), E_TYPE);
        assert_eq!(e.equals_dyn(&"a=1").unwrap_err(), E_TYPE);
    }

    #[test]
    fn test_deserialize_normalizes_field() {
        let e: Entry = serde_json::from_str(r#"{"field":" name ","value":"Chair"}"#).unwrap();
        assert_eq!(e.data(), ("NAME", "Chair"));
        assert!(!e.is_readonly());
    }
}
