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

use crate::entry::Entry;
use crate::row::Row;
use crate::traits::ReadOnly;
use crate::{Error, ErrorCode::E_RANGE, ErrorCode::E_READONLY};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::Index;
use strum::{Display, EnumString};

/// `rows_affected` before anything has run.
pub const ROWS_AFFECTED_UNKNOWN: i64 = -1;

/// The outcome of one query execution. `Null` is the initial state; each of the others is set
/// directly by a single terminal call, with no guard on where it came from.
#[derive(
    Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryState {
    #[default]
    Null,
    Error,
    Failure,
    Success,
}

/// Rows produced by one query, plus the query text, the affected-row count, and how it went.
///
/// Like `Row` and `Entry`, a clone is always editable.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    rows: Vec<Row>,
    #[serde(default = "unknown_rows_affected")]
    rows_affected: i64,
    #[serde(default, deserialize_with = "deserialize_query")]
    query: String,
    #[serde(default)]
    state: QueryState,
    #[serde(skip)]
    readonly: bool,
}

fn unknown_rows_affected() -> i64 {
    ROWS_AFFECTED_UNKNOWN
}

fn deserialize_query<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_query(&raw))
}

/// Trim, and collapse every line break to a single space.
pub fn normalize_query(query: &str) -> String {
    query
        .trim()
        .replace("\r\n", " ")
        .replace(['\r', '\n'], " ")
}

impl Default for ResultSet {
    fn default() -> Self {
        Self::new("")
    }
}

impl ResultSet {
    pub fn new(query: &str) -> Self {
        Self {
            rows: vec![],
            rows_affected: ROWS_AFFECTED_UNKNOWN,
            query: normalize_query(query),
            state: QueryState::Null,
            readonly: false,
        }
    }

    pub fn with_rows(query: &str, rows: Vec<Row>) -> Self {
        let mut results = Self::new(query);
        results.rows = rows;
        results
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = normalize_query(query);
    }

    pub fn state(&self) -> QueryState {
        self.state
    }

    pub fn pass(&mut self) {
        self.state = QueryState::Success;
    }

    pub fn fail(&mut self) {
        self.state = QueryState::Failure;
    }

    pub fn error(&mut self) {
        self.state = QueryState::Error;
    }

    pub fn is_success(&self) -> bool {
        self.state == QueryState::Success
    }

    pub fn rows_affected(&self) -> i64 {
        self.rows_affected
    }

    pub fn set_rows_affected(&mut self, rows_affected: i64) {
        self.rows_affected = rows_affected;
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// The union of every row's fields, in first-seen order.
    ///
    /// A row is only scanned when its field count differs from the fields gathered so far, so a
    /// later row with the same number of fields but different names contributes nothing. Callers
    /// that mix schemas must not rely on this for a complete field list.
    pub fn fields(&self) -> Vec<String> {
        let Some(first) = self.rows.first() else {
            return vec![];
        };
        let mut fields = first.fields().to_vec();
        for row in &self.rows[1..] {
            if row.len() == fields.len() {
                continue;
            }
            for field in row.fields() {
                if !fields.contains(field) {
                    fields.push(field.clone());
                }
            }
        }
        fields
    }

    pub fn row(&self, row: usize) -> Option<&Row> {
        self.rows.get(row)
    }

    pub fn row_mut(&mut self, row: usize) -> Option<&mut Row> {
        if self.readonly {
            return None;
        }
        self.rows.get_mut(row)
    }

    pub fn first_row(&self) -> Option<&Row> {
        self.rows.first()
    }

    pub fn entry(&self, row: usize, field_index: usize) -> Option<&Entry> {
        self.row(row)?.get(field_index)
    }

    pub fn entry_named(&self, row: usize, field: &str) -> Option<&Entry> {
        self.row(row)?.entry(field)
    }

    /// Every entry for `field`, in row order.
    ///
    /// Expects all rows to share the schema of the first row; a row lacking the field is skipped.
    pub fn get_entries(&self, field: &str) -> Vec<&Entry> {
        self.rows.iter().filter_map(|row| row.entry(field)).collect()
    }

    pub fn get_values(&self, field: &str) -> Vec<&str> {
        self.get_entries(field).into_iter().map(Entry::value).collect()
    }

    /// Append a row, returning it for further editing. `None` if readonly.
    pub fn add_row(&mut self, row: Row) -> Option<&mut Row> {
        if self.readonly {
            return None;
        }
        self.rows.push(row);
        self.rows.last_mut()
    }

    pub fn insert_row(&mut self, index: usize, row: Row) -> Option<&mut Row> {
        if self.readonly || index > self.rows.len() {
            return None;
        }
        self.rows.insert(index, row);
        self.rows.get_mut(index)
    }

    /// Replace the row at `index`, returning the one it displaced.
    pub fn set_row(&mut self, index: usize, row: Row) -> Option<Row> {
        if self.readonly {
            return None;
        }
        let slot = self.rows.get_mut(index)?;
        Some(std::mem::replace(slot, row))
    }

    pub fn remove_row(&mut self, index: usize) -> Option<Row> {
        if self.readonly || index >= self.rows.len() {
            return None;
        }
        Some(self.rows.remove(index))
    }

    /// Drop every row. Returns how many there were, or `None` if readonly.
    pub fn clear(&mut self) -> Option<usize> {
        if self.readonly {
            return None;
        }
        let count = self.rows.len();
        self.rows.clear();
        Some(count)
    }

    /// Direct positional read; a bad index is an error rather than `None`.
    pub fn get_item(&self, index: usize) -> Result<&Row, Error> {
        let len = self.rows.len();
        self.rows
            .get(index)
            .ok_or_else(|| E_RANGE.with_msg(|| format!("row index {index} out of {len}")))
    }

    /// Direct positional write; a bad index is an error rather than `None`.
    pub fn set_item(&mut self, index: usize, row: Row) -> Result<(), Error> {
        if self.readonly {
            return Err(E_READONLY.msg("result set is readonly"));
        }
        let len = self.rows.len();
        let slot = self
            .rows
            .get_mut(index)
            .ok_or_else(|| E_RANGE.with_msg(|| format!("row index {index} out of {len}")))?;
        *slot = row;
        Ok(())
    }
}

impl Clone for ResultSet {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
            rows_affected: self.rows_affected,
            query: self.query.clone(),
            state: self.state,
            readonly: false,
        }
    }
}

impl ReadOnly for ResultSet {
    fn is_readonly(&self) -> bool {
        self.readonly
    }

    fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
    }
}

impl Index<usize> for ResultSet {
    type Output = Row;

    fn index(&self, index: usize) -> &Self::Output {
        &self.rows[index]
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl PartialEq for ResultSet {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl Eq for ResultSet {}

impl Ord for ResultSet {
    /// Row count first, then the first pair of rows that differ.
    fn cmp(&self, other: &Self) -> Ordering {
        self.rows
            .len()
            .cmp(&other.rows.len())
            .then_with(|| {
                self.rows
                    .iter()
                    .zip(other.rows.iter())
                    .map(|(l, r)| l.cmp(r))
                    .find(|o| o.is_ne())
                    .unwrap_or(Ordering::Equal)
            })
    }
}

impl PartialOrd for ResultSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
