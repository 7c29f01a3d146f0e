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
use crate::normalize::{normalize, normalized_field};
use crate::traits::{Nullable, ReadOnly};
use crate::{Error, ErrorCode::E_RANGE};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::ops::Index;

/// An ordered collection of entries, indexed both by position and by (normalized) field name.
///
/// `fields` and `entries` are parallel: `fields[i] == entries[i].field()` and both always have
/// the same length. Field names are unique and never blank. Entries are only ever handed out
/// by shared reference; renaming goes through `rename_field` so both vectors stay in step.
///
/// Removal is deliberately asymmetric:
///   * `remove_field*` drops the field and its entry, so `len()` shrinks.
///   * `remove_entry*` keeps the field, nulls its entry in place, and hands back a copy of what
///     was there, so `len()` is unchanged.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Entry>", into = "Vec<Entry>")]
pub struct Row {
    fields: Vec<String>,
    entries: Vec<Entry>,
    readonly: bool,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.fields
            .iter()
            .map(String::as_str)
            .zip(self.entries.iter())
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        let name = normalize(name);
        self.fields.iter().position(|f| *f == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Append `name` with a null entry. Returns the new index, or `None` if the name is blank,
    /// already present, or the row is readonly.
    pub fn add_field(&mut self, name: &str) -> Option<usize> {
        let index = self.len();
        self.insert_field(index, name)
    }

    /// Append a copy of `entry`. Its field must not already be present.
    pub fn add_entry(&mut self, entry: &Entry) -> Option<usize> {
        let index = self.len();
        self.insert_entry(index, entry)
    }

    /// Insert `name` with a null entry at `index`, shifting later fields right.
    pub fn insert_field(&mut self, index: usize, name: &str) -> Option<usize> {
        if self.readonly || index > self.len() {
            return None;
        }
        let field = normalized_field(name)?;
        if self.fields.contains(&field) {
            return None;
        }
        self.entries.insert(index, Entry::null(&field));
        self.fields.insert(index, field);
        Some(index)
    }

    pub fn insert_entry(&mut self, index: usize, entry: &Entry) -> Option<usize> {
        let index = self.insert_field(index, entry.field())?;
        self.entries[index].set_value(entry.value());
        Some(index)
    }

    /// Remove the field at `index` together with its entry.
    pub fn remove_field(&mut self, index: usize) -> Option<Entry> {
        if self.readonly || index >= self.len() {
            return None;
        }
        self.fields.remove(index);
        Some(self.entries.remove(index))
    }

    pub fn remove_field_named(&mut self, name: &str) -> Option<Entry> {
        let index = self.index_of(name)?;
        self.remove_field(index)
    }

    /// Null the entry at `index`, keeping its field. Returns a copy of the entry as it was, or
    /// `None` if nothing was nulled.
    pub fn remove_entry(&mut self, index: usize) -> Option<Entry> {
        if self.readonly {
            return None;
        }
        let entry = self.entries.get_mut(index)?;
        if entry.is_readonly() {
            return None;
        }
        let previous = entry.clone();
        entry.make_null();
        Some(previous)
    }

    pub fn remove_entry_named(&mut self, name: &str) -> Option<Entry> {
        let index = self.index_of(name)?;
        self.remove_entry(index)
    }

    /// Null the stored entry equal to `entry`, if there is one.
    pub fn remove_entry_matching(&mut self, entry: &Entry) -> Option<Entry> {
        let index = self.entries.iter().position(|e| e == entry)?;
        self.remove_entry(index)
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Positional access which reports a bad index instead of panicking like `row[i]` does.
    pub fn try_entry_at(&self, index: usize) -> Result<&Entry, Error> {
        let len = self.len();
        self.entries
            .get(index)
            .ok_or_else(|| E_RANGE.with_msg(|| format!("entry index {index} out of {len}")))
    }

    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.index_of(name).map(|i| &self.entries[i])
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.entry(name).map(Entry::value)
    }

    /// Write `value` into an existing field. Returns `None` when the field is absent or the
    /// write was refused because the row or entry is readonly.
    pub fn set_value(&mut self, name: &str, value: &str) -> Option<&Entry> {
        if self.readonly {
            return None;
        }
        let index = self.index_of(name)?;
        let entry = &mut self.entries[index];
        if entry.is_readonly() {
            return None;
        }
        entry.set_value(value);
        Some(&*entry)
    }

    /// Rename the field at `index`, keeping its value. `None` if the new name is blank, names
    /// another field already present, or the row is readonly.
    pub fn rename_field(&mut self, index: usize, name: &str) -> Option<usize> {
        if self.readonly || index >= self.len() {
            return None;
        }
        let field = normalized_field(name)?;
        if let Some(existing) = self.fields.iter().position(|f| *f == field) {
            return (existing == index).then_some(index);
        }
        let entry = &mut self.entries[index];
        if entry.is_readonly() {
            return None;
        }
        entry.set_field(&field);
        self.fields[index] = field;
        Some(index)
    }

    /// Copies of the entries in `start..start + count`. Positions past the end are skipped.
    /// A start of zero yields nothing.
    pub fn get_range(&self, start: usize, count: usize) -> Vec<Entry> {
        if start == 0 {
            return vec![];
        }
        (start..start.saturating_add(count))
            .map_while(|i| self.entries.get(i))
            .cloned()
            .collect()
    }

    /// Copies of the named entries, in the order given. Absent names are skipped.
    pub fn get_range_named<S: AsRef<str>>(&self, names: &[S]) -> Vec<Entry> {
        names
            .iter()
            .filter_map(|name| self.entry(name.as_ref()))
            .cloned()
            .collect()
    }

    /// As `get_range`, but as a new row.
    pub fn get_row_range(&self, start: usize, count: usize) -> Row {
        self.get_range(start, count).into_iter().collect()
    }

    /// A new row holding the named fields, in the order given. A name absent from this row is
    /// still added to the result, as a null field.
    pub fn get_row_range_named<S: AsRef<str>>(&self, names: &[S]) -> Row {
        let mut row = Row::new();
        for name in names {
            let name = name.as_ref();
            match self.entry(name) {
                Some(entry) => row.add_entry(entry),
                None => row.add_field(name),
            };
        }
        row
    }
}

impl ReadOnly for Row {
    fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// Applies to the row's structure and to every entry in it.
    fn set_readonly(&mut self, readonly: bool) {
        self.readonly = readonly;
        for entry in &mut self.entries {
            entry.set_readonly(readonly);
        }
    }
}

impl Clone for Row {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            entries: self.entries.iter().map(Entry::clone).collect(),
            readonly: false,
        }
    }
}

impl FromIterator<Entry> for Row {
    /// Entries whose field is blank or already present are dropped.
    fn from_iter<T: IntoIterator<Item = Entry>>(iter: T) -> Self {
        let mut row = Row::new();
        for entry in iter {
            row.add_entry(&entry);
        }
        row
    }
}

impl From<Vec<Entry>> for Row {
    fn from(entries: Vec<Entry>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<Row> for Vec<Entry> {
    fn from(row: Row) -> Self {
        row.entries
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Index<usize> for Row {
    type Output = Entry;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index]
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.fields == other.fields
            && self.entries == other.entries
    }
}

impl Eq for Row {}

impl Ord for Row {
    /// Field count first, then each field name in order, then each entry in order.
    fn cmp(&self, other: &Self) -> Ordering {
        self.len()
            .cmp(&other.len())
            .then_with(|| self.fields.cmp(&other.fields))
            .then_with(|| self.entries.cmp(&other.entries))
    }
}

impl PartialOrd for Row {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{entry}")?;
        }
        write!(f, "}}")
    }
}
