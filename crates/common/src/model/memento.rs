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

use capstone_var::{ReadOnly, Row, normalized_field};
use imbl::Vector;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// A field flagged as one component of a record's (possibly composite) primary key.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PrimaryKey {
    field: String,
}

impl PrimaryKey {
    /// `None` if `field` is blank.
    pub fn new(field: &str) -> Option<Self> {
        normalized_field(field).map(|field| Self { field })
    }

    pub fn field(&self) -> &str {
        &self.field
    }
}

/// The snapshot stack. Persistent, so copying it into each snapshot shares structure instead of
/// duplicating it.
pub type History = Vector<Memento>;

struct Snapshot {
    row: Row,
    primary_keys: Vec<PrimaryKey>,
    history: History,
}

/// An immutable snapshot of a record: its row (marked readonly), its primary keys, and the
/// history as it stood when the snapshot was taken.
///
/// A memento owns everything it refers to. Nothing in it can be reached mutably once built.
#[derive(Clone)]
pub struct Memento(Arc<Snapshot>);

impl Memento {
    pub(crate) fn snapshot(row: &Row, primary_keys: &[PrimaryKey], history: History) -> Self {
        let mut row = row.clone();
        row.set_readonly(true);
        Self(Arc::new(Snapshot {
            row,
            primary_keys: primary_keys.to_vec(),
            history,
        }))
    }

    pub fn row(&self) -> &Row {
        &self.0.row
    }

    pub fn primary_keys(&self) -> &[PrimaryKey] {
        &self.0.primary_keys
    }

    pub fn history(&self) -> &History {
        &self.0.history
    }

    /// True if both handles refer to the same snapshot.
    pub fn ptr_eq(&self, other: &Memento) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Debug for Memento {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memento")
            .field("row", &self.0.row)
            .field("primary_keys", &self.0.primary_keys)
            .field("history_len", &self.0.history.len())
            .finish()
    }
}
