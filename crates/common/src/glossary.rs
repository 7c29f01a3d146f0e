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

//! Cached lookup tables for small reference datasets (statuses, roles, and the like).
//!
//! Each table is described by a `Glossary` type. A `GlossaryRegistry` populates a table with one
//! bulk read the first time it is asked for it and answers from memory afterwards. The registry is
//! an ordinary value owned by whoever builds it; there is no process-wide instance, and sharing
//! one across threads means wrapping it in a lock.

use crate::gateway::{Gateway, Params};
use crate::model::{RecordCore, RecordError, VersionedRecord};
use capstone_var::ErrorCode::E_UNKNOWN;
use capstone_var::{QueryState, ResultSet, Row, normalize};
use std::any::TypeId;
use std::collections::HashMap;
use std::collections::hash_map::Entry as MapEntry;
use tracing::{debug, warn};

/// Describes one reference table.
pub trait Glossary: 'static {
    const TABLE: &'static str;
    const CODE_FIELD: &'static str = "CODE";
    const NAME_FIELD: &'static str = "NAME";

    /// The bulk query which reads every item.
    fn query() -> String {
        format!("SELECT * FROM {}", Self::TABLE)
    }

    fn params() -> Params {
        Params::new()
    }
}

/// One reference item, backed by its row. The code field is its primary key.
#[derive(Clone, Debug)]
pub struct CodeItem {
    core: RecordCore,
    table: &'static str,
    code_field: &'static str,
    name_field: &'static str,
}

impl CodeItem {
    pub fn from_row<G: Glossary>(row: &Row) -> Self {
        let mut core = RecordCore::with_model(row.clone());
        core.add_primary_key(G::CODE_FIELD);
        Self {
            core,
            table: G::TABLE,
            code_field: G::CODE_FIELD,
            name_field: G::NAME_FIELD,
        }
    }

    pub fn code(&self) -> &str {
        self.core.text(self.code_field).unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.core.text(self.name_field).unwrap_or_default()
    }

    /// Any other column of the item's row.
    pub fn value(&self, field: &str) -> Option<&str> {
        self.core.text(field)
    }

    pub fn has_code(&self, code: &str) -> bool {
        normalize(self.code()) == normalize(code)
    }

    pub fn has_name(&self, name: &str) -> bool {
        normalize(self.name()) == normalize(name)
    }
}

impl VersionedRecord for CodeItem {
    fn core(&self) -> &RecordCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut RecordCore {
        &mut self.core
    }

    /// Written with the canonical `@` placeholder; the gateway binds its own syntax.
    fn fetch_query(&self) -> String {
        format!(
            "SELECT * FROM {} WHERE {} = @{}",
            self.table, self.code_field, self.code_field
        )
    }
}

/// The loaded contents of one reference table.
#[derive(Clone, Debug)]
pub struct CodeGlossary {
    table: &'static str,
    items: Vec<CodeItem>,
    state: QueryState,
}

impl CodeGlossary {
    /// Rows without a code are dropped.
    pub fn from_results<G: Glossary>(results: &ResultSet) -> Self {
        let mut items = Vec::with_capacity(results.len());
        for row in results {
            let item = CodeItem::from_row::<G>(row);
            if !item.core().missing_keys().is_empty() {
                warn!(table = G::TABLE, row = %row, "skipping reference row without a code");
                continue;
            }
            items.push(item);
        }
        Self {
            table: G::TABLE,
            items,
            state: results.state(),
        }
    }

    pub fn table(&self) -> &str {
        self.table
    }

    /// The state of the query which populated this glossary.
    pub fn state(&self) -> QueryState {
        self.state
    }

    pub fn items(&self) -> &[CodeItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(CodeItem::code)
    }

    pub fn find(&self, code: &str) -> Option<&CodeItem> {
        self.items.iter().find(|item| item.has_code(code))
    }

    pub fn find_by_name(&self, name: &str) -> Option<&CodeItem> {
        self.items.iter().find(|item| item.has_name(name))
    }
}

/// Glossaries by type, each populated on first use.
#[derive(Debug, Default)]
pub struct GlossaryRegistry {
    glossaries: HashMap<TypeId, CodeGlossary>,
}

impl GlossaryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The glossary for `G`, reading it through `gateway` if this registry hasn't yet.
    ///
    /// A result the gateway marked as an error is reported and not cached, so the next call tries
    /// again. An empty result is cached like any other.
    pub fn glossary<G: Glossary>(
        &mut self,
        gateway: &dyn Gateway,
    ) -> Result<&CodeGlossary, RecordError> {
        match self.glossaries.entry(TypeId::of::<G>()) {
            MapEntry::Occupied(cached) => Ok(cached.into_mut()),
            MapEntry::Vacant(slot) => {
                let glossary = Self::populate::<G>(gateway)?;
                Ok(slot.insert(glossary))
            }
        }
    }

    /// The glossary for `G` if it has already been populated.
    pub fn cached<G: Glossary>(&self) -> Option<&CodeGlossary> {
        self.glossaries.get(&TypeId::of::<G>())
    }

    /// Forget `G`'s glossary so the next access reads it again.
    pub fn invalidate<G: Glossary>(&mut self) -> bool {
        self.glossaries.remove(&TypeId::of::<G>()).is_some()
    }

    pub fn len(&self) -> usize {
        self.glossaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glossaries.is_empty()
    }

    fn populate<G: Glossary>(gateway: &dyn Gateway) -> Result<CodeGlossary, RecordError> {
        let query = G::query();
        let params = G::params();
        debug!(table = G::TABLE, query = %query, "populating glossary");
        let mut results = gateway.read(&query, &params)?;
        match results.state() {
            QueryState::Error => {
                return Err(RecordError::Structural(E_UNKNOWN.with_msg(|| {
                    format!("reading reference table {} failed", G::TABLE)
                })));
            }
            QueryState::Null if results.is_empty() => results.fail(),
            QueryState::Null => results.pass(),
            QueryState::Failure | QueryState::Success => {}
        }
        let glossary = CodeGlossary::from_results::<G>(&results);
        debug!(table = G::TABLE, items = glossary.len(), "glossary populated");
        Ok(glossary)
    }
}
