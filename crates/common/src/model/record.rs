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

use crate::gateway::{Gateway, GatewayError, Params};
use crate::model::RecordError;
use crate::model::memento::{History, Memento, PrimaryKey};
use capstone_var::ErrorCode::{E_INVARG, E_MISSING_DATA, E_NONE};
use capstone_var::{
    Entry, Error, ErrorCode, Nullable, QueryState, ResultSet, Row, TypedValue, normalize,
};
use tracing::{debug, trace, warn};

/// The state every versioned record carries: its row, which of the row's fields form the primary
/// key, and the stack of snapshots taken so far.
#[derive(Clone, Debug, Default)]
pub struct RecordCore {
    model: Row,
    primary_keys: Vec<PrimaryKey>,
    history: History,
}

impl RecordCore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(model: Row) -> Self {
        Self {
            model,
            ..Self::default()
        }
    }

    pub fn model(&self) -> &Row {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut Row {
        &mut self.model
    }

    pub fn primary_keys(&self) -> &[PrimaryKey] {
        &self.primary_keys
    }

    /// Flag `field` as part of the primary key, adding it to the row as null if it isn't there.
    /// Returns false for a blank or already-flagged field.
    pub fn add_primary_key(&mut self, field: &str) -> bool {
        let Some(key) = PrimaryKey::new(field) else {
            return false;
        };
        if self.primary_keys.contains(&key) {
            return false;
        }
        if !self.model.has_field(key.field()) {
            self.model.add_field(key.field());
        }
        self.primary_keys.push(key);
        true
    }

    pub fn is_primary_key(&self, field: &str) -> bool {
        let field = normalize(field);
        self.primary_keys.iter().any(|k| k.field() == field)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Push a snapshot of the current state. The snapshot's own history is the stack as it was
    /// before this push.
    pub fn save(&mut self) -> Memento {
        let memento = Memento::snapshot(&self.model, &self.primary_keys, self.history.clone());
        self.history.push_back(memento.clone());
        trace!(depth = self.history.len(), "pushed snapshot");
        memento
    }

    /// Pop the newest snapshot and load it. The last remaining snapshot is never popped: it is
    /// returned as-is and the current state is left alone.
    pub fn restore(&mut self) -> Option<Memento> {
        match self.history.len() {
            0 => None,
            1 => {
                warn!("restore at the bottom of the history; keeping current state");
                self.history.back().cloned()
            }
            _ => {
                let memento = self.history.pop_back()?;
                self.load(&memento);
                trace!(depth = self.history.len(), "restored snapshot");
                Some(memento)
            }
        }
    }

    /// Replace row, keys and history wholesale with the snapshot's.
    pub fn load(&mut self, memento: &Memento) {
        self.model = memento.row().clone();
        self.primary_keys = memento.primary_keys().to_vec();
        self.history = memento.history().clone();
    }

    /// Every flagged key whose entry is absent, null or blank.
    pub fn missing_keys(&self) -> Vec<&str> {
        self.primary_keys
            .iter()
            .map(PrimaryKey::field)
            .filter(|field| match self.model.entry(field) {
                Some(entry) => entry.is_null() || entry.value().trim().is_empty(),
                None => true,
            })
            .collect()
    }

    pub fn validate_keys(&self) -> Result<(), RecordError> {
        match self.missing_keys().first() {
            Some(field) => Err(RecordError::MissingKey(field.to_string())),
            None => Ok(()),
        }
    }

    /// The primary key fields bound to their current values.
    pub fn key_params(&self) -> Params {
        self.primary_keys
            .iter()
            .filter_map(|k| {
                self.model
                    .value(k.field())
                    .map(|v| (k.field().to_string(), v.to_string()))
            })
            .collect()
    }

    /// Every field of the row bound to its current value.
    pub fn model_params(&self) -> Params {
        self.model
            .iter()
            .map(|(f, e)| (f.to_string(), e.value().to_string()))
            .collect()
    }

    /// Copy every non-key field of the first result row into the model, adding fields the model
    /// lacks. Key fields are never overwritten.
    ///
    /// Results the gateway already marked as failed or errored are left alone. A result still in
    /// `Null` is resolved here: `Success` if it had a row, `Failure` if not. Returns whether
    /// anything was copied.
    pub fn set_results(&mut self, results: &mut ResultSet) -> bool {
        if matches!(results.state(), QueryState::Error | QueryState::Failure) {
            return false;
        }
        let copied = match results.first_row() {
            Some(row) => {
                for (field, entry) in row.iter() {
                    if self.is_primary_key(field) {
                        continue;
                    }
                    if self.model.set_value(field, entry.value()).is_none() {
                        self.model.add_entry(entry);
                    }
                }
                true
            }
            None => false,
        };
        if results.state() == QueryState::Null {
            if copied {
                results.pass();
            } else {
                results.fail();
            }
        }
        copied
    }

    /// The typed value of `field`. A null entry reads as the type's default.
    pub fn get<V: TypedValue>(&self, field: &str) -> Result<V::Native, Error> {
        let entry = self
            .model
            .entry(field)
            .ok_or_else(|| E_MISSING_DATA.with_msg(|| format!("no field {}", normalize(field))))?;
        if entry.is_null() {
            return Ok(V::default_value());
        }
        V::parse(entry.value())
    }

    /// Write `value` in its SQL form, adding the field if the row lacks it.
    pub fn set<V: TypedValue>(&mut self, field: &str, value: &V::Native) -> Result<(), Error> {
        let sql = V::convert_to_sql(value);
        if self.model.set_value(field, &sql).is_some() {
            return Ok(());
        }
        self.model
            .add_entry(&Entry::new(field, &sql))
            .map(|_| ())
            .ok_or_else(|| E_INVARG.with_msg(|| format!("cannot add field {field:?}")))
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        self.model
            .entry(field)
            .filter(|e| !e.is_null())
            .map(Entry::value)
    }

    pub fn set_text(&mut self, field: &str, value: &str) -> Result<(), Error> {
        if self.model.set_value(field, value).is_some() {
            return Ok(());
        }
        self.model
            .add_entry(&Entry::new(field, value))
            .map(|_| ())
            .ok_or_else(|| E_INVARG.with_msg(|| format!("cannot add field {field:?}")))
    }
}

/// What `try_fetch` reports instead of a structural error.
#[derive(Clone, Debug)]
pub struct FetchOutcome {
    pub results: ResultSet,
    pub code: ErrorCode,
}

impl FetchOutcome {
    /// True if the fetch ran without a structural error. The query may still have matched nothing.
    pub fn fetched(&self) -> bool {
        self.code == E_NONE
    }
}

/// A domain object backed by one row, with snapshot/restore.
///
/// Implementors provide access to their `RecordCore` and the query hooks; everything else is
/// provided.
pub trait VersionedRecord {
    fn core(&self) -> &RecordCore;

    fn core_mut(&mut self) -> &mut RecordCore;

    /// The query which reads this record by its primary key.
    fn fetch_query(&self) -> String;

    fn fetch_params(&self) -> Params {
        self.core().key_params()
    }

    /// The statement which writes this record back, if it can be written.
    fn store_query(&self) -> Option<String> {
        None
    }

    fn store_params(&self) -> Params {
        self.core().model_params()
    }

    fn save(&mut self) -> Memento {
        self.core_mut().save()
    }

    fn restore(&mut self) -> Option<Memento> {
        self.core_mut().restore()
    }

    fn load(&mut self, memento: &Memento) {
        self.core_mut().load(memento)
    }

    fn history_len(&self) -> usize {
        self.core().history().len()
    }

    /// Read this record through `gateway` and copy the non-key fields of the first row into it.
    ///
    /// Every primary key must be present and non-blank; otherwise this fails before the gateway
    /// is touched.
    fn fetch(&mut self, gateway: &dyn Gateway) -> Result<ResultSet, RecordError> {
        self.core().validate_keys()?;
        let query = self.fetch_query();
        let params = self.fetch_params();
        debug!(query = %query, ?params, "fetching record");
        let mut results = gateway.read(&query, &params)?;
        if !self.core_mut().set_results(&mut results) {
            warn!(query = %query, state = %results.state(), "fetch matched no rows");
        }
        Ok(results)
    }

    /// As `fetch`, but a missing key or structural error comes back as an `ERROR` result with
    /// its code. Gateway failures are still returned as errors.
    fn try_fetch(&mut self, gateway: &dyn Gateway) -> Result<FetchOutcome, GatewayError> {
        match self.fetch(gateway) {
            Ok(results) => Ok(FetchOutcome {
                results,
                code: E_NONE,
            }),
            Err(RecordError::Gateway(e)) => Err(e),
            Err(e) => {
                debug!(error = %e, "fetch failed");
                let mut results = ResultSet::new(&self.fetch_query());
                results.error();
                Ok(FetchOutcome {
                    results,
                    code: e.code(),
                })
            }
        }
    }

    /// Write this record back through `gateway`. Keys are validated as for `fetch`.
    fn store(&mut self, gateway: &dyn Gateway) -> Result<ResultSet, RecordError> {
        self.core().validate_keys()?;
        let query = self.store_query().ok_or_else(|| {
            RecordError::Structural(E_INVARG.msg("record type cannot be stored"))
        })?;
        let params = self.store_params();
        debug!(query = %query, ?params, "storing record");
        let mut results = gateway.write(&query, &params)?;
        if results.state() == QueryState::Null {
            if results.rows_affected() > 0 {
                results.pass();
            } else {
                results.fail();
            }
        }
        Ok(results)
    }
}
