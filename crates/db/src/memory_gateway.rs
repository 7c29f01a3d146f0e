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

//! A scripted, in-memory `Gateway`.
//!
//! It executes nothing. Each call's placeholders are rewritten to the configured parameter
//! prefix, then matched against canned responses by normalized query text (and, when a response
//! names them, by exact parameters). Fixtures are therefore written in the configured syntax. Every call is recorded so callers can
//! see what was asked and in what order. A query nothing matches comes back as an empty
//! `FAILURE` result, the same way a real read that matched no rows would.

use crate::config::DatabaseConfig;
use capstone_common::{Gateway, GatewayError, Params};
use capstone_var::{ReadOnly, ResultSet, normalize_query};
use figment::Figment;
use figment::providers::{Format, Json, Yaml};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// One canned answer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Response {
    pub query: String,
    /// If present, the call's parameters must equal these exactly.
    #[serde(default)]
    pub params: Option<Params>,
    #[serde(default)]
    pub results: ResultSet,
}

/// The on-disk fixture format: a list of responses, tried in order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Fixtures {
    #[serde(default)]
    pub responses: Vec<Response>,
}

impl Fixtures {
    /// Read fixtures from a `.json` file, or from YAML for any other extension.
    pub fn load(path: &Path) -> Result<Self, GatewayError> {
        if !path.is_file() {
            return Err(GatewayError::Connection(format!(
                "fixture file {} not found",
                path.display()
            )));
        }
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let figment = if is_json {
            Figment::from(Json::file(path))
        } else {
            Figment::from(Yaml::file(path))
        };
        figment.extract().map_err(|e| {
            GatewayError::Connection(format!("bad fixture file {}: {e}", path.display()))
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CallKind {
    Read,
    Write,
}

/// A call the gateway received.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Call {
    pub kind: CallKind,
    pub query: String,
    pub params: Params,
}

pub struct MemoryGateway {
    config: DatabaseConfig,
    responses: Vec<Response>,
    calls: Mutex<Vec<Call>>,
    offline: bool,
}

impl MemoryGateway {
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            responses: vec![],
            calls: Mutex::new(vec![]),
            offline: false,
        }
    }

    /// A gateway preloaded with the fixture file named in `config`, if any.
    pub fn open(config: DatabaseConfig) -> Result<Self, GatewayError> {
        let fixtures = match &config.fixtures {
            Some(path) => Fixtures::load(path)?,
            None => Fixtures::default(),
        };
        debug!(
            responses = fixtures.responses.len(),
            "opened in-memory gateway"
        );
        let mut gateway = Self::new(config);
        gateway.responses = fixtures.responses;
        Ok(gateway)
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Answer `query`, whatever its parameters, with `results`.
    pub fn respond(&mut self, query: &str, results: ResultSet) -> &mut Self {
        self.responses.push(Response {
            query: query.to_string(),
            params: None,
            results,
        });
        self
    }

    /// Answer `query` with `results` only when called with exactly `params`.
    pub fn respond_with_params(
        &mut self,
        query: &str,
        params: Params,
        results: ResultSet,
    ) -> &mut Self {
        self.responses.push(Response {
            query: query.to_string(),
            params: Some(params),
            results,
        });
        self
    }

    /// While offline, every call fails with a connection error. Calls are still recorded.
    pub fn set_offline(&mut self, offline: bool) {
        self.offline = offline;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn answer(
        &self,
        kind: CallKind,
        query: &str,
        params: &Params,
    ) -> Result<ResultSet, GatewayError> {
        let query = self.config.bind_query(&normalize_query(query), params);
        if self.config.log_queries {
            debug!(?kind, query = %query, ?params, "gateway call");
        }
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Call {
                kind,
                query: query.clone(),
                params: params.clone(),
            });
        if self.offline {
            return Err(GatewayError::Connection("in-memory gateway is offline".into()));
        }

        let matched = self.responses.iter().find(|r| {
            normalize_query(&r.query) == query && r.params.as_ref().is_none_or(|p| p == params)
        });
        let mut results = match matched {
            Some(response) => response.results.clone(),
            None => {
                let mut results = ResultSet::new(&query);
                results.set_rows_affected(0);
                results.fail();
                results
            }
        };
        results.set_query(&query);
        if self.config.readonly_results {
            results.set_readonly(true);
        }
        Ok(results)
    }
}

impl Gateway for MemoryGateway {
    fn read(&self, query: &str, params: &Params) -> Result<ResultSet, GatewayError> {
        self.answer(CallKind::Read, query, params)
    }

    fn write(&self, query: &str, params: &Params) -> Result<ResultSet, GatewayError> {
        self.answer(CallKind::Write, query, params)
    }
}
