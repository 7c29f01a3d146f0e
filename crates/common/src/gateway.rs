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

use capstone_var::ResultSet;
use indexmap::IndexMap;
use thiserror::Error;

/// Named query parameters, in binding order. Keys carry no placeholder prefix. Query text names
/// them as `@NAME`; a gateway whose driver spells placeholders differently rewrites them.
pub type Params = IndexMap<String, String>;

/// Build a `Params` from name/value pairs.
pub fn params<I, K, V>(pairs: I) -> Params
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Failures inside the gateway itself, as opposed to queries which ran and matched nothing.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum GatewayError {
    #[error("Gateway connection failure: {0}")]
    Connection(String),
    #[error("Query rejected: {query}: {reason}")]
    Query { query: String, reason: String },
}

/// The external collaborator which actually executes SQL.
///
/// Calls block. Binding, escaping, timeouts and serialization of concurrent use are all the
/// implementation's (or its caller's) business.
pub trait Gateway {
    /// Run a query expected to produce rows.
    fn read(&self, query: &str, params: &Params) -> Result<ResultSet, GatewayError>;

    /// Run a statement expected to report an affected-row count. The rows may be empty.
    fn write(&self, query: &str, params: &Params) -> Result<ResultSet, GatewayError>;
}
