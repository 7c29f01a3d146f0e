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

//! Test doubles shared by the unit tests in this crate.

use crate::gateway::{Gateway, GatewayError, Params};
use capstone_var::{ResultSet, Row};
use std::cell::RefCell;

/// Answers every call with a fixed result, and remembers what it was asked.
#[derive(Default)]
pub(crate) struct StubGateway {
    pub(crate) response: Option<ResultSet>,
    pub(crate) down: bool,
    pub(crate) calls: RefCell<Vec<(String, Params)>>,
}

impl StubGateway {
    pub(crate) fn answering(rows: Vec<Row>) -> Self {
        Self {
            response: Some(ResultSet::with_rows("stub", rows)),
            ..Default::default()
        }
    }

    fn respond(&self, query: &str, params: &Params) -> Result<ResultSet, GatewayError> {
        self.calls
            .borrow_mut()
            .push((query.to_string(), params.clone()));
        if self.down {
            return Err(GatewayError::Connection("stub is down".into()));
        }
        Ok(self
            .response
            .clone()
            .unwrap_or_else(|| ResultSet::new(query)))
    }
}

impl Gateway for StubGateway {
    fn read(&self, query: &str, params: &Params) -> Result<ResultSet, GatewayError> {
        self.respond(query, params)
    }

    fn write(&self, query: &str, params: &Params) -> Result<ResultSet, GatewayError> {
        let mut results = self.respond(query, params)?;
        results.set_rows_affected(1);
        Ok(results)
    }
}
