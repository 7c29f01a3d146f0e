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

use crate::typed::{TypedValue, ValueKind};
use crate::{Error, ErrorCode::E_INVARG};
use std::fmt::{Display, Formatter};

const TRUE_TOKENS: [&str; 6] = ["Y", "YES", "TRUE", "1", "T", "ON"];
const FALSE_TOKENS: [&str; 6] = ["N", "NO", "FALSE", "0", "F", "OFF"];

/// A boolean flag, stored on the wire as `1` / `0`.
///
/// Unlike `IdValue`, an unrecognized token is an error, not a default. Blank input is `false`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FlagValue(bool);

impl TypedValue for FlagValue {
    type Native = bool;

    const KIND: ValueKind = ValueKind::Flag;

    fn default_value() -> bool {
        false
    }

    fn convert_to_sql(value: &bool) -> String {
        String::from(if *value { "1" } else { "0" })
    }

    fn parse(sql: &str) -> Result<bool, Error> {
        let token = sql.trim().to_uppercase();
        if token.is_empty() {
            return Ok(Self::default_value());
        }
        if TRUE_TOKENS.contains(&token.as_str()) {
            Ok(true)
        } else if FALSE_TOKENS.contains(&token.as_str()) {
            Ok(false)
        } else {
            Err(E_INVARG.with_msg(|| format!("not a flag: {sql:?}")))
        }
    }

    fn from_value(value: bool) -> Self {
        Self(value)
    }

    fn value(&self) -> &bool {
        &self.0
    }

    fn set_value(&mut self, value: bool) {
        self.0 = value;
    }
}

impl Display for FlagValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
