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

use crate::Error;
use crate::typed::{TypedValue, ValueKind};
use std::fmt::{Display, Formatter};

/// An integer identifier. Unparseable input yields `i32::MIN` rather than an error.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct IdValue(i32);

impl Default for IdValue {
    fn default() -> Self {
        Self(Self::default_value())
    }
}

impl TypedValue for IdValue {
    type Native = i32;

    const KIND: ValueKind = ValueKind::Id;

    fn default_value() -> i32 {
        i32::MIN
    }

    fn convert_to_sql(value: &i32) -> String {
        value.to_string()
    }

    fn parse(sql: &str) -> Result<i32, Error> {
        Ok(sql.trim().parse().unwrap_or(Self::default_value()))
    }

    fn from_value(value: i32) -> Self {
        Self(value)
    }

    fn value(&self) -> &i32 {
        &self.0
    }

    fn set_value(&mut self, value: i32) {
        self.0 = value;
    }
}

impl Display for IdValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
