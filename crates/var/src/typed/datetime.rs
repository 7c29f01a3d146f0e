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
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt::{Display, Formatter};

/// The SQL wire format.
pub const WIRE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// The format used when showing a value to a person.
pub const DISPLAY_FORMAT: &str = "%m/%d/%Y %H:%M:%S";

const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A timestamp without zone. Unparseable input yields `0001-01-01 00:00:00`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DateTimeValue(NaiveDateTime);

impl Default for DateTimeValue {
    fn default() -> Self {
        Self(Self::default_value())
    }
}

impl DateTimeValue {
    /// The value rendered in `DISPLAY_FORMAT`.
    pub fn display(&self) -> String {
        self.0.format(DISPLAY_FORMAT).to_string()
    }
}

impl TypedValue for DateTimeValue {
    type Native = NaiveDateTime;

    const KIND: ValueKind = ValueKind::DateTime;

    fn default_value() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .unwrap_or(NaiveDateTime::MIN)
    }

    fn convert_to_sql(value: &NaiveDateTime) -> String {
        value.format(WIRE_FORMAT).to_string()
    }

    fn parse(sql: &str) -> Result<NaiveDateTime, Error> {
        let sql = sql.trim();
        let parsed = [WIRE_FORMAT, DISPLAY_FORMAT, ISO_FORMAT]
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(sql, format).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(sql, DATE_FORMAT)
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            });
        Ok(parsed.unwrap_or_else(Self::default_value))
    }

    fn from_value(value: NaiveDateTime) -> Self {
        Self(value)
    }

    fn value(&self) -> &NaiveDateTime {
        &self.0
    }

    fn set_value(&mut self, value: NaiveDateTime) {
        self.0 = value;
    }
}

impl Display for DateTimeValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
