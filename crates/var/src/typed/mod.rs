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

//! Converters between native values and their SQL string form.
//!
//! Each `TypedValue` impl owns one wire format and it is a durable contract: other components
//! parse what these produce. `SqlValue` is the flattened sum of all of them, and
//! `RangeConstraint` adds inclusive bounds to any of them by composition.

mod datetime;
mod flag;
mod id;
mod range;

pub use datetime::{DISPLAY_FORMAT, DateTimeValue, WIRE_FORMAT};
pub use flag::FlagValue;
pub use id::IdValue;
pub use range::{RangeConstraint, RangedDateTimeValue};

use crate::Error;
use chrono::NaiveDateTime;
use std::cmp::Ordering;
use std::fmt::Debug;
use strum::{Display, EnumString};

/// A native value paired with its SQL string representation.
///
/// `parse` must be total: it either yields a value (possibly the documented default) or an
/// error, never a half-set state.
pub trait TypedValue: Clone + Default + Ord + Debug {
    type Native: Clone + Ord + Debug;

    const KIND: ValueKind;

    fn default_value() -> Self::Native;

    fn convert_to_sql(value: &Self::Native) -> String;

    fn parse(sql: &str) -> Result<Self::Native, Error>;

    fn from_value(value: Self::Native) -> Self;

    fn value(&self) -> &Self::Native;

    fn set_value(&mut self, value: Self::Native);

    /// Order two SQL strings by their parsed native values.
    fn compare_sql(left: &str, right: &str) -> Result<Ordering, Error> {
        Ok(Self::parse(left)?.cmp(&Self::parse(right)?))
    }

    fn sql(&self) -> String {
        Self::convert_to_sql(self.value())
    }

    fn set_sql(&mut self, sql: &str) -> Result<(), Error> {
        let value = Self::parse(sql)?;
        self.set_value(value);
        Ok(())
    }

    fn from_sql(sql: &str) -> Result<Self, Error> {
        Ok(Self::from_value(Self::parse(sql)?))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ValueKind {
    Id,
    Flag,
    DateTime,
}

/// One value of any of the supported SQL kinds.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum SqlValue {
    Id(i32),
    Flag(bool),
    DateTime(NaiveDateTime),
}

impl SqlValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            SqlValue::Id(_) => ValueKind::Id,
            SqlValue::Flag(_) => ValueKind::Flag,
            SqlValue::DateTime(_) => ValueKind::DateTime,
        }
    }

    pub fn default_for(kind: ValueKind) -> Self {
        match kind {
            ValueKind::Id => SqlValue::Id(IdValue::default_value()),
            ValueKind::Flag => SqlValue::Flag(FlagValue::default_value()),
            ValueKind::DateTime => SqlValue::DateTime(DateTimeValue::default_value()),
        }
    }

    pub fn parse(kind: ValueKind, sql: &str) -> Result<Self, Error> {
        Ok(match kind {
            ValueKind::Id => SqlValue::Id(IdValue::parse(sql)?),
            ValueKind::Flag => SqlValue::Flag(FlagValue::parse(sql)?),
            ValueKind::DateTime => SqlValue::DateTime(DateTimeValue::parse(sql)?),
        })
    }

    pub fn to_sql(&self) -> String {
        match self {
            SqlValue::Id(v) => IdValue::convert_to_sql(v),
            SqlValue::Flag(v) => FlagValue::convert_to_sql(v),
            SqlValue::DateTime(v) => DateTimeValue::convert_to_sql(v),
        }
    }
}

impl From<IdValue> for SqlValue {
    fn from(value: IdValue) -> Self {
        SqlValue::Id(*value.value())
    }
}

impl From<FlagValue> for SqlValue {
    fn from(value: FlagValue) -> Self {
        SqlValue::Flag(*value.value())
    }
}

impl From<DateTimeValue> for SqlValue {
    fn from(value: DateTimeValue) -> Self {
        SqlValue::DateTime(*value.value())
    }
}
