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

use crate::typed::{DateTimeValue, TypedValue};
use crate::{Error, ErrorCode::E_INVARG};

/// A `TypedValue` held inside inclusive `[min, max]` bounds.
///
/// `try_*` setters report whether the candidate was accepted; the plain setters drop an
/// out-of-range candidate silently. Either way a rejected candidate leaves the stored value alone.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RangeConstraint<V: TypedValue> {
    inner: V,
    min: V::Native,
    max: V::Native,
}

pub type RangedDateTimeValue = RangeConstraint<DateTimeValue>;

impl<V: TypedValue> RangeConstraint<V> {
    /// A constrained value starting at `min`.
    pub fn new(min: V::Native, max: V::Native) -> Result<Self, Error> {
        let initial = min.clone();
        Self::with_value(initial, min, max)
    }

    pub fn with_value(value: V::Native, min: V::Native, max: V::Native) -> Result<Self, Error> {
        if min > max {
            return Err(E_INVARG.with_msg(|| format!("empty range {min:?}..={max:?}")));
        }
        if value < min || value > max {
            return Err(E_INVARG.with_msg(|| {
                format!("{value:?} outside {min:?}..={max:?}")
            }));
        }
        Ok(Self {
            inner: V::from_value(value),
            min,
            max,
        })
    }

    pub fn min(&self) -> &V::Native {
        &self.min
    }

    pub fn max(&self) -> &V::Native {
        &self.max
    }

    pub fn inner(&self) -> &V {
        &self.inner
    }

    pub fn value(&self) -> &V::Native {
        self.inner.value()
    }

    pub fn sql(&self) -> String {
        self.inner.sql()
    }

    pub fn contains(&self, value: &V::Native) -> bool {
        *value >= self.min && *value <= self.max
    }

    pub fn try_set_value(&mut self, value: V::Native) -> bool {
        if !self.contains(&value) {
            return false;
        }
        self.inner.set_value(value);
        true
    }

    /// Parse and assign. A parse error counts as a rejection.
    pub fn try_set_sql(&mut self, sql: &str) -> bool {
        match V::parse(sql) {
            Ok(value) => self.try_set_value(value),
            Err(_) => false,
        }
    }

    pub fn set_value(&mut self, value: V::Native) {
        self.try_set_value(value);
    }

    pub fn set_sql(&mut self, sql: &str) {
        self.try_set_sql(sql);
    }
}
