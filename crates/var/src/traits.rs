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

//! Small capability traits. Each collection type implements only the ones it needs.

use crate::{Error, ErrorCode::E_TYPE};
use std::any::{Any, type_name};
use std::cmp::Ordering;

/// Something which can hold the null sentinel.
pub trait Nullable {
    fn is_null(&self) -> bool;
    fn make_null(&mut self);
}

/// Something whose mutators can be switched off.
pub trait ReadOnly {
    fn is_readonly(&self) -> bool;
    fn set_readonly(&mut self, readonly: bool);
}

/// Ordering against a value of unknown type. Comparing against anything other than `Self` is a
/// contract violation and reports `E_TYPE`.
pub trait DynCompare {
    fn compare_dyn(&self, other: &dyn Any) -> Result<Ordering, Error>;

    fn equals_dyn(&self, other: &dyn Any) -> Result<bool, Error> {
        Ok(self.compare_dyn(other)? == Ordering::Equal)
    }
}

impl<T: Ord + 'static> DynCompare for T {
    fn compare_dyn(&self, other: &dyn Any) -> Result<Ordering, Error> {
        match other.downcast_ref::<T>() {
            Some(other) => Ok(self.cmp(other)),
            None => Err(E_TYPE.with_msg(|| {
                format!("cannot compare {} against another type", type_name::<T>())
            })),
        }
    }
}
