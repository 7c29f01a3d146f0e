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

//! The relational record layer: normalized field/value `Entry`s, ordered `Row`s, `ResultSet`s
//! carrying query outcome, and the `TypedValue` converters between native values and their SQL
//! string forms.

mod entry;
mod error;
mod normalize;
mod result_set;
mod row;
mod traits;
pub mod typed;

pub use entry::{Entry, NULL_VALUE};
pub use error::{Error, ErrorCode, ErrorCode::*};
pub use normalize::{normalize, normalized_field, same_field};
pub use result_set::{QueryState, ROWS_AFFECTED_UNKNOWN, ResultSet, normalize_query};
pub use row::Row;
pub use traits::{DynCompare, Nullable, ReadOnly};
pub use typed::{
    DateTimeValue, FlagValue, IdValue, RangeConstraint, RangedDateTimeValue, SqlValue,
    TypedValue, ValueKind,
};
