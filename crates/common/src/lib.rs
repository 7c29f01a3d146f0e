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

//! Domain records built on the relational layer in `capstone-var`: the `Gateway` boundary, the
//! `VersionedRecord` snapshot/restore machinery, and reference-code glossaries.

pub mod gateway;
pub mod glossary;
pub mod model;
#[cfg(test)]
mod testing;

pub use gateway::{Gateway, GatewayError, Params, params};
pub use glossary::{CodeGlossary, CodeItem, Glossary, GlossaryRegistry};
pub use model::{
    FetchOutcome, History, Memento, PrimaryKey, RecordCore, RecordError, VersionedRecord,
};
