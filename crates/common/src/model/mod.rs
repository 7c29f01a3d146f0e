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

pub use crate::model::memento::{History, Memento, PrimaryKey};
pub use crate::model::record::{FetchOutcome, RecordCore, VersionedRecord};
use crate::gateway::GatewayError;
use capstone_var::ErrorCode::{E_MISSING_DATA, E_UNKNOWN};
use capstone_var::{Error, ErrorCode};
use thiserror::Error;

mod memento;
mod record;

/// Errors raised while reading or writing a versioned record.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum RecordError {
    #[error("Missing primary key value: {0}")]
    MissingKey(String),
    #[error("Structural error: {0}")]
    Structural(#[from] Error),
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

/// Translations from RecordError to the shared error codes.
impl RecordError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingKey(_) => E_MISSING_DATA,
            Self::Structural(e) => e.code(),
            Self::Gateway(_) => E_UNKNOWN,
        }
    }
}
