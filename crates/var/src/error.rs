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

use ErrorCode::*;
use std::{
    fmt::{Debug, Display, Formatter},
    hash::{Hash, Hasher},
    ops::Deref,
};

/// A structural error: a code from the `ErrorCode` taxonomy plus an optional message.
/// Expected conditions (no match, empty result) are never reported this way.
#[derive(Clone, Eq, Ord, PartialOrd)]
pub struct Error {
    pub err_type: ErrorCode,
    pub msg: Option<Box<String>>,
}

impl Hash for Error {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.err_type.hash(state);
    }
}

impl Error {
    pub fn new(err_type: ErrorCode, msg: Option<String>) -> Self {
        Self {
            err_type,
            msg: msg.map(Box::new),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.err_type
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.msg {
            Some(msg) => write!(f, "{}({msg})", self.err_type),
            None => write!(f, "{}", self.err_type),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.msg.is_some() {
            write!(f, "{} ({})", self.err_type, self.message())
        } else {
            write!(f, "{}", self.err_type)
        }
    }
}

/// The database error taxonomy shared by every layer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[allow(non_camel_case_types)]
pub enum ErrorCode {
    E_NONE,
    E_MISSING_DATA,
    E_UNKNOWN,
    E_TYPE,
    E_RANGE,
    E_INVARG,
    E_READONLY,
}

impl ErrorCode {
    pub fn parse_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "E_NONE" => Some(E_NONE),
            "E_MISSING_DATA" => Some(E_MISSING_DATA),
            "E_UNKNOWN" => Some(E_UNKNOWN),
            "E_TYPE" => Some(E_TYPE),
            "E_RANGE" => Some(E_RANGE),
            "E_INVARG" => Some(E_INVARG),
            "E_READONLY" => Some(E_READONLY),
            _ => None,
        }
    }
}

impl From<ErrorCode> for String {
    fn from(val: ErrorCode) -> Self {
        match val {
            E_NONE => "E_NONE".into(),
            E_MISSING_DATA => "E_MISSING_DATA".into(),
            E_UNKNOWN => "E_UNKNOWN".into(),
            E_TYPE => "E_TYPE".into(),
            E_RANGE => "E_RANGE".into(),
            E_INVARG => "E_INVARG".into(),
            E_READONLY => "E_READONLY".into(),
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s: String = (*self).into();
        write!(f, "{s}")
    }
}

impl ErrorCode {
    pub fn msg<S: ToString>(self, s: S) -> Error {
        Error::new(self, Some(s.to_string()))
    }

    pub fn with_msg<F>(self, f: F) -> Error
    where
        F: FnOnce() -> String,
    {
        Error::new(self, Some(f()))
    }
}

impl PartialEq<ErrorCode> for Error {
    fn eq(&self, other: &ErrorCode) -> bool {
        self.err_type == *other
    }
}

impl PartialEq<Error> for Error {
    fn eq(&self, other: &Error) -> bool {
        self.err_type == other.err_type
    }
}

impl From<ErrorCode> for Error {
    fn from(val: ErrorCode) -> Self {
        Error::new(val, None)
    }
}

impl std::error::Error for Error {}

impl Error {
    #[must_use]
    pub fn message(&self) -> String {
        if let Some(msg) = &self.msg {
            return msg.deref().clone();
        }
        match self.err_type {
            E_NONE => "No error".into(),
            E_MISSING_DATA => "Required data missing".into(),
            E_UNKNOWN => "Unknown error".into(),
            E_TYPE => "Type mismatch".into(),
            E_RANGE => "Index out of range".into(),
            E_INVARG => "Invalid argument".into(),
            E_READONLY => "Collection is readonly".into(),
        }
    }
}
