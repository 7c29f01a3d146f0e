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

//! Field-name normalization shared by entries, rows, result sets and glossaries.

/// Trim surrounding whitespace and uppercase. Idempotent.
pub fn normalize(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Normalize `name`, rejecting names that are empty once trimmed.
pub fn normalized_field(name: &str) -> Option<String> {
    let normalized = normalize(name);
    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}

/// True if `a` and `b` name the same field.
pub fn same_field(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}
