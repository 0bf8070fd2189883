// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for model lookups
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving model records
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Node not found: {0}")]
    MissingNode(String),

    #[error("Section not found: {0}")]
    MissingSection(String),

    #[error("Invalid number for '{key}': {value}")]
    InvalidNumber { key: String, value: String },
}
