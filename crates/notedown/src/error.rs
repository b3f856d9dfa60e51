// Copyright 2026 The Matrix.org Foundation C.I.C.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for editing and persistence.

use thiserror::Error;

use crate::content::BlockKey;

/// Errors raised by snapshot edit operations.
///
/// An edit that fails leaves the prior snapshot untouched; the model
/// aborts the pending transition rather than applying it partially.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorError {
    /// The operation referenced a block that is no longer part of the
    /// document.
    #[error("block {0} is no longer part of the document")]
    StaleReference(BlockKey),
}

/// Errors raised when saving a document.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The underlying store rejected the write.
    #[error("failed to write saved document: {0}")]
    Write(#[from] std::io::Error),

    /// The document could not be encoded.
    #[error("failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors raised when decoding a persisted document.
///
/// These are recovered at load time by falling back to an empty
/// document; they are logged, never fatal.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid document encoding: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported document format version {0}")]
    Version(u32),

    #[error("document has no blocks")]
    Empty,

    #[error("duplicate block key {0}")]
    DuplicateKey(u64),

    #[error("style range out of bounds in block {0}")]
    RangeOutOfBounds(u64),

    #[error("unknown style or block type tag `{0}`")]
    UnknownTag(String),
}
