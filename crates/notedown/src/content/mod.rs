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

//! The document content model.
//!
//! A document is a [`ContentSnapshot`]: an ordered list of [`Block`]s,
//! each with a block type, text, and inline [`StyleRange`]s. Snapshots
//! are values; every edit builds a new snapshot and the model replaces
//! its current one wholesale. All offsets are `char` offsets.

mod block;
mod selection;
mod snapshot;

pub use block::{Block, BlockKey, StyleRange};
pub use selection::{Position, Selection};
pub use snapshot::ContentSnapshot;
