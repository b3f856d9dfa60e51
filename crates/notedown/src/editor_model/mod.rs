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

//! The editor model.
//!
//! [`EditorModel`] owns the live [`crate::ContentSnapshot`], the
//! selection, the pending style override, and the undo/redo history.
//! Every mutating method builds a new snapshot, commits it as one
//! transition tagged with a [`crate::ChangeReason`], and returns a
//! [`crate::ModelUpdate`] describing what changed.

mod base;
mod block_ops;
mod content_access;
mod formatting;
mod input;
mod selection;
mod state_query;
mod text_ops;
mod undo_redo;

pub use base::EditorModel;
