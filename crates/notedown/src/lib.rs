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

//! Model code to power a block-based notes editor with markdown-style
//! autoformatting.
//!
//! [`EditorModel`] owns the document — an immutable [`ContentSnapshot`]
//! of blocks with inline style ranges — plus the selection and undo
//! history. Platform layers feed it keyboard input and render the
//! snapshot carried in each returned [`ModelUpdate`]:
//!
//! - characters go through [`EditorModel::handle_before_input`] first;
//!   a space after a leading `#`, `*`, `**` or `***` converts the line
//!   into a heading / bold / red / underline and consumes the space,
//!   anything else is inserted with [`EditorModel::replace_text`];
//! - the return key maps to [`EditorModel::enter`], named commands
//!   (`"bold"`, `"undo"`, ...) to
//!   [`EditorModel::handle_key_command`];
//! - an explicit save action hands the current snapshot to a
//!   [`persistence::DocumentStore`], which also restores it on the
//!   next launch.

pub mod autoformat;
pub mod persistence;

mod action_state;
mod block_type;
mod change_reason;
mod content;
mod editor_action;
mod editor_model;
mod error;
mod inline_style;
mod key_command;
mod model_update;

pub use action_state::ActionState;
pub use block_type::BlockType;
pub use change_reason::ChangeReason;
pub use content::{Block, BlockKey, ContentSnapshot, Position, Selection, StyleRange};
pub use editor_action::EditorAction;
pub use editor_model::EditorModel;
pub use error::{DecodeError, EditorError, StorageError};
pub use inline_style::InlineStyle;
pub use key_command::KeyCommand;
pub use model_update::{
    MenuState, MenuStateUpdate, ModelUpdate, ReplaceAll, SelectionUpdate, TextUpdate,
};
pub use persistence::{DocumentStore, FileStore, KeyValueStore, MemoryStore, PersistedDocument};
