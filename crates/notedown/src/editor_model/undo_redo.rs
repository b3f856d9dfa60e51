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

//! Undo / Redo over whole-snapshot history entries.
//!
//! Because every edit commits one atomic snapshot transition, undo is
//! a plain stack pop: the pre-edit snapshot and selection come back in
//! one step, trigger removals and their formatting included.

use std::mem;

use crate::ModelUpdate;

use super::base::HistoryEntry;
use super::EditorModel;

impl EditorModel {
    /// Undo the last committed transition.
    pub fn undo(&mut self) -> ModelUpdate {
        let Some(entry) = self.undo_stack.pop() else {
            return ModelUpdate::keep();
        };
        let reason = entry.reason;
        let current = HistoryEntry {
            snapshot: mem::replace(&mut self.snapshot, entry.snapshot),
            selection: self.selection,
            reason,
        };
        self.redo_stack.push(current);
        self.selection = entry.selection;
        self.style_override = None;
        self.create_update_replace_all(reason)
    }

    /// Redo a previously undone transition.
    pub fn redo(&mut self) -> ModelUpdate {
        let Some(entry) = self.redo_stack.pop() else {
            return ModelUpdate::keep();
        };
        let reason = entry.reason;
        let current = HistoryEntry {
            snapshot: mem::replace(&mut self.snapshot, entry.snapshot),
            selection: self.selection,
            reason,
        };
        self.undo_stack.push(current);
        self.selection = entry.selection;
        self.style_override = None;
        self.create_update_replace_all(reason)
    }
}
