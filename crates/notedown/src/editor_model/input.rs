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

//! Input handling: autoformat interception and key-command dispatch.

use tracing::warn;

use crate::autoformat::{self, Trigger};
use crate::content::Selection;
use crate::{EditorError, KeyCommand, ModelUpdate};

use super::EditorModel;

impl EditorModel {
    /// Offer a character to the autoformat detector before it is
    /// inserted.
    ///
    /// Returns `Some(update)` when a trigger fired — the character is
    /// consumed and must NOT be inserted by the caller. Returns `None`
    /// otherwise; the caller inserts the character through
    /// [`EditorModel::replace_text`] as usual.
    pub fn handle_before_input(&mut self, ch: char) -> Option<ModelUpdate> {
        let trigger = autoformat::detect(&self.snapshot, &self.selection, ch)?;
        match self.apply_trigger(&trigger) {
            Ok(update) => Some(update),
            // Detection and application are synchronous on the same
            // snapshot, so this only fires for a trigger held across
            // other edits. The pending edit is aborted; the document
            // is untouched.
            Err(error) => {
                warn!(%error, "autoformat trigger no longer applies");
                None
            }
        }
    }

    /// Apply a detected [`Trigger`]: remove the pattern text and put
    /// the formatting change into effect, as one committed transition.
    ///
    /// Fails with [`EditorError::StaleReference`] when the trigger's
    /// block has left the document; the model is left unchanged.
    pub fn apply_trigger(&mut self, trigger: &Trigger) -> Result<ModelUpdate, EditorError> {
        let applied = autoformat::apply(&self.snapshot, trigger)?;
        let reason = applied.reason;

        self.commit(applied.snapshot, Selection::caret(applied.caret), reason);

        if let Some(effect) = applied.style_effect {
            let mut pending = self.current_inline_style();
            for style in effect.clear {
                pending.remove(style);
            }
            pending.insert(effect.activate);
            self.style_override = Some(pending);
        }

        Ok(self.create_update_replace_all(reason))
    }

    /// Dispatch a named editing command (`"bold"`, `"underline"`,
    /// `"backspace"`, ...), as emitted by platform keyboard handlers.
    ///
    /// Returns `None` for command names the model does not recognize,
    /// so the caller can fall through to its default behavior.
    pub fn handle_key_command(&mut self, command: &str) -> Option<ModelUpdate> {
        let command: KeyCommand = command.parse().ok()?;
        Some(match command {
            KeyCommand::Bold => self.bold(),
            KeyCommand::Red => self.red(),
            KeyCommand::Underline => self.underline(),
            KeyCommand::Backspace => self.backspace(),
            KeyCommand::Undo => self.undo(),
            KeyCommand::Redo => self.redo(),
        })
    }
}
