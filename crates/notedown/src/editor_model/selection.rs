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

//! Selection management.

use crate::content::Selection;
use crate::ModelUpdate;

use super::EditorModel;

impl EditorModel {
    /// Set the selection/cursor.
    ///
    /// Moving the selection drops any pending style override and is
    /// not an undoable step.
    pub fn select(&mut self, selection: Selection) -> ModelUpdate {
        self.selection = selection;
        self.style_override = None;
        self.create_update_selection()
    }

    /// The current selection.
    pub fn get_selection(&self) -> Selection {
        self.selection
    }
}

#[cfg(test)]
mod tests {
    use crate::content::{Position, Selection};
    use crate::{EditorModel, TextUpdate};

    fn model_with_text(text: &str) -> EditorModel {
        let mut m = EditorModel::new();
        m.replace_text(text);
        m
    }

    #[test]
    fn select_stores_the_selection() {
        let mut model = model_with_text("abcdefgh");
        let key = model.snapshot().first_block().key();
        let sel = Selection::range(Position::new(key, 1), Position::new(key, 3));
        model.select(sel);
        assert_eq!(model.get_selection(), sel);
    }

    #[test]
    fn select_produces_a_selection_update() {
        let mut model = model_with_text("abcdef");
        let key = model.snapshot().first_block().key();
        let sel = Selection::range(Position::new(key, 2), Position::new(key, 6));
        let update = model.select(sel);
        let TextUpdate::Select(s) = update.text_update else {
            panic!("expected a selection update");
        };
        assert_eq!(s.selection, sel);
    }

    #[test]
    fn select_is_not_an_undo_step() {
        let mut model = model_with_text("abc");
        let undo_depth = model.undo_stack.len();
        let key = model.snapshot().first_block().key();
        model.select(Selection::caret(Position::new(key, 1)));
        assert_eq!(model.undo_stack.len(), undo_depth);
    }

    #[test]
    fn backward_selection_is_preserved_as_given() {
        let mut model = model_with_text("abcdef");
        let key = model.snapshot().first_block().key();
        let sel = Selection::range(Position::new(key, 5), Position::new(key, 2));
        model.select(sel);
        assert_eq!(model.get_selection(), sel);
    }

    #[test]
    fn select_after_typing_preserves_the_text() {
        let mut model = model_with_text("abc");
        let key = model.snapshot().first_block().key();
        model.select(Selection::caret(Position::new(key, 1)));
        model.replace_text("X");
        assert_eq!(model.get_content_as_plain_text(), "aXbc");
    }
}
