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

//! Block-level operations: the heading toggle.

use crate::{BlockType, ChangeReason, ModelUpdate};

use super::EditorModel;

impl EditorModel {
    /// Toggle the block containing the selection start between
    /// [`BlockType::HeadingOne`] and [`BlockType::Paragraph`].
    pub fn heading(&mut self) -> ModelUpdate {
        let Some((start, _)) = self.snapshot.ordered(&self.selection) else {
            return ModelUpdate::keep();
        };
        let Some(block) = self.snapshot.block(start.block) else {
            return ModelUpdate::keep();
        };
        let target = if block.block_type() == BlockType::HeadingOne {
            BlockType::Paragraph
        } else {
            BlockType::HeadingOne
        };
        let Ok(snapshot) = self.snapshot.set_block_type(start.block, target) else {
            return ModelUpdate::keep();
        };

        let selection = self.selection;
        self.commit(snapshot, selection, ChangeReason::ChangeBlockType);
        self.create_update_replace_all(ChangeReason::ChangeBlockType)
    }
}

#[cfg(test)]
mod tests {
    use crate::content::{Position, Selection};
    use crate::{ActionState, BlockType, EditorAction, EditorModel};

    fn model_with_text(text: &str) -> EditorModel {
        let mut m = EditorModel::new();
        m.replace_text(text);
        m
    }

    fn block_type(m: &EditorModel) -> BlockType {
        m.snapshot().first_block().block_type()
    }

    #[test]
    fn heading_on_a_paragraph_makes_it_a_heading() {
        let mut model = model_with_text("title");
        model.heading();
        assert_eq!(block_type(&model), BlockType::HeadingOne);
    }

    #[test]
    fn heading_toggle_off_reverts_to_paragraph() {
        let mut model = model_with_text("title");
        model.heading();
        model.heading();
        assert_eq!(block_type(&model), BlockType::Paragraph);
    }

    #[test]
    fn heading_keeps_text_and_selection() {
        let mut model = model_with_text("title");
        let before = model.get_selection();
        model.heading();
        assert_eq!(model.get_content_as_plain_text(), "title");
        assert_eq!(model.get_selection(), before);
    }

    #[test]
    fn heading_only_changes_the_block_at_the_selection() {
        let mut model = model_with_text("one");
        model.enter();
        model.replace_text("two");
        model.heading();
        let blocks = model.snapshot().blocks();
        assert_eq!(blocks[0].block_type(), BlockType::Paragraph);
        assert_eq!(blocks[1].block_type(), BlockType::HeadingOne);
    }

    #[test]
    fn heading_state_is_reversed_inside_a_heading() {
        let mut model = model_with_text("title");
        model.heading();
        let states = model.action_states();
        assert_eq!(
            states.get(&EditorAction::HeadingOne),
            Some(&ActionState::Reversed)
        );
    }

    #[test]
    fn heading_is_one_undo_step() {
        let mut model = model_with_text("title");
        model.heading();
        model.undo();
        assert_eq!(block_type(&model), BlockType::Paragraph);
    }

    #[test]
    fn heading_with_a_range_selection_uses_the_start_block() {
        let mut model = model_with_text("one");
        model.enter();
        model.replace_text("two");
        let first = model.snapshot().first_block().key();
        let second = model.snapshot().blocks()[1].key();
        model.select(Selection::range(
            Position::new(first, 1),
            Position::new(second, 1),
        ));
        model.heading();
        let blocks = model.snapshot().blocks();
        assert_eq!(blocks[0].block_type(), BlockType::HeadingOne);
        assert_eq!(blocks[1].block_type(), BlockType::Paragraph);
    }
}
