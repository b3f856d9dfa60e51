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

//! Text editing operations: replace_text, backspace, delete, enter.

use std::collections::BTreeSet;

use unicode_segmentation::UnicodeSegmentation;

use crate::content::{Position, Selection};
use crate::{ChangeReason, ModelUpdate};

use super::EditorModel;

impl EditorModel {
    /// Replace the current selection with `new_text`.
    ///
    /// The inserted characters carry the current inline style, so a
    /// pending style override (from a toolbar toggle or an autoformat
    /// trigger) takes effect here.
    pub fn replace_text(&mut self, new_text: &str) -> ModelUpdate {
        let Some((start, end)) = self.snapshot.ordered(&self.selection) else {
            return ModelUpdate::keep();
        };
        let styles = self.current_inline_style();

        let (snapshot, caret) = if start == end {
            (self.snapshot.clone(), start)
        } else {
            match self.snapshot.remove_range(start, end) {
                Ok(removed) => removed,
                Err(_) => return ModelUpdate::keep(),
            }
        };
        let snapshot = match snapshot.insert_text(caret.block, caret.offset, new_text, &styles) {
            Ok(inserted) => inserted,
            Err(_) => return ModelUpdate::keep(),
        };

        let caret = Position::new(caret.block, caret.offset + new_text.chars().count());
        self.commit(
            snapshot,
            Selection::caret(caret),
            ChangeReason::InsertCharacters,
        );
        self.create_update_replace_all(ChangeReason::InsertCharacters)
    }

    /// Delete backward from the cursor (backspace key).
    ///
    /// A range selection is deleted whole. A caret at the start of a
    /// block merges the block into its predecessor; otherwise the
    /// previous grapheme is removed.
    pub fn backspace(&mut self) -> ModelUpdate {
        let Some((start, end)) = self.snapshot.ordered(&self.selection) else {
            return ModelUpdate::keep();
        };

        if start != end {
            let Ok((snapshot, caret)) = self.snapshot.remove_range(start, end) else {
                return ModelUpdate::keep();
            };
            self.commit(snapshot, Selection::caret(caret), ChangeReason::RemoveRange);
            return self.create_update_replace_all(ChangeReason::RemoveRange);
        }

        if start.offset == 0 {
            // Caret at block start — join with the previous block.
            if self.snapshot.index_of(start.block) == Some(0) {
                return ModelUpdate::keep();
            }
            let Ok((snapshot, caret)) = self.snapshot.join_with_previous(start.block) else {
                return ModelUpdate::keep();
            };
            self.commit(
                snapshot,
                Selection::caret(caret),
                ChangeReason::BackspaceCharacter,
            );
            return self.create_update_replace_all(ChangeReason::BackspaceCharacter);
        }

        let Some(block) = self.snapshot.block(start.block) else {
            return ModelUpdate::keep();
        };
        let prefix: String = block.text().chars().take(start.offset).collect();
        let grapheme_len = prefix
            .graphemes(true)
            .last()
            .map(|g| g.chars().count())
            .unwrap_or(1);
        let from = start.offset.saturating_sub(grapheme_len);

        let Ok(snapshot) = self.snapshot.remove_in_block(start.block, from, start.offset) else {
            return ModelUpdate::keep();
        };
        self.commit(
            snapshot,
            Selection::caret(Position::new(start.block, from)),
            ChangeReason::BackspaceCharacter,
        );
        self.create_update_replace_all(ChangeReason::BackspaceCharacter)
    }

    /// Delete forward from the cursor (delete key).
    pub fn delete(&mut self) -> ModelUpdate {
        let Some((start, end)) = self.snapshot.ordered(&self.selection) else {
            return ModelUpdate::keep();
        };

        if start != end {
            let Ok((snapshot, caret)) = self.snapshot.remove_range(start, end) else {
                return ModelUpdate::keep();
            };
            self.commit(snapshot, Selection::caret(caret), ChangeReason::RemoveRange);
            return self.create_update_replace_all(ChangeReason::RemoveRange);
        }

        let Some(block) = self.snapshot.block(start.block) else {
            return ModelUpdate::keep();
        };

        if start.offset >= block.char_len() {
            // Caret at block end — pull the next block up into this one.
            let Some(idx) = self.snapshot.index_of(start.block) else {
                return ModelUpdate::keep();
            };
            let Some(next) = self.snapshot.blocks().get(idx + 1) else {
                return ModelUpdate::keep();
            };
            let next_key = next.key();
            let Ok((snapshot, caret)) = self.snapshot.join_with_previous(next_key) else {
                return ModelUpdate::keep();
            };
            self.commit(
                snapshot,
                Selection::caret(caret),
                ChangeReason::DeleteCharacter,
            );
            return self.create_update_replace_all(ChangeReason::DeleteCharacter);
        }

        let suffix: String = block.text().chars().skip(start.offset).collect();
        let grapheme_len = suffix
            .graphemes(true)
            .next()
            .map(|g| g.chars().count())
            .unwrap_or(1);

        let Ok(snapshot) =
            self.snapshot
                .remove_in_block(start.block, start.offset, start.offset + grapheme_len)
        else {
            return ModelUpdate::keep();
        };
        self.commit(
            snapshot,
            Selection::caret(start),
            ChangeReason::DeleteCharacter,
        );
        self.create_update_replace_all(ChangeReason::DeleteCharacter)
    }

    /// Insert a paragraph break (enter key).
    ///
    /// The block splits at the caret; text after the caret moves to a
    /// fresh paragraph block with no inline styles, and the style
    /// override is emptied so the new line inherits nothing from the
    /// previous one. One atomic transition.
    pub fn enter(&mut self) -> ModelUpdate {
        let Some((start, end)) = self.snapshot.ordered(&self.selection) else {
            return ModelUpdate::keep();
        };

        let (snapshot, caret) = if start == end {
            (self.snapshot.clone(), start)
        } else {
            match self.snapshot.remove_range(start, end) {
                Ok(removed) => removed,
                Err(_) => return ModelUpdate::keep(),
            }
        };
        let Ok((snapshot, new_key)) = snapshot.split_block(caret.block, caret.offset) else {
            return ModelUpdate::keep();
        };

        self.commit(
            snapshot,
            Selection::caret(Position::new(new_key, 0)),
            ChangeReason::SplitBlock,
        );
        // A fresh line starts with no active styles at all.
        self.style_override = Some(BTreeSet::new());
        self.create_update_replace_all(ChangeReason::SplitBlock)
    }
}
