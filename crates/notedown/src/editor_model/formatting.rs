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

//! Inline formatting: bold, red, underline.
//!
//! A range selection marks or unmarks the selected text. A collapsed
//! cursor toggles the style in the pending override instead, so the
//! next inserted text will (or won't) carry it.

use crate::{ChangeReason, InlineStyle, ModelUpdate};

use super::EditorModel;

impl EditorModel {
    /// Toggle an inline style on the current selection.
    fn toggle_inline_style(&mut self, style: InlineStyle) -> ModelUpdate {
        let Some((start, end)) = self.snapshot.ordered(&self.selection) else {
            return ModelUpdate::keep();
        };

        if start == end {
            // Collapsed cursor — toggle the pending override.
            let mut pending = self.current_inline_style();
            if !pending.insert(style) {
                pending.remove(&style);
            }
            self.style_override = Some(pending);
            return self.create_update_selection();
        }

        let Ok(segments) = self.snapshot.segments(start, end) else {
            return ModelUpdate::keep();
        };

        // The style counts as active only when every selected char
        // carries it; a partially styled selection gets fully marked.
        let is_active = segments
            .iter()
            .filter(|(_, seg_start, seg_end)| seg_start < seg_end)
            .all(|(key, seg_start, seg_end)| {
                self.snapshot
                    .block(*key)
                    .is_some_and(|b| b.is_range_styled(*seg_start, *seg_end, style))
            });

        let mut snapshot = self.snapshot.clone();
        for (key, seg_start, seg_end) in segments {
            if seg_start >= seg_end {
                continue;
            }
            let result = if is_active {
                snapshot.remove_style_in(key, seg_start, seg_end, style)
            } else {
                snapshot.apply_style_in(key, seg_start, seg_end, style)
            };
            match result {
                Ok(next) => snapshot = next,
                Err(_) => return ModelUpdate::keep(),
            }
        }

        let selection = self.selection;
        self.commit(snapshot, selection, ChangeReason::ChangeInlineStyle);
        self.create_update_replace_all(ChangeReason::ChangeInlineStyle)
    }

    /// Toggle bold.
    pub fn bold(&mut self) -> ModelUpdate {
        self.toggle_inline_style(InlineStyle::Bold)
    }

    /// Toggle red.
    pub fn red(&mut self) -> ModelUpdate {
        self.toggle_inline_style(InlineStyle::Red)
    }

    /// Toggle underline.
    pub fn underline(&mut self) -> ModelUpdate {
        self.toggle_inline_style(InlineStyle::Underline)
    }
}
