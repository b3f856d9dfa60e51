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

use std::collections::{BTreeSet, HashMap};

use crate::content::{ContentSnapshot, Position, Selection};
use crate::model_update::{MenuState, MenuStateUpdate, ModelUpdate};
use crate::{ActionState, BlockType, ChangeReason, EditorAction, InlineStyle};

/// A rich text editor model for block-based notes.
///
/// The model owns one [`ContentSnapshot`] at a time. Edits never
/// mutate it in place: each operation builds a new snapshot and
/// commits it wholesale, pushing the previous one onto the undo stack
/// together with the [`ChangeReason`] that tags the transition.
///
/// The *style override* is the set of inline styles the next typed
/// character will carry instead of inheriting from the text before the
/// cursor. Autoformat triggers and the line-break handler act through
/// it: `*` + space activates bold there, and pressing return empties
/// it so a new line starts unstyled.
pub struct EditorModel {
    pub(crate) snapshot: ContentSnapshot,
    pub(crate) selection: Selection,
    pub(crate) style_override: Option<BTreeSet<InlineStyle>>,
    pub(crate) undo_stack: Vec<HistoryEntry>,
    pub(crate) redo_stack: Vec<HistoryEntry>,
}

/// One entry of the undo/redo history: the state before a transition
/// and the reason the transition happened.
#[derive(Clone, Debug)]
pub(crate) struct HistoryEntry {
    pub(crate) snapshot: ContentSnapshot,
    pub(crate) selection: Selection,
    pub(crate) reason: ChangeReason,
}

impl EditorModel {
    /// Create a model with an empty single-paragraph document.
    pub fn new() -> Self {
        Self::with_snapshot(ContentSnapshot::empty())
    }

    /// Create a model around an existing snapshot (e.g. one restored
    /// by the persistence adapter). The caret starts at the document
    /// start; selection is never part of a restored document.
    pub fn with_snapshot(snapshot: ContentSnapshot) -> Self {
        let caret = Position::new(snapshot.first_block().key(), 0);
        Self {
            snapshot,
            selection: Selection::caret(caret),
            style_override: None,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// The current document snapshot.
    pub fn snapshot(&self) -> &ContentSnapshot {
        &self.snapshot
    }

    /// Replace the current snapshot with `snapshot` as one undoable
    /// transition tagged with `reason`.
    ///
    /// The previous state goes onto the undo stack, the redo stack is
    /// cleared, and any pending style override is consumed.
    pub(crate) fn commit(
        &mut self,
        snapshot: ContentSnapshot,
        selection: Selection,
        reason: ChangeReason,
    ) {
        let previous = std::mem::replace(&mut self.snapshot, snapshot);
        self.undo_stack.push(HistoryEntry {
            snapshot: previous,
            selection: self.selection,
            reason,
        });
        self.redo_stack.clear();
        self.selection = selection;
        self.style_override = None;
    }

    /// The inline styles the next typed character will carry: the
    /// style override if one is pending, otherwise the styles
    /// inherited from the text at the selection start.
    pub fn current_inline_style(&self) -> BTreeSet<InlineStyle> {
        if let Some(pending) = &self.style_override {
            return pending.clone();
        }
        let Some((start, _)) = self.snapshot.ordered(&self.selection) else {
            return BTreeSet::new();
        };
        self.snapshot
            .block(start.block)
            .map(|b| b.styles_at(start.offset))
            .unwrap_or_default()
    }

    /// Compute toolbar states for every [`EditorAction`].
    pub(crate) fn compute_action_states(&self) -> HashMap<EditorAction, ActionState> {
        let mut states = HashMap::new();
        let current = self.current_inline_style();

        let style_actions = [
            (EditorAction::Bold, InlineStyle::Bold),
            (EditorAction::Red, InlineStyle::Red),
            (EditorAction::Underline, InlineStyle::Underline),
        ];
        for (action, style) in style_actions {
            states.insert(
                action,
                if current.contains(&style) {
                    ActionState::Reversed
                } else {
                    ActionState::Enabled
                },
            );
        }

        let in_heading = self
            .snapshot
            .ordered(&self.selection)
            .and_then(|(start, _)| self.snapshot.block(start.block))
            .map_or(false, |b| b.block_type() == BlockType::HeadingOne);
        states.insert(
            EditorAction::HeadingOne,
            if in_heading {
                ActionState::Reversed
            } else {
                ActionState::Enabled
            },
        );

        states.insert(
            EditorAction::Undo,
            if self.undo_stack.is_empty() {
                ActionState::Disabled
            } else {
                ActionState::Enabled
            },
        );
        states.insert(
            EditorAction::Redo,
            if self.redo_stack.is_empty() {
                ActionState::Disabled
            } else {
                ActionState::Enabled
            },
        );

        states
    }

    pub(crate) fn menu_state(&self) -> MenuState {
        MenuState::Update(MenuStateUpdate {
            action_states: self.compute_action_states(),
        })
    }

    /// Build a full [`ModelUpdate`] carrying the new snapshot.
    pub(crate) fn create_update_replace_all(&self, reason: ChangeReason) -> ModelUpdate {
        ModelUpdate::replace_all(
            self.snapshot.clone(),
            self.selection,
            reason,
            self.menu_state(),
        )
    }

    /// Build a selection-only [`ModelUpdate`].
    pub(crate) fn create_update_selection(&self) -> ModelUpdate {
        ModelUpdate::update_selection(self.selection, self.menu_state())
    }

    /// Return a debug tree representation of the document.
    pub fn to_tree(&self) -> String {
        let mut out = String::new();

        let ordered = self.snapshot.ordered(&self.selection);
        match ordered {
            Some((start, end)) => out.push_str(&format!(
                "sel: ({}:{},{}:{})\n",
                start.block, start.offset, end.block, end.offset
            )),
            None => out.push_str("sel: (detached)\n"),
        }

        for block in self.snapshot.blocks() {
            out.push_str(&format!("├─ block({})\n", block.block_type()));

            let (start_mark, end_mark, collapsed) = match ordered {
                Some((start, end)) => {
                    let collapsed = start == end;
                    let s = (start.block == block.key()).then_some(start.offset);
                    let e = (end.block == block.key() && !collapsed).then_some(end.offset);
                    (s, e, collapsed)
                }
                None => (None, None, false),
            };
            let annotated = annotate_selection(block.text(), start_mark, end_mark, collapsed);

            let styles = block.styles();
            if styles.is_empty() {
                out.push_str(&format!("│  \"{annotated}\"\n"));
            } else {
                let tags: Vec<String> = styles
                    .iter()
                    .map(|r| format!("{} {}..{}", r.style, r.start, r.end))
                    .collect();
                out.push_str(&format!("│  \"{annotated}\" [{}]\n", tags.join(", ")));
            }
        }

        out
    }
}

/// Insert `|` (caret) or `{`…`}` (range) markers into one block's text.
///
/// `start_mark`/`end_mark` are block-local char offsets of the ordered
/// selection endpoints, when they fall in this block.
fn annotate_selection(
    text: &str,
    start_mark: Option<usize>,
    end_mark: Option<usize>,
    collapsed: bool,
) -> String {
    let open = if collapsed { '|' } else { '{' };
    let mut out = String::new();
    for (i, ch) in text.chars().enumerate() {
        if start_mark == Some(i) {
            out.push(open);
        }
        if end_mark == Some(i) {
            out.push('}');
        }
        out.push(ch);
    }
    let len = text.chars().count();
    if start_mark == Some(len) {
        out.push(open);
    }
    if end_mark == Some(len) {
        out.push('}');
    }
    out
}

impl Default for EditorModel {
    fn default() -> Self {
        Self::new()
    }
}
