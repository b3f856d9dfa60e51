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

//! Autoformat triggers: leading `#`, `*`, `**` and `***` followed by a
//! space convert into heading, bold, red and underline formatting.
//!
//! [`detect`] decides whether the character about to be inserted
//! completes a trigger; [`apply`] builds the resulting snapshot with
//! the trigger text removed. The trigger patterns live in one ordered
//! table ([`TRIGGER_RULES`], longest pattern first), so adding a
//! pattern is a data change, not a code change.

use std::ops::Range;

use crate::content::{BlockKey, ContentSnapshot, Position, Selection};
use crate::error::EditorError;
use crate::{BlockType, ChangeReason, InlineStyle};

/// The character that completes a trigger pattern.
pub const TRIGGER_CHAR: char = ' ';

/// What a matched trigger does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerAction {
    /// Change the block's type.
    SetBlockType(BlockType),
    /// Turn `style` on at the cursor, clearing any styles in `clears`
    /// first (`***` clears red so red-underlined text cannot arise
    /// from the trigger).
    StyleOn {
        style: InlineStyle,
        clears: &'static [InlineStyle],
    },
}

/// One row of the trigger table.
#[derive(Clone, Copy, Debug)]
pub struct TriggerRule {
    pub pattern: &'static str,
    pub action: TriggerAction,
}

/// The trigger table, longest pattern first (`***` starts with `*`).
pub const TRIGGER_RULES: &[TriggerRule] = &[
    TriggerRule {
        pattern: "***",
        action: TriggerAction::StyleOn {
            style: InlineStyle::Underline,
            clears: &[InlineStyle::Red],
        },
    },
    TriggerRule {
        pattern: "**",
        action: TriggerAction::StyleOn {
            style: InlineStyle::Red,
            clears: &[],
        },
    },
    TriggerRule {
        pattern: "*",
        action: TriggerAction::StyleOn {
            style: InlineStyle::Bold,
            clears: &[],
        },
    },
    TriggerRule {
        pattern: "#",
        action: TriggerAction::SetBlockType(BlockType::HeadingOne),
    },
];

/// A detected trigger, ready to be applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trigger {
    /// The matched pattern text.
    pub pattern: &'static str,
    pub action: TriggerAction,
    /// The block the pattern was typed in.
    pub block: BlockKey,
    /// The char range of the pattern text to remove.
    pub clear: Range<usize>,
}

/// The result of applying a trigger: the new snapshot with the pattern
/// text removed, the collapsed caret, the change reason for the
/// transition, and the style to activate at the caret (if any).
#[derive(Clone, Debug)]
pub struct Applied {
    pub snapshot: ContentSnapshot,
    pub caret: Position,
    pub reason: ChangeReason,
    pub style_effect: Option<StyleEffect>,
}

/// A style change to apply at the caret so that subsequently typed
/// characters inherit it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleEffect {
    pub activate: InlineStyle,
    pub clear: &'static [InlineStyle],
}

/// Decide whether inserting `inserted` at the current selection
/// completes a trigger.
///
/// A trigger only fires for [`TRIGGER_CHAR`] on a collapsed cursor,
/// and only when the block text from offset 0 to the cursor exactly
/// equals a pattern — `"a#"` followed by a space must not convert.
pub fn detect(
    snapshot: &ContentSnapshot,
    selection: &Selection,
    inserted: char,
) -> Option<Trigger> {
    if inserted != TRIGGER_CHAR || !selection.is_collapsed() {
        return None;
    }
    let cursor = selection.focus;
    let block = snapshot.block(cursor.block)?;

    for rule in TRIGGER_RULES {
        let len = rule.pattern.chars().count();
        if cursor.offset == len && block.text().chars().take(len).eq(rule.pattern.chars()) {
            return Some(Trigger {
                pattern: rule.pattern,
                action: rule.action,
                block: cursor.block,
                clear: 0..len,
            });
        }
    }
    None
}

/// Apply a trigger to a snapshot.
///
/// The pattern text is removed (collapsing the caret to offset 0) and
/// the formatting action takes effect, all described by one [`Applied`]
/// value so the caller can commit it as a single transition. If the
/// trigger's block has disappeared from the snapshot the prior state
/// is left untouched and [`EditorError::StaleReference`] is returned.
pub fn apply(snapshot: &ContentSnapshot, trigger: &Trigger) -> Result<Applied, EditorError> {
    let cleared = snapshot.remove_in_block(trigger.block, trigger.clear.start, trigger.clear.end)?;
    let caret = Position::new(trigger.block, 0);

    match trigger.action {
        TriggerAction::SetBlockType(block_type) => Ok(Applied {
            snapshot: cleared.set_block_type(trigger.block, block_type)?,
            caret,
            reason: ChangeReason::ChangeBlockType,
            style_effect: None,
        }),
        TriggerAction::StyleOn { style, clears } => Ok(Applied {
            snapshot: cleared,
            caret,
            reason: ChangeReason::ChangeInlineStyle,
            style_effect: Some(StyleEffect {
                activate: style,
                clear: clears,
            }),
        }),
    }
}
