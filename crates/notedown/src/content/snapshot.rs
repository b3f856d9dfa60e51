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

//! The whole-document snapshot value.

use std::collections::BTreeSet;

use crate::error::EditorError;
use crate::{BlockType, InlineStyle};

use super::{Block, BlockKey, Position, Selection};

/// An immutable whole-document value: an ordered list of blocks plus
/// the counter used to mint fresh block keys.
///
/// A snapshot always contains at least one block. Edit operations take
/// `&self` and return a new snapshot; the model replaces its current
/// snapshot wholesale on every committed edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentSnapshot {
    blocks: Vec<Block>,
    next_key: u64,
}

impl ContentSnapshot {
    /// A document with a single empty paragraph.
    pub fn empty() -> Self {
        Self {
            blocks: vec![Block::new(
                BlockKey::new(0),
                BlockType::Paragraph,
                String::new(),
                Vec::new(),
            )],
            next_key: 1,
        }
    }

    /// A single empty paragraph with a freshly minted key. Used when
    /// clearing a document so keys are never reused within a session.
    pub(crate) fn cleared(&self) -> Self {
        Self {
            blocks: vec![Block::new(
                BlockKey::new(self.next_key),
                BlockType::Paragraph,
                String::new(),
                Vec::new(),
            )],
            next_key: self.next_key + 1,
        }
    }

    /// Rebuild a snapshot from decoded blocks. The key counter resumes
    /// past the highest key present.
    ///
    /// Callers must pass at least one block.
    pub(crate) fn from_blocks(blocks: Vec<Block>) -> Self {
        debug_assert!(!blocks.is_empty(), "a document always has a block");
        let next_key = blocks
            .iter()
            .map(|b| b.key().as_u64() + 1)
            .max()
            .unwrap_or(1);
        Self { blocks, next_key }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn first_block(&self) -> &Block {
        &self.blocks[0]
    }

    pub fn block(&self, key: BlockKey) -> Option<&Block> {
        self.blocks.iter().find(|b| b.key() == key)
    }

    pub fn contains(&self, key: BlockKey) -> bool {
        self.block(key).is_some()
    }

    pub(crate) fn index_of(&self, key: BlockKey) -> Option<usize> {
        self.blocks.iter().position(|b| b.key() == key)
    }

    /// All block texts joined with `\n`.
    pub fn plain_text(&self) -> String {
        let texts: Vec<&str> = self.blocks.iter().map(|b| b.text()).collect();
        texts.join("\n")
    }

    /// The selection's endpoints in document order, or `None` if either
    /// endpoint references a block not in this snapshot.
    pub(crate) fn ordered(&self, selection: &Selection) -> Option<(Position, Position)> {
        let anchor_idx = self.index_of(selection.anchor.block)?;
        let focus_idx = self.index_of(selection.focus.block)?;
        if (anchor_idx, selection.anchor.offset) <= (focus_idx, selection.focus.offset) {
            Some((selection.anchor, selection.focus))
        } else {
            Some((selection.focus, selection.anchor))
        }
    }

    /// Split an ordered selection into per-block `(key, start, end)`
    /// segments.
    pub(crate) fn segments(
        &self,
        start: Position,
        end: Position,
    ) -> Result<Vec<(BlockKey, usize, usize)>, EditorError> {
        let start_idx = self.require(start.block)?;
        let end_idx = self.require(end.block)?;
        if start_idx == end_idx {
            return Ok(vec![(start.block, start.offset, end.offset)]);
        }
        let mut segments =
            vec![(start.block, start.offset, self.blocks[start_idx].char_len())];
        for block in &self.blocks[start_idx + 1..end_idx] {
            segments.push((block.key(), 0, block.char_len()));
        }
        segments.push((end.block, 0, end.offset));
        Ok(segments)
    }

    // ────────────────────────────────────────────────────────────────────
    // Edit operations (each returns a new snapshot)
    // ────────────────────────────────────────────────────────────────────

    /// Insert `text` at a position, carrying `styles` on the inserted
    /// characters.
    pub(crate) fn insert_text(
        &self,
        key: BlockKey,
        offset: usize,
        text: &str,
        styles: &BTreeSet<InlineStyle>,
    ) -> Result<Self, EditorError> {
        let idx = self.require(key)?;
        let mut next = self.clone();
        next.blocks[idx].insert(offset, text, styles);
        Ok(next)
    }

    /// Remove the chars in `[start, end)` of a single block.
    pub(crate) fn remove_in_block(
        &self,
        key: BlockKey,
        start: usize,
        end: usize,
    ) -> Result<Self, EditorError> {
        let idx = self.require(key)?;
        let mut next = self.clone();
        next.blocks[idx].remove_range(start, end);
        Ok(next)
    }

    /// Remove everything between two ordered positions, merging the
    /// boundary blocks when the range spans more than one. Returns the
    /// new snapshot and the caret position at the removal point.
    pub(crate) fn remove_range(
        &self,
        start: Position,
        end: Position,
    ) -> Result<(Self, Position), EditorError> {
        let start_idx = self.require(start.block)?;
        let end_idx = self.require(end.block)?;

        if start_idx == end_idx {
            let next = self.remove_in_block(start.block, start.offset, end.offset)?;
            return Ok((next, Position::new(start.block, start.offset)));
        }

        let mut first = self.blocks[start_idx].clone();
        let first_len = first.char_len();
        first.remove_range(start.offset, first_len);

        let mut tail = self.blocks[end_idx].clone();
        tail.remove_range(0, end.offset);
        first.append(tail);

        let mut next = self.clone();
        next.blocks.splice(start_idx..=end_idx, [first]);
        Ok((next, Position::new(start.block, start.offset)))
    }

    /// Split a block at `offset`: text before stays in the original
    /// block, text after moves to a fresh block inserted right after
    /// it. The new block is a plain paragraph and carries no inline
    /// styles, whatever was active in the original. Returns the new
    /// snapshot and the new block's key.
    pub(crate) fn split_block(
        &self,
        key: BlockKey,
        offset: usize,
    ) -> Result<(Self, BlockKey), EditorError> {
        let idx = self.require(key)?;
        let mut next = self.clone();

        let len = next.blocks[idx].char_len();
        let offset = offset.min(len);
        let tail_text: String = next.blocks[idx].text().chars().skip(offset).collect();
        next.blocks[idx].remove_range(offset, len);

        let new_key = next.mint_key();
        next.blocks.insert(
            idx + 1,
            Block::new(new_key, BlockType::Paragraph, tail_text, Vec::new()),
        );
        Ok((next, new_key))
    }

    /// Merge a block into its predecessor. Returns the new snapshot
    /// and the caret position at the join point. Joining the first
    /// block is a no-op.
    pub(crate) fn join_with_previous(
        &self,
        key: BlockKey,
    ) -> Result<(Self, Position), EditorError> {
        let idx = self.require(key)?;
        if idx == 0 {
            return Ok((self.clone(), Position::new(key, 0)));
        }
        let mut next = self.clone();
        let removed = next.blocks.remove(idx);
        let previous = &mut next.blocks[idx - 1];
        let join_at = previous.char_len();
        let caret = Position::new(previous.key(), join_at);
        previous.append(removed);
        Ok((next, caret))
    }

    pub(crate) fn set_block_type(
        &self,
        key: BlockKey,
        block_type: BlockType,
    ) -> Result<Self, EditorError> {
        let idx = self.require(key)?;
        let mut next = self.clone();
        next.blocks[idx].set_block_type(block_type);
        Ok(next)
    }

    pub(crate) fn apply_style_in(
        &self,
        key: BlockKey,
        start: usize,
        end: usize,
        style: InlineStyle,
    ) -> Result<Self, EditorError> {
        let idx = self.require(key)?;
        let mut next = self.clone();
        next.blocks[idx].apply_style(start, end, style);
        Ok(next)
    }

    pub(crate) fn remove_style_in(
        &self,
        key: BlockKey,
        start: usize,
        end: usize,
        style: InlineStyle,
    ) -> Result<Self, EditorError> {
        let idx = self.require(key)?;
        let mut next = self.clone();
        next.blocks[idx].remove_style(start, end, style);
        Ok(next)
    }

    fn require(&self, key: BlockKey) -> Result<usize, EditorError> {
        self.index_of(key).ok_or(EditorError::StaleReference(key))
    }

    fn mint_key(&mut self) -> BlockKey {
        let key = BlockKey::new(self.next_key);
        self.next_key += 1;
        key
    }
}
