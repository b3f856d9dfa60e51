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

//! A single block (one paragraph/line unit) and its inline styles.

use std::collections::BTreeSet;
use std::fmt;

use crate::{BlockType, InlineStyle};

/// An opaque, session-stable identifier for a [`Block`].
///
/// Keys are minted by the snapshot when blocks are created and never
/// reused within a document; selections and autoformat triggers refer
/// to blocks by key so they survive reordering edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockKey(u64);

impl BlockKey {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

/// One inline style applied over `[start, end)` char offsets of a
/// block's text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleRange {
    pub start: usize,
    pub end: usize,
    pub style: InlineStyle,
}

impl StyleRange {
    pub const fn new(start: usize, end: usize, style: InlineStyle) -> Self {
        Self { start, end, style }
    }

    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// One paragraph/line unit: a block type, text, and inline style
/// ranges.
///
/// Style ranges are kept normalized: sorted by position, with
/// overlapping or adjacent ranges of the same style merged, and every
/// range within `[0, char_len()]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    key: BlockKey,
    block_type: BlockType,
    text: String,
    styles: Vec<StyleRange>,
}

impl Block {
    pub(crate) fn new(
        key: BlockKey,
        block_type: BlockType,
        text: String,
        styles: Vec<StyleRange>,
    ) -> Self {
        let mut block = Self {
            key,
            block_type,
            text,
            styles,
        };
        block.normalize_styles();
        block
    }

    pub fn key(&self) -> BlockKey {
        self.key
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn styles(&self) -> &[StyleRange] {
        &self.styles
    }

    /// The text length in chars. All offsets into a block use this
    /// unit.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// The styles covering the character at `index`.
    pub fn styles_covering(&self, index: usize) -> BTreeSet<InlineStyle> {
        self.styles
            .iter()
            .filter(|r| r.start <= index && index < r.end)
            .map(|r| r.style)
            .collect()
    }

    /// The styles a character typed at `offset` would inherit from the
    /// surrounding text: the styles of the character before the
    /// cursor, or of the first character when the cursor sits at the
    /// block start.
    pub fn styles_at(&self, offset: usize) -> BTreeSet<InlineStyle> {
        if self.text.is_empty() {
            return BTreeSet::new();
        }
        let index = offset.saturating_sub(1).min(self.char_len() - 1);
        self.styles_covering(index)
    }

    /// Whether every character in `[start, end)` carries `style`.
    pub fn is_range_styled(&self, start: usize, end: usize, style: InlineStyle) -> bool {
        if start >= end {
            return false;
        }
        // Ranges are normalized, so full coverage means a single range
        // spans the whole query.
        self.styles
            .iter()
            .any(|r| r.style == style && r.start <= start && end <= r.end)
    }

    pub(crate) fn set_block_type(&mut self, block_type: BlockType) {
        self.block_type = block_type;
    }

    /// Insert `new_text` at `offset` (clamped to the text length),
    /// carrying `styles` on the inserted characters. Existing ranges
    /// strictly containing the offset grow with the insertion.
    pub(crate) fn insert(
        &mut self,
        offset: usize,
        new_text: &str,
        styles: &BTreeSet<InlineStyle>,
    ) {
        if new_text.is_empty() {
            return;
        }
        let offset = offset.min(self.char_len());
        let inserted = new_text.chars().count();

        let byte = byte_of_char(&self.text, offset);
        self.text.insert_str(byte, new_text);

        for range in &mut self.styles {
            if range.end <= offset {
                // Entirely before the insertion point.
            } else if range.start >= offset {
                range.start += inserted;
                range.end += inserted;
            } else {
                // The insertion lands inside the range.
                range.end += inserted;
            }
        }
        for style in styles {
            self.styles
                .push(StyleRange::new(offset, offset + inserted, *style));
        }
        self.normalize_styles();
    }

    /// Remove the chars in `[start, end)` (clamped), shifting and
    /// clipping style ranges accordingly.
    pub(crate) fn remove_range(&mut self, start: usize, end: usize) {
        let len = self.char_len();
        let start = start.min(len);
        let end = end.clamp(start, len);
        if start == end {
            return;
        }
        let removed = end - start;

        let byte_start = byte_of_char(&self.text, start);
        let byte_end = byte_of_char(&self.text, end);
        self.text.replace_range(byte_start..byte_end, "");

        let shift = |offset: usize| {
            if offset <= start {
                offset
            } else if offset >= end {
                offset - removed
            } else {
                start
            }
        };
        for range in &mut self.styles {
            range.start = shift(range.start);
            range.end = shift(range.end);
        }
        self.normalize_styles();
    }

    /// Append `other`'s text and styles to this block, shifting
    /// `other`'s ranges past this block's text.
    pub(crate) fn append(&mut self, other: Block) {
        let shift = self.char_len();
        self.text.push_str(&other.text);
        for range in other.styles {
            self.styles.push(StyleRange::new(
                range.start + shift,
                range.end + shift,
                range.style,
            ));
        }
        self.normalize_styles();
    }

    /// Mark `[start, end)` with `style`.
    pub(crate) fn apply_style(&mut self, start: usize, end: usize, style: InlineStyle) {
        let len = self.char_len();
        let start = start.min(len);
        let end = end.clamp(start, len);
        self.styles.push(StyleRange::new(start, end, style));
        self.normalize_styles();
    }

    /// Remove `style` from `[start, end)`, splitting any range that
    /// extends past the cleared region.
    pub(crate) fn remove_style(&mut self, start: usize, end: usize, style: InlineStyle) {
        let mut kept = Vec::with_capacity(self.styles.len());
        for range in self.styles.drain(..) {
            if range.style != style || range.end <= start || range.start >= end {
                kept.push(range);
                continue;
            }
            if range.start < start {
                kept.push(StyleRange::new(range.start, start, style));
            }
            if range.end > end {
                kept.push(StyleRange::new(end, range.end, style));
            }
        }
        self.styles = kept;
        self.normalize_styles();
    }

    /// Restore the style-range invariants: drop empty ranges, merge
    /// overlapping/adjacent ranges of the same style, sort by
    /// position.
    fn normalize_styles(&mut self) {
        let len = self.char_len();
        debug_assert!(
            self.styles.iter().all(|r| r.start <= r.end && r.end <= len),
            "style range out of bounds in {}",
            self.key,
        );
        self.styles.retain(|r| !r.is_empty());
        self.styles.sort_by_key(|r| (r.style, r.start, r.end));

        let mut merged: Vec<StyleRange> = Vec::with_capacity(self.styles.len());
        for range in self.styles.drain(..) {
            match merged.last_mut() {
                Some(last) if last.style == range.style && range.start <= last.end => {
                    last.end = last.end.max(range.end);
                }
                _ => merged.push(range),
            }
        }
        merged.sort_by_key(|r| (r.start, r.end, r.style));
        self.styles = merged;
    }
}

/// Byte index of the char at `char_offset`, or the text length when
/// the offset is at (or past) the end.
fn byte_of_char(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{Block, BlockKey, StyleRange};
    use crate::{BlockType, InlineStyle};

    fn block(text: &str, styles: Vec<StyleRange>) -> Block {
        Block::new(BlockKey::new(0), BlockType::Paragraph, text.into(), styles)
    }

    fn bold(start: usize, end: usize) -> StyleRange {
        StyleRange::new(start, end, InlineStyle::Bold)
    }

    // ===================================================================
    // Normalization
    // ===================================================================

    #[test]
    fn overlapping_ranges_of_same_style_are_merged() {
        let b = block("abcdef", vec![bold(0, 3), bold(2, 5)]);
        assert_eq!(b.styles(), &[bold(0, 5)]);
    }

    #[test]
    fn adjacent_ranges_of_same_style_are_merged() {
        let b = block("abcdef", vec![bold(0, 2), bold(2, 4)]);
        assert_eq!(b.styles(), &[bold(0, 4)]);
    }

    #[test]
    fn ranges_of_different_styles_are_kept_separate() {
        let red = StyleRange::new(0, 2, InlineStyle::Red);
        let b = block("abcdef", vec![bold(0, 2), red]);
        assert_eq!(b.styles(), &[bold(0, 2), red]);
    }

    #[test]
    fn empty_ranges_are_dropped() {
        let b = block("abc", vec![bold(1, 1)]);
        assert!(b.styles().is_empty());
    }

    // ===================================================================
    // Insertion
    // ===================================================================

    #[test]
    fn inserting_shifts_later_ranges() {
        let mut b = block("abcdef", vec![bold(3, 5)]);
        b.insert(0, "xx", &BTreeSet::new());
        assert_eq!(b.text(), "xxabcdef");
        assert_eq!(b.styles(), &[bold(5, 7)]);
    }

    #[test]
    fn inserting_inside_a_range_grows_it() {
        let mut b = block("abcd", vec![bold(1, 3)]);
        b.insert(2, "x", &BTreeSet::new());
        assert_eq!(b.text(), "abxcd");
        assert_eq!(b.styles(), &[bold(1, 4)]);
    }

    #[test]
    fn inserting_at_a_range_end_does_not_grow_it() {
        let mut b = block("abcd", vec![bold(1, 3)]);
        b.insert(3, "x", &BTreeSet::new());
        assert_eq!(b.text(), "abcxd");
        assert_eq!(b.styles(), &[bold(1, 3)]);
    }

    #[test]
    fn inserting_with_styles_marks_the_inserted_chars() {
        let mut b = block("ab", vec![]);
        let styles: BTreeSet<_> = [InlineStyle::Bold, InlineStyle::Red].into();
        b.insert(1, "xyz", &styles);
        assert_eq!(b.text(), "axyzb");
        assert_eq!(
            b.styles(),
            &[bold(1, 4), StyleRange::new(1, 4, InlineStyle::Red)]
        );
    }

    #[test]
    fn inserting_styled_text_adjacent_to_same_style_merges() {
        let mut b = block("ab", vec![bold(0, 2)]);
        let styles: BTreeSet<_> = [InlineStyle::Bold].into();
        b.insert(2, "c", &styles);
        assert_eq!(b.styles(), &[bold(0, 3)]);
    }

    #[test]
    fn insert_offset_past_end_is_clamped() {
        let mut b = block("ab", vec![]);
        b.insert(10, "c", &BTreeSet::new());
        assert_eq!(b.text(), "abc");
    }

    #[test]
    fn insert_multibyte_text_uses_char_offsets() {
        let mut b = block("a\u{1F4A9}b", vec![]);
        b.insert(2, "x", &BTreeSet::new());
        assert_eq!(b.text(), "a\u{1F4A9}xb");
    }

    // ===================================================================
    // Removal
    // ===================================================================

    #[test]
    fn removing_before_a_range_shifts_it() {
        let mut b = block("abcdef", vec![bold(3, 5)]);
        b.remove_range(0, 2);
        assert_eq!(b.text(), "cdef");
        assert_eq!(b.styles(), &[bold(1, 3)]);
    }

    #[test]
    fn removing_inside_a_range_shrinks_it() {
        let mut b = block("abcdef", vec![bold(1, 5)]);
        b.remove_range(2, 4);
        assert_eq!(b.text(), "abef");
        assert_eq!(b.styles(), &[bold(1, 3)]);
    }

    #[test]
    fn removing_a_whole_range_drops_it() {
        let mut b = block("abcdef", vec![bold(2, 4)]);
        b.remove_range(2, 4);
        assert_eq!(b.text(), "abef");
        assert!(b.styles().is_empty());
    }

    #[test]
    fn removing_everything_clears_text_and_styles() {
        let mut b = block("abc", vec![bold(0, 3)]);
        b.remove_range(0, 3);
        assert_eq!(b.text(), "");
        assert!(b.styles().is_empty());
    }

    // ===================================================================
    // Append
    // ===================================================================

    #[test]
    fn append_concatenates_text_and_shifts_styles() {
        let mut a = block("ab", vec![bold(0, 1)]);
        let b = block("cd", vec![StyleRange::new(1, 2, InlineStyle::Red)]);
        a.append(b);
        assert_eq!(a.text(), "abcd");
        assert_eq!(
            a.styles(),
            &[bold(0, 1), StyleRange::new(3, 4, InlineStyle::Red)]
        );
    }

    // ===================================================================
    // Style application / removal
    // ===================================================================

    #[test]
    fn apply_style_marks_the_range() {
        let mut b = block("abcdef", vec![]);
        b.apply_style(1, 4, InlineStyle::Underline);
        assert_eq!(b.styles(), &[StyleRange::new(1, 4, InlineStyle::Underline)]);
    }

    #[test]
    fn remove_style_splits_a_wider_range() {
        let mut b = block("abcdef", vec![bold(0, 6)]);
        b.remove_style(2, 4, InlineStyle::Bold);
        assert_eq!(b.styles(), &[bold(0, 2), bold(4, 6)]);
    }

    #[test]
    fn remove_style_leaves_other_styles_alone() {
        let red = StyleRange::new(0, 6, InlineStyle::Red);
        let mut b = block("abcdef", vec![bold(0, 6), red]);
        b.remove_style(0, 6, InlineStyle::Bold);
        assert_eq!(b.styles(), &[red]);
    }

    // ===================================================================
    // Queries
    // ===================================================================

    #[test]
    fn styles_covering_reports_styles_at_an_index() {
        let b = block("abcdef", vec![bold(1, 3)]);
        assert!(b.styles_covering(1).contains(&InlineStyle::Bold));
        assert!(b.styles_covering(2).contains(&InlineStyle::Bold));
        assert!(b.styles_covering(3).is_empty());
    }

    #[test]
    fn styles_at_uses_the_char_before_the_cursor() {
        let b = block("abcdef", vec![bold(0, 3)]);
        assert!(b.styles_at(3).contains(&InlineStyle::Bold));
        assert!(b.styles_at(4).is_empty());
    }

    #[test]
    fn styles_at_block_start_uses_the_first_char() {
        let b = block("abc", vec![bold(0, 1)]);
        assert!(b.styles_at(0).contains(&InlineStyle::Bold));
    }

    #[test]
    fn styles_at_on_empty_block_is_empty() {
        let b = block("", vec![]);
        assert!(b.styles_at(0).is_empty());
    }

    #[test]
    fn is_range_styled_requires_full_coverage() {
        let b = block("abcdef", vec![bold(0, 3)]);
        assert!(b.is_range_styled(0, 3, InlineStyle::Bold));
        assert!(b.is_range_styled(1, 2, InlineStyle::Bold));
        assert!(!b.is_range_styled(0, 4, InlineStyle::Bold));
        assert!(!b.is_range_styled(2, 2, InlineStyle::Bold));
    }
}
