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

//! Content access: plain text and HTML views, clearing.

use crate::content::{Block, Position, Selection};
use crate::{BlockType, ChangeReason, InlineStyle, ModelUpdate};

use super::EditorModel;

impl EditorModel {
    /// Plain text: all block texts joined with `\n`, formatting
    /// stripped.
    pub fn get_content_as_plain_text(&self) -> String {
        self.snapshot.plain_text()
    }

    /// An HTML view of the document, for hosts that render HTML.
    ///
    /// Each block becomes a `<p>` or `<h1>` element; styled runs are
    /// wrapped in `<strong>`, `<span style="color:red">` and `<u>`.
    pub fn get_content_as_html(&self) -> String {
        self.snapshot
            .blocks()
            .iter()
            .map(render_block)
            .collect::<Vec<_>>()
            .join("")
    }

    /// Drop all content and return to a single empty paragraph.
    pub fn clear(&mut self) -> ModelUpdate {
        let snapshot = self.snapshot.cleared();
        let caret = Position::new(snapshot.first_block().key(), 0);
        self.commit(
            snapshot,
            Selection::caret(caret),
            ChangeReason::RemoveRange,
        );
        self.create_update_replace_all(ChangeReason::RemoveRange)
    }
}

fn render_block(block: &Block) -> String {
    let inner = render_runs(block);
    match block.block_type() {
        BlockType::Paragraph => format!("<p>{inner}</p>"),
        BlockType::HeadingOne => format!("<h1>{inner}</h1>"),
    }
}

/// Render a block's text as runs of identically-styled chars, each
/// wrapped in the tags for its active styles.
fn render_runs(block: &Block) -> String {
    let len = block.char_len();
    let mut out = String::new();
    let mut start = 0;

    while start < len {
        let styles = block.styles_covering(start);
        let mut end = start + 1;
        while end < len && block.styles_covering(end) == styles {
            end += 1;
        }

        let run: String = block
            .text()
            .chars()
            .skip(start)
            .take(end - start)
            .collect();
        let escaped = html_escape::encode_text(&run);

        // Fixed nesting order keeps the output deterministic.
        let active: Vec<InlineStyle> = styles.iter().copied().collect();
        for style in &active {
            out.push_str(open_tag(*style));
        }
        out.push_str(&escaped);
        for style in active.iter().rev() {
            out.push_str(close_tag(*style));
        }

        start = end;
    }
    out
}

fn open_tag(style: InlineStyle) -> &'static str {
    match style {
        InlineStyle::Bold => "<strong>",
        InlineStyle::Red => "<span style=\"color:red\">",
        InlineStyle::Underline => "<u>",
    }
}

fn close_tag(style: InlineStyle) -> &'static str {
    match style {
        InlineStyle::Bold => "</strong>",
        InlineStyle::Red => "</span>",
        InlineStyle::Underline => "</u>",
    }
}
