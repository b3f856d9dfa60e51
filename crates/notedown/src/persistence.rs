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

//! Saving and restoring documents.
//!
//! [`DocumentStore`] is a pure encode/decode boundary: it neither owns
//! nor caches the live snapshot. It serializes a versioned
//! [`PersistedDocument`] as JSON under the fixed key [`CONTENT_KEY`]
//! of an injected [`KeyValueStore`]. Save failures surface as
//! [`StorageError`]; unreadable or corrupt saved data is logged and
//! treated as "nothing saved", so loading can never crash the editor.
//!
//! Selection is deliberately not persisted — a restored document
//! always starts with the caret at the document start.

use std::collections::HashMap;
use std::collections::HashSet;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::content::{Block, BlockKey, ContentSnapshot, StyleRange};
use crate::error::{DecodeError, StorageError};
use crate::{BlockType, InlineStyle};

/// The fixed key documents are stored under.
pub const CONTENT_KEY: &str = "content";

/// The current encoding version. Bump when the shape of
/// [`PersistedDocument`] changes incompatibly.
pub const FORMAT_VERSION: u32 = 1;

/// A flat key-value store the persistence adapter writes to.
///
/// Implementations only need whole-value get/set; the adapter handles
/// encoding. [`FileStore`] is the real one, [`MemoryStore`] the fake
/// for tests.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` when absent.
    fn get(&self, key: &str) -> io::Result<Option<String>>;

    /// Write `value` under `key`, replacing any prior value.
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

/// A [`KeyValueStore`] keeping one file per key under a root
/// directory.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::write(self.path_for(key), value)
    }
}

/// An in-memory [`KeyValueStore`] for tests.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        let entries = self.entries.lock().expect("memory store poisoned");
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.entries.lock().expect("memory store poisoned");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The serialized form of a document.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistedDocument {
    pub version: u32,
    pub blocks: Vec<PersistedBlock>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistedBlock {
    pub key: u64,
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: String,
    #[serde(default)]
    pub styles: Vec<PersistedStyleRange>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersistedStyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: String,
}

impl PersistedDocument {
    pub fn from_snapshot(snapshot: &ContentSnapshot) -> Self {
        let blocks = snapshot
            .blocks()
            .iter()
            .map(|block| PersistedBlock {
                key: block.key().as_u64(),
                block_type: block.block_type().to_string(),
                text: block.text().to_string(),
                styles: block
                    .styles()
                    .iter()
                    .map(|range| PersistedStyleRange {
                        offset: range.start,
                        length: range.end - range.start,
                        style: range.style.to_string(),
                    })
                    .collect(),
            })
            .collect();
        Self {
            version: FORMAT_VERSION,
            blocks,
        }
    }

    /// Reconstruct the snapshot, validating the encoding as we go.
    pub fn into_snapshot(self) -> Result<ContentSnapshot, DecodeError> {
        if self.version != FORMAT_VERSION {
            return Err(DecodeError::Version(self.version));
        }
        if self.blocks.is_empty() {
            return Err(DecodeError::Empty);
        }

        let mut seen_keys = HashSet::new();
        let mut blocks = Vec::with_capacity(self.blocks.len());
        for persisted in self.blocks {
            if !seen_keys.insert(persisted.key) {
                return Err(DecodeError::DuplicateKey(persisted.key));
            }
            let block_type: BlockType = persisted
                .block_type
                .parse()
                .map_err(|_| DecodeError::UnknownTag(persisted.block_type.clone()))?;

            let text_len = persisted.text.chars().count();
            let mut styles = Vec::with_capacity(persisted.styles.len());
            for range in persisted.styles {
                let style: InlineStyle = range
                    .style
                    .parse()
                    .map_err(|_| DecodeError::UnknownTag(range.style.clone()))?;
                let end = range
                    .offset
                    .checked_add(range.length)
                    .filter(|end| *end <= text_len)
                    .ok_or(DecodeError::RangeOutOfBounds(persisted.key))?;
                styles.push(StyleRange::new(range.offset, end, style));
            }

            blocks.push(Block::new(
                BlockKey::new(persisted.key),
                block_type,
                persisted.text,
                styles,
            ));
        }
        Ok(ContentSnapshot::from_blocks(blocks))
    }
}

/// The persistence adapter: encodes snapshots in and out of one fixed
/// storage key.
///
/// Construct it once with the store to use and inject it wherever the
/// save/load surface lives; swap in a [`MemoryStore`] for tests.
pub struct DocumentStore<S> {
    store: S,
}

impl<S: KeyValueStore> DocumentStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Serialize `snapshot` and write it under [`CONTENT_KEY`],
    /// overwriting any prior save.
    ///
    /// `Ok(())` is the success confirmation; failures are returned for
    /// the caller to surface, never swallowed or retried here.
    pub fn save(&self, snapshot: &ContentSnapshot) -> Result<(), StorageError> {
        let document = PersistedDocument::from_snapshot(snapshot);
        let encoded = serde_json::to_string(&document)?;
        self.store.set(CONTENT_KEY, &encoded)?;
        debug!(blocks = document.blocks.len(), "saved document");
        Ok(())
    }

    /// Read and decode the saved document, if any.
    ///
    /// Returns `None` when nothing was saved, and also when the saved
    /// value is unreadable or fails to decode — those are logged, and
    /// the editor starts from an empty document instead of crashing.
    pub fn load(&self) -> Option<ContentSnapshot> {
        let encoded = match self.store.get(CONTENT_KEY) {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(error) => {
                warn!(%error, "failed to read saved document");
                return None;
            }
        };
        match decode(&encoded) {
            Ok(snapshot) => Some(snapshot),
            Err(error) => {
                warn!(%error, "discarding corrupt saved document");
                None
            }
        }
    }
}

fn decode(encoded: &str) -> Result<ContentSnapshot, DecodeError> {
    let document: PersistedDocument = serde_json::from_str(encoded)?;
    document.into_snapshot()
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::{
        DocumentStore, FileStore, KeyValueStore, MemoryStore, CONTENT_KEY,
    };
    use crate::{EditorModel, InlineStyle, StorageError};

    /// A store whose writes always fail, for the save-failure path.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> io::Result<Option<String>> {
            Err(io::Error::other("store offline"))
        }

        fn set(&self, _key: &str, _value: &str) -> io::Result<()> {
            Err(io::Error::other("quota exceeded"))
        }
    }

    fn model_with_formatted_text() -> EditorModel {
        let mut model = EditorModel::new();
        model.replace_text("#");
        model.handle_before_input(' ');
        model.replace_text("Title");
        model.enter();
        model.bold();
        model.replace_text("bold body");
        model
    }

    // ===================================================================
    // Round trip
    // ===================================================================

    #[test]
    fn save_then_load_restores_blocks_exactly() {
        let model = model_with_formatted_text();
        let store = DocumentStore::new(MemoryStore::new());
        store.save(model.snapshot()).expect("save");

        let loaded = store.load().expect("a saved document");
        assert_eq!(loaded.blocks(), model.snapshot().blocks());
    }

    #[test]
    fn round_trip_preserves_block_types_and_styles() {
        let model = model_with_formatted_text();
        let store = DocumentStore::new(MemoryStore::new());
        store.save(model.snapshot()).expect("save");

        let loaded = store.load().expect("a saved document");
        assert_eq!(
            loaded.blocks()[0].block_type(),
            crate::BlockType::HeadingOne
        );
        assert_eq!(loaded.blocks()[0].text(), "Title");
        assert!(loaded.blocks()[1].is_range_styled(0, 9, InlineStyle::Bold));
    }

    #[test]
    fn saving_twice_overwrites_the_previous_document() {
        let store = DocumentStore::new(MemoryStore::new());
        let mut model = EditorModel::new();
        model.replace_text("first");
        store.save(model.snapshot()).expect("save");
        model.clear();
        model.replace_text("second");
        store.save(model.snapshot()).expect("save");

        let loaded = store.load().expect("a saved document");
        assert_eq!(loaded.plain_text(), "second");
    }

    #[test]
    fn a_restored_model_starts_with_a_default_selection() {
        let model = model_with_formatted_text();
        let store = DocumentStore::new(MemoryStore::new());
        store.save(model.snapshot()).expect("save");

        let restored = EditorModel::with_snapshot(store.load().expect("saved"));
        let first = restored.snapshot().first_block().key();
        assert_eq!(
            restored.get_selection(),
            crate::Selection::caret(crate::Position::new(first, 0))
        );
    }

    // ===================================================================
    // Missing / corrupt data
    // ===================================================================

    #[test]
    fn load_with_nothing_saved_yields_none() {
        let store = DocumentStore::new(MemoryStore::new());
        assert!(store.load().is_none());
    }

    #[test]
    fn corrupt_json_falls_back_to_none() {
        let memory = MemoryStore::new();
        memory.set(CONTENT_KEY, "{not json").expect("set");
        let store = DocumentStore::new(memory);
        assert!(store.load().is_none());
    }

    #[test]
    fn unknown_version_falls_back_to_none() {
        let memory = MemoryStore::new();
        memory
            .set(
                CONTENT_KEY,
                r#"{"version":99,"blocks":[{"key":0,"type":"paragraph","text":""}]}"#,
            )
            .expect("set");
        let store = DocumentStore::new(memory);
        assert!(store.load().is_none());
    }

    #[test]
    fn empty_block_list_falls_back_to_none() {
        let memory = MemoryStore::new();
        memory
            .set(CONTENT_KEY, r#"{"version":1,"blocks":[]}"#)
            .expect("set");
        let store = DocumentStore::new(memory);
        assert!(store.load().is_none());
    }

    #[test]
    fn out_of_bounds_style_range_falls_back_to_none() {
        let memory = MemoryStore::new();
        memory
            .set(
                CONTENT_KEY,
                r#"{"version":1,"blocks":[{"key":0,"type":"paragraph","text":"ab","styles":[{"offset":1,"length":5,"style":"bold"}]}]}"#,
            )
            .expect("set");
        let store = DocumentStore::new(memory);
        assert!(store.load().is_none());
    }

    #[test]
    fn unknown_style_tag_falls_back_to_none() {
        let memory = MemoryStore::new();
        memory
            .set(
                CONTENT_KEY,
                r#"{"version":1,"blocks":[{"key":0,"type":"paragraph","text":"ab","styles":[{"offset":0,"length":1,"style":"blink"}]}]}"#,
            )
            .expect("set");
        let store = DocumentStore::new(memory);
        assert!(store.load().is_none());
    }

    #[test]
    fn unreadable_store_falls_back_to_none() {
        let store = DocumentStore::new(BrokenStore);
        assert!(store.load().is_none());
    }

    // ===================================================================
    // Save failure
    // ===================================================================

    #[test]
    fn save_failure_surfaces_a_storage_error() {
        let model = model_with_formatted_text();
        let store = DocumentStore::new(BrokenStore);
        let err = store.save(model.snapshot()).unwrap_err();
        assert!(matches!(err, StorageError::Write(_)));
    }

    #[test]
    fn save_failure_does_not_touch_the_document() {
        let model = model_with_formatted_text();
        let before = model.snapshot().clone();
        let store = DocumentStore::new(BrokenStore);
        let _ = store.save(model.snapshot());
        assert_eq!(model.snapshot(), &before);
    }

    // ===================================================================
    // FileStore
    // ===================================================================

    #[test]
    fn file_store_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let model = model_with_formatted_text();
        let store = DocumentStore::new(FileStore::new(dir.path()));
        store.save(model.snapshot()).expect("save");

        let loaded = store.load().expect("a saved document");
        assert_eq!(loaded.blocks(), model.snapshot().blocks());
    }

    #[test]
    fn file_store_missing_file_yields_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = DocumentStore::new(FileStore::new(dir.path()));
        assert!(store.load().is_none());
    }

    #[test]
    fn file_store_creates_its_root_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("saves").join("notes");
        let store = DocumentStore::new(FileStore::new(&nested));
        let model = EditorModel::new();
        store.save(model.snapshot()).expect("save");
        assert!(nested.join("content.json").exists());
    }
}
