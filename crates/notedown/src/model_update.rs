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

//! Update descriptors returned by every model operation.

use std::collections::HashMap;

use crate::content::{ContentSnapshot, Selection};
use crate::{ActionState, ChangeReason, EditorAction};

/// What a model operation changed, for the consuming platform layer.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelUpdate {
    pub text_update: TextUpdate,
    pub menu_state: MenuState,
}

/// The content/selection part of a [`ModelUpdate`].
#[derive(Clone, Debug, PartialEq)]
pub enum TextUpdate {
    /// Nothing changed.
    Keep,
    /// The document changed; re-render from the snapshot.
    ReplaceAll(ReplaceAll),
    /// Only the selection moved.
    Select(SelectionUpdate),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReplaceAll {
    pub snapshot: ContentSnapshot,
    pub selection: Selection,
    /// Why the snapshot was replaced, for history consumers.
    pub reason: ChangeReason,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectionUpdate {
    pub selection: Selection,
}

/// The toolbar part of a [`ModelUpdate`].
#[derive(Clone, Debug, PartialEq)]
pub enum MenuState {
    Keep,
    Update(MenuStateUpdate),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuStateUpdate {
    pub action_states: HashMap<EditorAction, ActionState>,
}

impl ModelUpdate {
    pub fn keep() -> Self {
        Self {
            text_update: TextUpdate::Keep,
            menu_state: MenuState::Keep,
        }
    }

    pub fn replace_all(
        snapshot: ContentSnapshot,
        selection: Selection,
        reason: ChangeReason,
        menu_state: MenuState,
    ) -> Self {
        Self {
            text_update: TextUpdate::ReplaceAll(ReplaceAll {
                snapshot,
                selection,
                reason,
            }),
            menu_state,
        }
    }

    pub fn update_selection(selection: Selection, menu_state: MenuState) -> Self {
        Self {
            text_update: TextUpdate::Select(SelectionUpdate { selection }),
            menu_state,
        }
    }
}
