// Copyright 2026 the Starchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Object lists delivered by the game side for a chart position.

use alloc::string::String;
use alloc::vec::Vec;

use crate::Reference;

/// How far the player may interact with a listed object.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Playability {
    /// Foreign or unknown object.
    #[default]
    NotPlayable,
    /// Own object that may be inspected but not changed.
    ReadOnly,
    /// Own object that can be given orders.
    Playable,
    /// Object editable without game rules (editor mode).
    Editable,
}

/// A reference entry in an [`ObjectList`], with its display metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectEntry {
    /// The object.
    pub reference: Reference,
    /// Display label.
    pub label: String,
    /// Whether the player marked the object.
    pub marked: bool,
    /// Interaction level.
    pub playability: Playability,
    /// Palette index used by renderers.
    pub color: u8,
}

impl ObjectEntry {
    /// Creates an unmarked, non-playable entry labelled with the reference itself.
    #[must_use]
    pub fn new(reference: Reference) -> Self {
        Self {
            reference,
            label: alloc::format!("{reference}"),
            marked: false,
            playability: Playability::NotPlayable,
            color: 0,
        }
    }

    /// Sets the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the marked flag.
    #[must_use]
    pub fn with_marked(mut self, marked: bool) -> Self {
        self.marked = marked;
        self
    }

    /// Sets the interaction level.
    #[must_use]
    pub fn with_playability(mut self, playability: Playability) -> Self {
        self.playability = playability;
        self
    }

    /// Sets the palette index.
    #[must_use]
    pub fn with_color(mut self, color: u8) -> Self {
        self.color = color;
        self
    }
}

/// One row of an [`ObjectList`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObjectItem {
    /// Section heading; never focusable.
    Divider {
        /// Heading text.
        label: String,
    },
    /// A map object.
    Object(ObjectEntry),
}

impl ObjectItem {
    /// Creates a divider row.
    #[must_use]
    pub fn divider(label: impl Into<String>) -> Self {
        Self::Divider {
            label: label.into(),
        }
    }

    /// Returns the referenced object, or `None` for dividers.
    #[must_use]
    pub fn reference(&self) -> Option<Reference> {
        match self {
            Self::Divider { .. } => None,
            Self::Object(entry) => Some(entry.reference),
        }
    }

    /// Returns `true` for marked object rows.
    #[must_use]
    pub fn is_marked(&self) -> bool {
        matches!(self, Self::Object(entry) if entry.marked)
    }

    /// Returns the row label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Divider { label } => label,
            Self::Object(entry) => &entry.label,
        }
    }
}

impl From<ObjectEntry> for ObjectItem {
    fn from(entry: ObjectEntry) -> Self {
        Self::Object(entry)
    }
}

/// Ordered snapshot of the objects at some chart position.
///
/// A list is tied to the position it was requested for, which is not
/// necessarily the cursor position at the time it arrives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectList {
    items: Vec<ObjectItem>,
}

impl ObjectList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Appends a row.
    pub fn push(&mut self, item: impl Into<ObjectItem>) {
        self.items.push(item.into());
    }

    /// Appends a divider row.
    pub fn add_divider(&mut self, label: impl Into<String>) {
        self.items.push(ObjectItem::divider(label));
    }

    /// Appends a reference row with default metadata.
    pub fn add_reference(&mut self, reference: Reference, marked: bool) {
        self.items
            .push(ObjectEntry::new(reference).with_marked(marked).into());
    }

    /// Number of rows, dividers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the list has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the row at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ObjectItem> {
        self.items.get(index)
    }

    /// Returns the reference at `index`, or `None` for dividers and out-of-range indices.
    #[must_use]
    pub fn reference_at(&self, index: usize) -> Option<Reference> {
        self.items.get(index).and_then(ObjectItem::reference)
    }

    /// Returns the index of the first row referencing `reference`.
    #[must_use]
    pub fn find(&self, reference: Reference) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.reference() == Some(reference))
    }

    /// Returns the first reference row, skipping dividers.
    #[must_use]
    pub fn first_reference(&self) -> Option<Reference> {
        self.items.iter().find_map(ObjectItem::reference)
    }

    /// Iterates over all rows.
    pub fn iter(&self) -> core::slice::Iter<'_, ObjectItem> {
        self.items.iter()
    }

    /// Removes all rows.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl FromIterator<ObjectItem> for ObjectList {
    fn from_iter<T: IntoIterator<Item = ObjectItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ObjectList {
    type Item = &'a ObjectItem;
    type IntoIter = core::slice::Iter<'a, ObjectItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
