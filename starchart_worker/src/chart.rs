// Copyright 2026 the Starchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Game-side data sources.

use starchart_location::{
    LockFlags, ObjectEntry, ObjectList, Playability, Position, Reference, ReferenceKind,
};

/// Game-side answers to coordinator queries.
///
/// Implementations run on the worker thread, one call at a time.
pub trait Starchart: Send + 'static {
    /// Builds the object list for `pos`.
    fn object_list(&mut self, pos: Position) -> ObjectList;

    /// Resolves a lock near `pos` to the position of the chosen object.
    ///
    /// Returns `pos` itself when nothing qualifies.
    fn lock_object(&mut self, pos: Position, flags: LockFlags) -> Position;
}

/// An object placed on a [`StaticChart`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartObject {
    /// What the object is.
    pub reference: Reference,
    /// Where it sits.
    pub position: Position,
    /// Display label; defaults to the reference's display form.
    pub label: String,
    /// Whether the object is marked.
    pub marked: bool,
    /// Player access level.
    pub playability: Playability,
    /// Display color index.
    pub color: u8,
}

impl ChartObject {
    /// Creates an unmarked object at `position`.
    pub fn new(reference: Reference, position: Position) -> Self {
        Self {
            reference,
            position,
            label: reference.to_string(),
            marked: false,
            playability: Playability::default(),
            color: 0,
        }
    }

    /// Sets the label.
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

    /// Sets the playability.
    #[must_use]
    pub fn with_playability(mut self, playability: Playability) -> Self {
        self.playability = playability;
        self
    }

    /// Sets the color index.
    #[must_use]
    pub fn with_color(mut self, color: u8) -> Self {
        self.color = color;
        self
    }

    fn entry(&self) -> ObjectEntry {
        ObjectEntry::new(self.reference)
            .with_label(self.label.clone())
            .with_marked(self.marked)
            .with_playability(self.playability)
            .with_color(self.color)
    }

    fn qualifies(&self, flags: LockFlags) -> bool {
        (self.marked || !flags.contains(LockFlags::MARKED_ONLY))
            && (self.reference.kind == ReferenceKind::Planet || !flags.contains(LockFlags::LEFT))
    }
}

/// An in-memory chart with a fixed set of objects.
#[derive(Clone, Debug, Default)]
pub struct StaticChart {
    objects: Vec<ChartObject>,
}

impl StaticChart {
    /// Creates an empty chart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an object. Insertion order breaks distance ties in locks.
    pub fn push(&mut self, object: ChartObject) {
        self.objects.push(object);
    }

    /// Returns all objects in insertion order.
    pub fn objects(&self) -> &[ChartObject] {
        &self.objects
    }
}

impl FromIterator<ChartObject> for StaticChart {
    fn from_iter<I: IntoIterator<Item = ChartObject>>(iter: I) -> Self {
        Self {
            objects: iter.into_iter().collect(),
        }
    }
}

impl Starchart for StaticChart {
    /// One divider per kind present at `pos`, in kind order, followed by that
    /// kind's objects in insertion order.
    fn object_list(&mut self, pos: Position) -> ObjectList {
        let mut here: Vec<&ChartObject> =
            self.objects.iter().filter(|o| o.position == pos).collect();
        // Stable, so insertion order survives within a kind.
        here.sort_by_key(|o| o.reference.kind);

        let mut list = ObjectList::new();
        let mut current = None;
        for object in here {
            if current != Some(object.reference.kind) {
                current = Some(object.reference.kind);
                list.add_divider(object.reference.kind.as_str());
            }
            list.push(object.entry());
        }
        list
    }

    fn lock_object(&mut self, pos: Position, flags: LockFlags) -> Position {
        self.objects
            .iter()
            .filter(|o| o.qualifies(flags))
            .min_by_key(|o| o.position.distance_squared(pos))
            .map_or(pos, |o| o.position)
    }
}
