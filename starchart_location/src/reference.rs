// Copyright 2026 the Starchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Opaque references to map objects.

use core::fmt;

/// The kind of map object a [`Reference`] points at.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReferenceKind {
    /// A ship.
    Ship,
    /// A planet.
    Planet,
    /// A starbase orbiting a planet; shares the planet's id.
    Starbase,
    /// An ion storm.
    IonStorm,
    /// A minefield.
    Minefield,
    /// An unidentified object.
    Ufo,
}

impl ReferenceKind {
    /// Human-readable name, used for dividers and display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ship => "Ship",
            Self::Planet => "Planet",
            Self::Starbase => "Starbase",
            Self::IonStorm => "Ion storm",
            Self::Minefield => "Minefield",
            Self::Ufo => "Ufo",
        }
    }
}

/// Reference to a single map object: kind plus id.
///
/// The coordinator never looks inside a reference; it only compares
/// references for equality.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reference {
    /// Object kind.
    pub kind: ReferenceKind,
    /// Object id, unique within its kind.
    pub id: u32,
}

impl Reference {
    /// Creates a reference.
    #[must_use]
    pub const fn new(kind: ReferenceKind, id: u32) -> Self {
        Self { kind, id }
    }

    /// Reference to ship `id`.
    #[must_use]
    pub const fn ship(id: u32) -> Self {
        Self::new(ReferenceKind::Ship, id)
    }

    /// Reference to planet `id`.
    #[must_use]
    pub const fn planet(id: u32) -> Self {
        Self::new(ReferenceKind::Planet, id)
    }

    /// Reference to the starbase at planet `id`.
    #[must_use]
    pub const fn starbase(id: u32) -> Self {
        Self::new(ReferenceKind::Starbase, id)
    }

    /// Reference to ion storm `id`.
    #[must_use]
    pub const fn ion_storm(id: u32) -> Self {
        Self::new(ReferenceKind::IonStorm, id)
    }

    /// Reference to minefield `id`.
    #[must_use]
    pub const fn minefield(id: u32) -> Self {
        Self::new(ReferenceKind::Minefield, id)
    }

    /// Reference to ufo `id`.
    #[must_use]
    pub const fn ufo(id: u32) -> Self {
        Self::new(ReferenceKind::Ufo, id)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.kind.as_str(), self.id)
    }
}
