// Copyright 2026 the Starchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Map geometry and wraparound rules.
//!
//! A [`Configuration`] is plain data. The coordinator consults it when it
//! computes a position from relative movement, so that a cursor stepping off
//! one edge of a wrapped map reappears on the opposite edge. Absolute
//! positions handed to [`Location::set_position`](crate::Location::set_position)
//! are taken verbatim.

use crate::Position;

/// Map topology.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MapMode {
    /// Unbounded plane; coordinates are never folded.
    #[default]
    Flat,
    /// Torus; both axes wrap around at the map edges.
    Wrapped,
}

/// Errors raised when building a [`Configuration`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The map size is not strictly positive on both axes.
    #[error("map size {0} must be positive on both axes")]
    InvalidSize(Position),
    /// The map rectangle does not fit the `i32` coordinate range.
    #[error("map of size {size} centred on {center} exceeds the coordinate range")]
    OutOfRange {
        /// Requested center.
        center: Position,
        /// Requested size.
        size: Position,
    },
}

/// Map configuration: topology, center and size.
///
/// The map rectangle spans `[min, min + size)` on each axis, where
/// `min = center - size / 2`. Both corners are representable as `i32`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Configuration {
    mode: MapMode,
    center: Position,
    size: Position,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            mode: MapMode::Flat,
            center: Position::new(2000, 2000),
            size: Position::new(2000, 2000),
        }
    }
}

impl Configuration {
    /// Creates a flat map configuration.
    pub fn flat(center: Position, size: Position) -> Result<Self, ConfigError> {
        Self::with_mode(MapMode::Flat, center, size)
    }

    /// Creates a wrapped map configuration.
    ///
    /// ```
    /// use starchart_location::{Configuration, Position};
    ///
    /// let config = Configuration::wrapped(Position::new(2000, 2000), Position::new(2000, 2000))?;
    /// // One unit right of the eastern edge lands on the western edge.
    /// assert_eq!(config.canonical_position(Position::new(3000, 2000)), Position::new(1000, 2000));
    /// # Ok::<(), starchart_location::ConfigError>(())
    /// ```
    pub fn wrapped(center: Position, size: Position) -> Result<Self, ConfigError> {
        Self::with_mode(MapMode::Wrapped, center, size)
    }

    /// Creates a configuration with an explicit [`MapMode`].
    ///
    /// Fails if `size` is not positive, or if either corner of the map
    /// rectangle falls outside the `i32` range.
    pub fn with_mode(mode: MapMode, center: Position, size: Position) -> Result<Self, ConfigError> {
        if size.x <= 0 || size.y <= 0 {
            return Err(ConfigError::InvalidSize(size));
        }
        let fits = |c: i32, s: i32| c.checked_sub(s / 2).and_then(|min| min.checked_add(s)).is_some();
        if !fits(center.x, size.x) || !fits(center.y, size.y) {
            return Err(ConfigError::OutOfRange { center, size });
        }
        Ok(Self { mode, center, size })
    }

    /// Returns the map topology.
    #[must_use]
    pub const fn mode(&self) -> MapMode {
        self.mode
    }

    /// Returns the map center.
    #[must_use]
    pub const fn center(&self) -> Position {
        self.center
    }

    /// Returns the map size.
    #[must_use]
    pub const fn size(&self) -> Position {
        self.size
    }

    /// Returns the inclusive lower corner of the map rectangle.
    #[must_use]
    pub fn min(&self) -> Position {
        Position::new(
            self.center.x - self.size.x / 2,
            self.center.y - self.size.y / 2,
        )
    }

    /// Returns the exclusive upper corner of the map rectangle.
    #[must_use]
    pub fn max(&self) -> Position {
        self.min() + self.size
    }

    /// Returns `true` if `pt` lies inside the map rectangle.
    #[must_use]
    pub fn contains(&self, pt: Position) -> bool {
        let min = self.min();
        let max = self.max();
        (min.x..max.x).contains(&pt.x) && (min.y..max.y).contains(&pt.y)
    }

    /// Folds `pt` into the map rectangle according to the map topology.
    #[must_use]
    pub fn canonical_position(&self, pt: Position) -> Position {
        self.translate(pt, Position::ZERO)
    }

    /// Moves `pt` by `delta` and folds the result into the map rectangle.
    ///
    /// On wrapped maps the sum is computed without intermediate overflow, so
    /// a step across the `i32` edge still lands on the right cell. On flat
    /// maps this is plain [`Position`] addition.
    #[must_use]
    pub fn translate(&self, pt: Position, delta: Position) -> Position {
        match self.mode {
            MapMode::Flat => pt + delta,
            MapMode::Wrapped => {
                let min = self.min();
                Position::new(
                    fold(i64::from(pt.x) + i64::from(delta.x), min.x, self.size.x),
                    fold(i64::from(pt.y) + i64::from(delta.y), min.y, self.size.y),
                )
            }
        }
    }
}

fn fold(value: i64, min: i32, size: i32) -> i32 {
    let offset = (value - i64::from(min)).rem_euclid(i64::from(size));
    // `min + size` fits in `i32` and `offset < size`.
    i32::try_from(i64::from(min) + offset).unwrap_or(min)
}
