// Copyright 2026 the Starchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Starchart Location: the cursor coordinator of a starchart view.
//!
//! A starchart shows a cursor on the map together with the list of objects at
//! the cursor position and one focused object. The object list, the target of
//! a jump ("go to next object"), and the target of a lock ("snap to the
//! nearest planet") are all computed by the game side, asynchronously. This
//! crate reconciles those replies with the user's input:
//!
//! - [`Location`] is the coordinator. It owns the cursor [`Position`], the
//!   current [`ObjectList`] and the focused [`Reference`], and runs the
//!   [`State`] machine that decides what every call and every reply means.
//! - [`Listener`] is the query boundary. The coordinator calls it to request
//!   object lists and lock targets; the game side answers later through
//!   [`Location::set_object_list`] and [`Location::set_position`].
//! - [`LocationEvent`]s tell the UI that the position changed or that the
//!   focused object must be redrawn.
//! - [`Configuration`] holds the map geometry used to fold relative movement
//!   on wrapped maps.
//!
//! ## Guarantees
//!
//! - At most one object-list query and at most one lock query are in flight.
//! - A reply for a position the cursor has already left is never shown; the
//!   coordinator re-requests for the current position instead.
//! - Movement and lock requests issued while a jump or lock is unresolved are
//!   queued and replayed once it resolves.
//! - [`Location::start_jump`] accepts at most one jump at a time.
//! - Outside [`State::Idle`] the coordinator reports no objects and no focus.
//!
//! There are no timeouts: a game side that never answers leaves the
//! coordinator waiting.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `tracing` and `thiserror`.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
pub mod focus;
mod listener;
mod location;
mod object_list;
mod position;
mod reference;
mod state;

pub use config::{ConfigError, Configuration, MapMode};
pub use listener::{Listener, LockFlags};
pub use location::{Location, LocationEvent, LocationEvents};
pub use object_list::{ObjectEntry, ObjectItem, ObjectList, Playability};
pub use position::Position;
pub use reference::{Reference, ReferenceKind};
pub use state::State;
