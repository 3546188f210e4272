// Copyright 2026 the Starchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The query boundary between the coordinator and the game side.

use alloc::boxed::Box;

use crate::Position;

bitflags::bitflags! {
    /// Options attached to a lock request.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LockFlags: u8 {
        /// Lock was requested with the primary (left) button.
        ///
        /// The game side decides what this prefers; the bundled charts restrict
        /// the search to planets.
        const LEFT        = 0b0000_0001;
        /// Only consider marked objects.
        const MARKED_ONLY = 0b0000_0010;
    }
}

/// Receiver of the coordinator's asynchronous queries.
///
/// Both methods are fire-and-forget. For every accepted call the implementor
/// must eventually answer on the coordinator's own thread, exactly once:
///
/// - [`request_object_list`](Self::request_object_list) is answered with
///   [`Location::set_object_list`](crate::Location::set_object_list), carrying
///   the freshest list available (it need not match `pos`; the coordinator
///   re-requests when the cursor moved meanwhile).
/// - [`request_lock_object`](Self::request_lock_object) is answered with
///   [`Location::set_position`](crate::Location::set_position), carrying the
///   resolved lock target (`pos` itself when nothing qualifies).
///
/// Implementations must not call back into the coordinator from inside these
/// methods. The coordinator keeps at most one request of each kind
/// outstanding, so replies of one kind never need to be disambiguated.
pub trait Listener {
    /// Requests the object list for `pos`.
    fn request_object_list(&mut self, pos: Position);

    /// Requests the nearest object to `pos` that satisfies `flags`.
    fn request_lock_object(&mut self, pos: Position, flags: LockFlags);
}

impl<L: Listener + ?Sized> Listener for &mut L {
    fn request_object_list(&mut self, pos: Position) {
        (**self).request_object_list(pos);
    }

    fn request_lock_object(&mut self, pos: Position, flags: LockFlags) {
        (**self).request_lock_object(pos, flags);
    }
}

impl<L: Listener + ?Sized> Listener for Box<L> {
    fn request_object_list(&mut self, pos: Position) {
        (**self).request_object_list(pos);
    }

    fn request_lock_object(&mut self, pos: Position, flags: LockFlags) {
        (**self).request_lock_object(pos, flags);
    }
}
