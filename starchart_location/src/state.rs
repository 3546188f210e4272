// Copyright 2026 the Starchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinator states.

use crate::{LockFlags, Position};

/// The coordinator's current state.
///
/// Exactly one state is active at a time; transitions replace the value as a
/// whole. `movement` is relative movement the user issued while a jump or
/// lock was unresolved. `flags` are the options of the most recent lock
/// request still waiting to be issued.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum State {
    /// No position has been set yet.
    #[default]
    Init,
    /// Object-list query in flight for the current position.
    Build,
    /// Object-list query in flight for a stale position; re-issued on arrival.
    BuildAgain,
    /// Object list and jump target both pending.
    BuildJump {
        /// Accumulated movement.
        movement: Position,
    },
    /// Object list and jump target pending; lock issued after both arrive.
    BuildJumpLock {
        /// Accumulated movement.
        movement: Position,
        /// Options of the queued lock.
        flags: LockFlags,
    },
    /// Object list pending; lock issued when it arrives.
    BuildLock {
        /// Accumulated movement.
        movement: Position,
        /// Options of the queued lock.
        flags: LockFlags,
    },
    /// Jump target pending.
    Jump {
        /// Accumulated movement.
        movement: Position,
    },
    /// Jump target pending; lock issued when it arrives.
    JumpLock {
        /// Accumulated movement.
        movement: Position,
        /// Options of the queued lock.
        flags: LockFlags,
    },
    /// Lock query in flight.
    Lock {
        /// Movement issued since the lock was requested.
        movement: Position,
    },
    /// Lock query in flight with another lock queued behind it.
    LockAgain {
        /// Movement issued since the first lock was requested.
        movement: Position,
        /// Options of the queued lock.
        flags: LockFlags,
    },
    /// Position, object list and focus are consistent.
    Idle,
}

impl State {
    /// Stable snake-case name, used in log output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Build => "build",
            Self::BuildAgain => "build_again",
            Self::BuildJump { .. } => "build_jump",
            Self::BuildJumpLock { .. } => "build_jump_lock",
            Self::BuildLock { .. } => "build_lock",
            Self::Jump { .. } => "jump",
            Self::JumpLock { .. } => "jump_lock",
            Self::Lock { .. } => "lock",
            Self::LockAgain { .. } => "lock_again",
            Self::Idle => "idle",
        }
    }

    /// Returns `true` in the steady state.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Returns `true` while a jump target is unresolved.
    #[must_use]
    pub const fn has_pending_jump(&self) -> bool {
        matches!(
            self,
            Self::BuildJump { .. }
                | Self::BuildJumpLock { .. }
                | Self::Jump { .. }
                | Self::JumpLock { .. }
        )
    }

    /// Returns `true` while an object-list query is in flight.
    #[must_use]
    pub const fn has_pending_object_list(&self) -> bool {
        matches!(
            self,
            Self::Build
                | Self::BuildAgain
                | Self::BuildJump { .. }
                | Self::BuildJumpLock { .. }
                | Self::BuildLock { .. }
        )
    }

    /// Returns `true` while a lock query is in flight.
    #[must_use]
    pub const fn has_pending_lock(&self) -> bool {
        matches!(self, Self::Lock { .. } | Self::LockAgain { .. })
    }

    /// Returns the movement accumulated in this state, if it tracks any.
    #[must_use]
    pub const fn pending_movement(&self) -> Option<Position> {
        match *self {
            Self::BuildJump { movement }
            | Self::BuildJumpLock { movement, .. }
            | Self::BuildLock { movement, .. }
            | Self::Jump { movement }
            | Self::JumpLock { movement, .. }
            | Self::Lock { movement }
            | Self::LockAgain { movement, .. } => Some(movement),
            Self::Init | Self::Build | Self::BuildAgain | Self::Idle => None,
        }
    }

    /// Returns the options of a queued lock, if one is waiting to be issued.
    #[must_use]
    pub const fn queued_lock(&self) -> Option<LockFlags> {
        match *self {
            Self::BuildJumpLock { flags, .. }
            | Self::BuildLock { flags, .. }
            | Self::JumpLock { flags, .. }
            | Self::LockAgain { flags, .. } => Some(flags),
            _ => None,
        }
    }

    pub(crate) fn pending_movement_mut(&mut self) -> Option<&mut Position> {
        match self {
            Self::BuildJump { movement }
            | Self::BuildJumpLock { movement, .. }
            | Self::BuildLock { movement, .. }
            | Self::Jump { movement }
            | Self::JumpLock { movement, .. }
            | Self::Lock { movement }
            | Self::LockAgain { movement, .. } => Some(movement),
            Self::Init | Self::Build | Self::BuildAgain | Self::Idle => None,
        }
    }

    pub(crate) fn queued_lock_mut(&mut self) -> Option<&mut LockFlags> {
        match self {
            Self::BuildJumpLock { flags, .. }
            | Self::BuildLock { flags, .. }
            | Self::JumpLock { flags, .. }
            | Self::LockAgain { flags, .. } => Some(flags),
            _ => None,
        }
    }
}
