// Copyright 2026 the Starchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The starchart cursor coordinator.
//!
//! [`Location`] owns the cursor position, the object list for that position,
//! and the focused object. It forwards object-list and lock queries to a
//! [`Listener`] and folds the replies back in, making sure that:
//!
//! - at most one query of each kind is in flight,
//! - a reply for a position the cursor has already left never becomes the
//!   visible object list,
//! - movement and lock requests issued while a query is in flight are queued
//!   and replayed once it resolves.
//!
//! ## Events
//!
//! Instead of calling observers from inside a mutator, the coordinator
//! appends [`LocationEvent`]s to an outbox. Every mutator finishes updating
//! its fields before it appends, so the events always describe a consistent
//! state. Hosts drain the outbox with [`Location::take_events`] after a call
//! returns and are free to call back into any mutator while handling them.
//!
//! ## Example
//!
//! ```
//! use starchart_location::{
//!     Listener, Location, LocationEvent, LockFlags, ObjectList, Position, Reference,
//! };
//!
//! #[derive(Debug, Default)]
//! struct Queries {
//!     lists: Vec<Position>,
//! }
//!
//! impl Listener for Queries {
//!     fn request_object_list(&mut self, pos: Position) {
//!         self.lists.push(pos);
//!     }
//!     fn request_lock_object(&mut self, _pos: Position, _flags: LockFlags) {}
//! }
//!
//! let mut loc = Location::new(Queries::default());
//! loc.set_position(Position::new(1200, 2300));
//! assert_eq!(loc.listener().lists, [Position::new(1200, 2300)]);
//! assert_eq!(loc.num_objects(), 0);
//!
//! // The game side answers.
//! let mut list = ObjectList::new();
//! list.add_divider("Ships");
//! list.add_reference(Reference::ship(10), false);
//! loc.set_object_list(list);
//!
//! assert_eq!(loc.num_objects(), 2);
//! assert_eq!(loc.focused_object(), Some(Reference::ship(10)));
//! assert_eq!(
//!     loc.take_events().as_slice(),
//!     [
//!         LocationEvent::ObjectChanged(None),
//!         LocationEvent::PositionChanged(Position::new(1200, 2300)),
//!         LocationEvent::ObjectChanged(Some(Reference::ship(10))),
//!     ]
//! );
//! ```

use smallvec::SmallVec;

use crate::focus::{self, Step};
use crate::{Configuration, Listener, LockFlags, ObjectItem, ObjectList, Position, Reference, State};

/// Notification appended to a [`Location`]'s outbox.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LocationEvent {
    /// The cursor moved; carries the new position.
    PositionChanged(Position),
    /// The focused object was invalidated (`None`) or resolved again.
    ///
    /// May repeat an unchanged value; consumers must be idempotent.
    ObjectChanged(Option<Reference>),
}

/// Event outbox storage; a single call rarely emits more than a handful.
pub type LocationEvents = SmallVec<[LocationEvent; 4]>;

/// Cursor coordinator for a starchart view.
///
/// The coordinator starts in [`State::Init`] and becomes usable with the
/// first [`set_position`](Self::set_position). It is single-threaded: replies
/// from the game side must be redelivered onto the owning thread before they
/// are passed to [`set_position`](Self::set_position) or
/// [`set_object_list`](Self::set_object_list).
///
/// Outside [`State::Idle`] the object list is not trustworthy, so
/// [`num_objects`](Self::num_objects) reports 0 and
/// [`focused_object`](Self::focused_object) reports `None`.
///
/// Events accumulate until the host drains them with
/// [`take_events`](Self::take_events); a host that never drains them grows
/// the outbox without bound.
#[derive(Debug)]
pub struct Location<L> {
    listener: L,
    config: Configuration,
    state: State,
    position: Position,
    focused: Option<Reference>,
    objects: ObjectList,
    events: LocationEvents,
}

impl<L: Listener> Location<L> {
    /// Creates a coordinator with the default map configuration.
    pub fn new(listener: L) -> Self {
        Self::with_configuration(listener, Configuration::default())
    }

    /// Creates a coordinator with an explicit map configuration.
    pub fn with_configuration(listener: L, config: Configuration) -> Self {
        Self {
            listener,
            config,
            state: State::Init,
            position: Position::ZERO,
            focused: None,
            objects: ObjectList::new(),
            events: LocationEvents::new(),
        }
    }

    /// Returns the query listener.
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Returns the query listener mutably.
    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    /// Consumes the coordinator and returns its listener.
    pub fn into_listener(self) -> L {
        self.listener
    }

    /// Replaces the map configuration. Never causes a transition.
    pub fn set_configuration(&mut self, config: Configuration) {
        self.config = config;
    }

    /// Returns the map configuration.
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Returns the current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the cursor position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Moves the cursor to `pt`.
    ///
    /// This is also how a lock or jump resolves: the game side answers a
    /// lock query by calling this method with the lock target. Calling it
    /// with the current position issues no new object-list query on its own
    /// and emits no [`LocationEvent::PositionChanged`], but still completes a
    /// pending jump or lock. `PositionChanged` is emitted only when the
    /// position after the call differs from the one before it.
    pub fn set_position(&mut self, pt: Position) {
        let old = self.position;
        let changed = pt != old;
        if changed {
            self.relocate(pt);
        }
        self.on_position_change(changed);
        if self.position != old {
            self.emit(LocationEvent::PositionChanged(self.position));
        }
    }

    /// Delivers the reply to an object-list query.
    pub fn set_object_list(&mut self, list: ObjectList) {
        if matches!(self.state, State::Init) {
            tracing::debug!("location.object_list ignored before first position");
            return;
        }
        self.objects = list;
        match self.state {
            State::Init => {}
            State::Build => self.enter_idle(),
            State::BuildAgain => self.enter_build(),
            State::BuildJump { movement } => self.enter_jump(movement),
            State::BuildJumpLock { movement, flags } => {
                self.transition(State::JumpLock { movement, flags });
            }
            State::BuildLock { movement, flags } => self.enter_lock(movement, flags),
            State::Jump { .. } | State::JumpLock { .. } | State::Lock { .. } | State::LockAgain { .. } => {
                tracing::debug!(state = self.state.name(), "location.object_list unsolicited");
            }
            State::Idle => self.verify_focused_object(),
        }
    }

    /// Moves the cursor by `(dx, dy)`.
    ///
    /// While a jump or lock is unresolved the movement is accumulated and
    /// applied once it resolves; otherwise the cursor moves immediately.
    /// The target is folded through the map [`Configuration`].
    pub fn move_relative(&mut self, dx: i32, dy: i32) {
        let delta = Position::new(dx, dy);
        if let Some(movement) = self.state.pending_movement_mut() {
            *movement += delta;
            return;
        }
        match self.state {
            State::Build | State::BuildAgain | State::Idle => {
                let target = self.config.translate(self.position, delta);
                self.set_position(target);
            }
            _ => {}
        }
    }

    /// Announces a jump to a target the game side will resolve.
    ///
    /// Returns `false` without doing anything if the coordinator cannot start
    /// a jump now: before the first position, while a jump is already
    /// pending, or while a lock is pending or queued. The jump resolves with
    /// the next [`set_position`](Self::set_position).
    pub fn start_jump(&mut self) -> bool {
        match self.state {
            State::Build | State::BuildAgain => {
                self.transition(State::BuildJump {
                    movement: Position::ZERO,
                });
                true
            }
            State::Idle => {
                self.enter_jump(Position::ZERO);
                true
            }
            _ => {
                tracing::debug!(state = self.state.name(), "location.jump refused");
                false
            }
        }
    }

    /// Requests a lock onto the nearest object satisfying `flags`.
    ///
    /// From [`State::Idle`] the lock query is issued at once. Otherwise it is
    /// queued until the query in flight resolves; a second queued lock
    /// replaces the first one's flags while movement keeps accumulating.
    pub fn lock_object(&mut self, flags: LockFlags) {
        if let Some(queued) = self.state.queued_lock_mut() {
            *queued = flags;
            return;
        }
        match self.state {
            State::Build | State::BuildAgain => self.transition(State::BuildLock {
                movement: Position::ZERO,
                flags,
            }),
            State::BuildJump { movement } => {
                self.transition(State::BuildJumpLock { movement, flags });
            }
            State::Jump { movement } => self.transition(State::JumpLock { movement, flags }),
            State::Lock { movement } => self.transition(State::LockAgain { movement, flags }),
            State::Idle => self.enter_lock(Position::ZERO, flags),
            _ => {}
        }
    }

    /// Sets the focused object.
    ///
    /// In [`State::Idle`] the reference is validated against the object list
    /// at once (falling back to the first listed object) and announced.
    /// Otherwise it is kept and validated when the coordinator becomes idle.
    /// Ignored before the first position.
    pub fn set_focused_object(&mut self, reference: Option<Reference>) {
        if matches!(self.state, State::Init) {
            return;
        }
        self.focused = reference;
        if self.state.is_idle() {
            self.verify_focused_object();
        }
    }

    /// Moves focus to the next or previous object in the list.
    ///
    /// With `marked_only`, only marked objects qualify. Does nothing outside
    /// [`State::Idle`], on an empty list, or when no row qualifies.
    pub fn cycle_focused_object(&mut self, forward: bool, marked_only: bool) {
        if !self.state.is_idle() || self.objects.is_empty() {
            return;
        }
        let origin = self.current_object_index().unwrap_or(0);
        let Some(index) =
            focus::next_candidate(&self.objects, origin, Step::from_forward(forward), marked_only)
        else {
            return;
        };
        self.focused = self.objects.reference_at(index);
        self.emit(LocationEvent::ObjectChanged(self.focused));
    }

    /// Returns `true` if the focused object and object list are valid.
    pub fn has_focused_object(&self) -> bool {
        self.state.is_idle()
    }

    /// Returns the focused object; `None` outside [`State::Idle`].
    pub fn focused_object(&self) -> Option<Reference> {
        if self.state.is_idle() {
            self.focused
        } else {
            None
        }
    }

    /// Returns the object list; `None` outside [`State::Idle`].
    pub fn object_list(&self) -> Option<&ObjectList> {
        self.state.is_idle().then_some(&self.objects)
    }

    /// Returns the number of listed rows; 0 outside [`State::Idle`].
    pub fn num_objects(&self) -> usize {
        self.object_list().map_or(0, ObjectList::len)
    }

    /// Returns the row index of the focused object.
    pub fn current_object_index(&self) -> Option<usize> {
        let focused = self.focused_object()?;
        self.objects.find(focused)
    }

    /// Returns the row at `index`.
    pub fn object_by_index(&self, index: usize) -> Option<&ObjectItem> {
        self.object_list()?.get(index)
    }

    /// Returns the events emitted since the last call, oldest first.
    pub fn events(&self) -> &[LocationEvent] {
        &self.events
    }

    /// Drains the event outbox.
    pub fn take_events(&mut self) -> LocationEvents {
        core::mem::take(&mut self.events)
    }

    fn on_position_change(&mut self, changed: bool) {
        match self.state {
            State::Init => self.enter_build(),
            State::Build => {
                if changed {
                    self.transition(State::BuildAgain);
                }
            }
            State::BuildAgain | State::BuildLock { .. } => {}
            State::BuildJump { movement } => {
                self.transition(State::BuildAgain);
                self.shift(movement);
            }
            State::BuildJumpLock { movement, flags } => {
                self.transition(State::BuildLock { movement, flags });
            }
            State::Jump { movement } => {
                self.shift(movement);
                self.enter_build();
            }
            State::JumpLock { movement, flags } | State::LockAgain { movement, flags } => {
                self.enter_lock(movement, flags);
            }
            // Movement issued while the lock was in flight is dropped; the
            // lock target wins.
            State::Lock { .. } => self.enter_build(),
            State::Idle => {
                if changed {
                    self.enter_build();
                }
            }
        }
    }

    fn enter_build(&mut self) {
        self.transition(State::Build);
        tracing::debug!(position = %self.position, "location.request_object_list");
        self.listener.request_object_list(self.position);
        self.emit(LocationEvent::ObjectChanged(None));
    }

    fn enter_jump(&mut self, movement: Position) {
        self.transition(State::Jump { movement });
        self.emit(LocationEvent::ObjectChanged(None));
    }

    fn enter_lock(&mut self, movement: Position, flags: LockFlags) {
        self.transition(State::Lock {
            movement: Position::ZERO,
        });
        let target = self.config.translate(self.position, movement);
        tracing::debug!(target = %target, flags = flags.bits(), "location.request_lock_object");
        self.listener.request_lock_object(target, flags);
    }

    fn enter_idle(&mut self) {
        self.transition(State::Idle);
        self.verify_focused_object();
    }

    fn verify_focused_object(&mut self) {
        if self
            .focused
            .is_some_and(|focused| self.objects.find(focused).is_none())
        {
            self.focused = None;
        }
        if self.focused.is_none() {
            self.focused = self.objects.first_reference();
        }
        self.emit(LocationEvent::ObjectChanged(self.focused));
    }

    fn transition(&mut self, next: State) {
        tracing::trace!(from = self.state.name(), to = next.name(), "location.transition");
        self.state = next;
    }

    /// Stores a new position, dropping everything tied to the old one.
    fn relocate(&mut self, pt: Position) {
        self.focused = None;
        self.objects.clear();
        self.position = pt;
    }

    fn shift(&mut self, movement: Position) {
        if movement.is_zero() {
            return;
        }
        let target = self.config.translate(self.position, movement);
        if target != self.position {
            self.relocate(target);
        }
    }

    fn emit(&mut self, event: LocationEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::{MapMode, ObjectEntry};

    #[derive(Debug, Default)]
    struct Recorder {
        lists: Vec<Position>,
        locks: Vec<(Position, LockFlags)>,
    }

    impl Listener for Recorder {
        fn request_object_list(&mut self, pos: Position) {
            self.lists.push(pos);
        }

        fn request_lock_object(&mut self, pos: Position, flags: LockFlags) {
            self.locks.push((pos, flags));
        }
    }

    const START: Position = Position::new(1200, 2300);

    fn title_ship_planet() -> ObjectList {
        let mut list = ObjectList::new();
        list.add_divider("title");
        list.add_reference(Reference::ship(10), false);
        list.add_reference(Reference::planet(33), false);
        list
    }

    fn planets(ids: &[u32]) -> ObjectList {
        let mut list = ObjectList::new();
        for &id in ids {
            list.add_reference(Reference::planet(id), false);
        }
        list
    }

    /// A coordinator that reached Idle at `START` with `title_ship_planet`.
    fn idle() -> Location<Recorder> {
        let mut loc = Location::new(Recorder::default());
        loc.set_position(START);
        loc.set_object_list(title_ship_planet());
        loc.take_events();
        assert_eq!(loc.state(), State::Idle);
        loc
    }

    #[test]
    fn first_position_requests_list_and_focuses_first_reference() {
        let mut loc = Location::new(Recorder::default());
        assert_eq!(loc.state(), State::Init);

        loc.set_position(START);
        assert_eq!(loc.listener().lists, vec![START]);
        assert_eq!(loc.state(), State::Build);
        assert!(loc.events().contains(&LocationEvent::PositionChanged(START)));

        loc.set_object_list(title_ship_planet());
        assert_eq!(loc.num_objects(), 3);
        assert_eq!(loc.current_object_index(), Some(1));
        assert_eq!(loc.focused_object(), Some(Reference::ship(10)));
        assert!(loc.has_focused_object());
    }

    #[test]
    fn init_ignores_everything_but_set_position() {
        let mut loc = Location::new(Recorder::default());
        loc.move_relative(5, 5);
        assert!(!loc.start_jump());
        loc.lock_object(LockFlags::LEFT);
        loc.set_object_list(title_ship_planet());
        loc.cycle_focused_object(true, false);
        assert_eq!(loc.state(), State::Init);
        assert_eq!(loc.position(), Position::ZERO);
        assert!(loc.listener().lists.is_empty());
        assert!(loc.listener().locks.is_empty());
        assert!(loc.events().is_empty());
    }

    #[test]
    fn first_position_at_origin_still_initializes() {
        let mut loc = Location::new(Recorder::default());
        loc.set_position(Position::ZERO);
        assert_eq!(loc.state(), State::Build);
        assert_eq!(loc.listener().lists, vec![Position::ZERO]);
        assert!(!loc
            .events()
            .iter()
            .any(|e| matches!(e, LocationEvent::PositionChanged(_))));
    }

    #[test]
    fn movement_during_build_collapses_into_one_rerequest() {
        let mut loc = idle();
        loc.move_relative(1, 0);
        loc.move_relative(2, 0);
        loc.move_relative(3, 0);
        assert_eq!(loc.state(), State::BuildAgain);
        assert_eq!(loc.position(), Position::new(1206, 2300));
        assert_eq!(loc.listener().lists, vec![START, Position::new(1201, 2300)]);

        // The stale reply triggers exactly one request for the current position.
        loc.set_object_list(planets(&[1]));
        assert_eq!(
            loc.listener().lists,
            vec![START, Position::new(1201, 2300), Position::new(1206, 2300)]
        );
        assert_eq!(loc.state(), State::Build);
        assert_eq!(loc.num_objects(), 0);
        assert_eq!(loc.focused_object(), None);

        loc.set_object_list(planets(&[2]));
        assert_eq!(loc.state(), State::Idle);
        assert_eq!(loc.focused_object(), Some(Reference::planet(2)));
        assert_eq!(loc.listener().lists.len(), 3);
    }

    #[test]
    fn jump_is_exclusive_and_queued_lock_fires_on_resolution() {
        let mut loc = idle();
        assert!(loc.start_jump());
        assert!(!loc.start_jump());
        assert_eq!(loc.take_events().as_slice(), [LocationEvent::ObjectChanged(None)]);

        loc.lock_object(LockFlags::empty());
        assert!(loc.listener().locks.is_empty());
        assert_eq!(
            loc.state(),
            State::JumpLock {
                movement: Position::ZERO,
                flags: LockFlags::empty()
            }
        );

        loc.set_position(Position::new(2000, 3000));
        assert_eq!(
            loc.listener().locks,
            vec![(Position::new(2000, 3000), LockFlags::empty())]
        );
        assert!(!loc.start_jump());

        // Lock resolves; list for the lock target is built.
        loc.set_position(Position::new(2010, 3000));
        assert_eq!(loc.state(), State::Build);
        assert_eq!(loc.listener().lists.last(), Some(&Position::new(2010, 3000)));
        assert!(loc.start_jump());
    }

    #[test]
    fn jump_applies_movement_accumulated_while_pending() {
        let mut loc = idle();
        assert!(loc.start_jump());
        loc.move_relative(3, 0);
        loc.move_relative(0, -2);
        assert_eq!(
            loc.state(),
            State::Jump {
                movement: Position::new(3, -2)
            }
        );
        assert_eq!(loc.position(), START);

        loc.take_events();
        loc.set_position(Position::new(1500, 1500));
        assert_eq!(loc.position(), Position::new(1503, 1498));
        assert_eq!(loc.state(), State::Build);
        assert_eq!(loc.listener().lists.last(), Some(&Position::new(1503, 1498)));
        assert_eq!(
            loc.take_events().as_slice(),
            [
                LocationEvent::ObjectChanged(None),
                LocationEvent::PositionChanged(Position::new(1503, 1498)),
            ]
        );
    }

    #[test]
    fn jump_resolving_in_place_completes_with_zero_delta() {
        let mut loc = idle();
        assert!(loc.start_jump());
        loc.take_events();
        loc.set_position(START);
        assert_eq!(loc.state(), State::Build);
        assert_eq!(loc.listener().lists, vec![START, START]);
        assert_eq!(loc.take_events().as_slice(), [LocationEvent::ObjectChanged(None)]);
    }

    #[test]
    fn refreshed_list_keeps_focus() {
        let mut loc = Location::new(Recorder::default());
        loc.set_position(START);
        loc.set_object_list(planets(&[1, 3, 5]));
        loc.set_focused_object(Some(Reference::planet(3)));
        assert_eq!(loc.current_object_index(), Some(1));

        loc.set_object_list(planets(&[1, 2, 3, 4, 5]));
        assert_eq!(loc.focused_object(), Some(Reference::planet(3)));
        assert_eq!(loc.current_object_index(), Some(2));
        assert_eq!(loc.listener().lists.len(), 1);
    }

    #[test]
    fn refreshed_list_without_focus_falls_back_to_first_reference() {
        let mut loc = idle();
        loc.set_focused_object(Some(Reference::planet(33)));
        loc.take_events();

        loc.set_object_list(planets(&[7, 8]));
        assert_eq!(loc.focused_object(), Some(Reference::planet(7)));
        assert_eq!(
            loc.take_events().as_slice(),
            [LocationEvent::ObjectChanged(Some(Reference::planet(7)))]
        );
    }

    #[test]
    fn set_focused_object_validates_only_when_idle() {
        let mut loc = idle();
        loc.set_focused_object(Some(Reference::ship(99)));
        assert_eq!(loc.focused_object(), Some(Reference::ship(10)));
        assert_eq!(
            loc.take_events().as_slice(),
            [LocationEvent::ObjectChanged(Some(Reference::ship(10)))]
        );

        // While building, the wish is kept and honored on arrival.
        loc.move_relative(1, 0);
        loc.take_events();
        loc.set_focused_object(Some(Reference::planet(33)));
        assert!(loc.events().is_empty());
        assert_eq!(loc.focused_object(), None);
        loc.set_object_list(title_ship_planet());
        assert_eq!(loc.focused_object(), Some(Reference::planet(33)));
        assert_eq!(loc.current_object_index(), Some(2));
    }

    #[test]
    fn cycle_marked_only_lands_on_first_marked_after_origin() {
        let mut loc = Location::new(Recorder::default());
        loc.set_position(START);
        let list: ObjectList = [1, 3, 5, 6, 7, 9, 10, 11, 13, 14]
            .into_iter()
            .map(|id| {
                ObjectItem::Object(ObjectEntry::new(Reference::planet(id)).with_marked(id % 2 == 0))
            })
            .collect();
        loc.set_object_list(list);
        assert_eq!(loc.current_object_index(), Some(0));
        loc.take_events();

        loc.cycle_focused_object(true, true);
        assert_eq!(loc.current_object_index(), Some(3));
        assert_eq!(
            loc.take_events().as_slice(),
            [LocationEvent::ObjectChanged(Some(Reference::planet(6)))]
        );

        loc.cycle_focused_object(false, false);
        assert_eq!(loc.current_object_index(), Some(2));
    }

    #[test]
    fn cycle_without_marked_objects_is_silent() {
        let mut loc = idle();
        loc.cycle_focused_object(true, true);
        assert_eq!(loc.focused_object(), Some(Reference::ship(10)));
        assert!(loc.events().is_empty());

        loc.cycle_focused_object(true, false);
        assert_eq!(loc.focused_object(), Some(Reference::planet(33)));
        loc.cycle_focused_object(true, false);
        assert_eq!(loc.focused_object(), Some(Reference::ship(10)));
    }

    #[test]
    fn cycle_ignored_while_building() {
        let mut loc = idle();
        loc.move_relative(0, 1);
        loc.take_events();
        loc.cycle_focused_object(true, false);
        assert!(loc.events().is_empty());
    }

    #[test]
    fn idle_lock_is_issued_immediately() {
        let mut loc = idle();
        loc.lock_object(LockFlags::MARKED_ONLY);
        assert_eq!(loc.listener().locks, vec![(START, LockFlags::MARKED_ONLY)]);
        assert_eq!(
            loc.state(),
            State::Lock {
                movement: Position::ZERO
            }
        );
        assert_eq!(loc.num_objects(), 0);
        assert!(!loc.has_focused_object());
    }

    #[test]
    fn lock_drops_movement_issued_while_in_flight() {
        let mut loc = idle();
        loc.lock_object(LockFlags::empty());
        loc.move_relative(50, 50);
        assert_eq!(loc.position(), START);

        loc.set_position(Position::new(1300, 2300));
        assert_eq!(loc.position(), Position::new(1300, 2300));
        assert_eq!(loc.state(), State::Build);
        assert_eq!(loc.listener().lists.last(), Some(&Position::new(1300, 2300)));
    }

    #[test]
    fn second_lock_is_replayed_with_latest_flags_and_movement() {
        let mut loc = idle();
        loc.lock_object(LockFlags::empty());
        loc.move_relative(5, 0);
        loc.lock_object(LockFlags::LEFT);
        loc.move_relative(5, 0);
        loc.lock_object(LockFlags::MARKED_ONLY);
        assert_eq!(
            loc.state(),
            State::LockAgain {
                movement: Position::new(10, 0),
                flags: LockFlags::MARKED_ONLY
            }
        );

        loc.set_position(Position::new(1250, 2300));
        assert_eq!(
            loc.listener().locks,
            vec![
                (START, LockFlags::empty()),
                (Position::new(1260, 2300), LockFlags::MARKED_ONLY)
            ]
        );
        assert_eq!(
            loc.state(),
            State::Lock {
                movement: Position::ZERO
            }
        );
    }

    #[test]
    fn lock_during_build_waits_for_list() {
        let mut loc = idle();
        loc.move_relative(1, 0);
        loc.lock_object(LockFlags::LEFT);
        loc.move_relative(0, 4);
        loc.lock_object(LockFlags::MARKED_ONLY);
        assert_eq!(
            loc.state(),
            State::BuildLock {
                movement: Position::new(0, 4),
                flags: LockFlags::MARKED_ONLY
            }
        );
        assert!(!loc.start_jump());
        assert!(loc.listener().locks.is_empty());

        loc.set_object_list(planets(&[1]));
        assert_eq!(
            loc.listener().locks,
            vec![(Position::new(1201, 2304), LockFlags::MARKED_ONLY)]
        );
        assert_eq!(loc.listener().lists.len(), 2);
    }

    #[test]
    fn jump_during_build_waits_for_both_replies() {
        let mut loc = idle();
        loc.move_relative(1, 0);
        assert!(loc.start_jump());
        assert!(!loc.start_jump());
        loc.move_relative(2, 2);

        loc.set_object_list(planets(&[1]));
        assert_eq!(
            loc.state(),
            State::Jump {
                movement: Position::new(2, 2)
            }
        );
        assert_eq!(loc.num_objects(), 0);

        loc.set_position(Position::new(1800, 1800));
        assert_eq!(loc.position(), Position::new(1802, 1802));
        assert_eq!(loc.listener().lists.last(), Some(&Position::new(1802, 1802)));
    }

    #[test]
    fn jump_resolving_before_list_rebuilds_for_target() {
        let mut loc = idle();
        loc.move_relative(1, 0);
        assert!(loc.start_jump());
        loc.move_relative(0, 1);

        loc.set_position(Position::new(1800, 1800));
        assert_eq!(loc.state(), State::BuildAgain);
        assert_eq!(loc.position(), Position::new(1800, 1801));
        assert_eq!(loc.listener().lists.len(), 2);

        loc.set_object_list(planets(&[1]));
        assert_eq!(loc.listener().lists.last(), Some(&Position::new(1800, 1801)));
        loc.set_object_list(planets(&[2]));
        assert_eq!(loc.state(), State::Idle);
    }

    #[test]
    fn jump_and_lock_during_build_resolve_in_any_order() {
        // List first, then jump target.
        let mut loc = idle();
        loc.move_relative(1, 0);
        assert!(loc.start_jump());
        loc.lock_object(LockFlags::LEFT);
        loc.set_object_list(planets(&[1]));
        assert!(matches!(loc.state(), State::JumpLock { .. }));
        loc.set_position(Position::new(1700, 1700));
        assert_eq!(loc.listener().locks, vec![(Position::new(1700, 1700), LockFlags::LEFT)]);

        // Jump target first, then list.
        let mut loc = idle();
        loc.move_relative(1, 0);
        assert!(loc.start_jump());
        loc.lock_object(LockFlags::LEFT);
        loc.move_relative(1, 1);
        loc.set_position(Position::new(1700, 1700));
        assert_eq!(
            loc.state(),
            State::BuildLock {
                movement: Position::new(1, 1),
                flags: LockFlags::LEFT
            }
        );
        assert!(loc.listener().locks.is_empty());
        loc.set_object_list(planets(&[1]));
        assert_eq!(loc.listener().locks, vec![(Position::new(1701, 1701), LockFlags::LEFT)]);
    }

    #[test]
    fn relative_movement_wraps_on_wrapped_maps() {
        let config =
            Configuration::wrapped(Position::new(2000, 2000), Position::new(2000, 2000)).unwrap();
        let mut loc = Location::with_configuration(Recorder::default(), config);
        assert_eq!(loc.configuration().mode(), MapMode::Wrapped);
        loc.set_position(Position::new(2995, 2000));
        loc.set_object_list(planets(&[1]));

        loc.move_relative(10, 0);
        assert_eq!(loc.position(), Position::new(1005, 2000));
        assert_eq!(loc.listener().lists.last(), Some(&Position::new(1005, 2000)));

        // Absolute positions are stored verbatim.
        loc.set_position(Position::new(5000, 5000));
        assert_eq!(loc.position(), Position::new(5000, 5000));

        loc.set_configuration(Configuration::default());
        assert_eq!(loc.state(), State::BuildAgain);
    }

    #[test]
    fn host_may_react_to_events_with_further_calls() {
        let mut loc = idle();
        assert!(loc.start_jump());
        loc.set_position(Position::new(1800, 1800));

        // A "lock after jump" flow: every position change requests a lock.
        let mut rounds = 0;
        loop {
            let events = loc.take_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                if let LocationEvent::PositionChanged(pos) = event {
                    assert_eq!(pos, loc.position());
                    loc.lock_object(LockFlags::LEFT);
                    rounds += 1;
                }
            }
        }
        assert_eq!(rounds, 1);
        assert_eq!(
            loc.state(),
            State::BuildLock {
                movement: Position::ZERO,
                flags: LockFlags::LEFT
            }
        );
        loc.set_object_list(planets(&[1]));
        assert_eq!(loc.listener().locks, vec![(Position::new(1800, 1800), LockFlags::LEFT)]);
    }

    #[test]
    fn accessors_are_gated_outside_idle() {
        let mut loc = idle();
        assert!(loc.object_by_index(1).is_some());
        assert!(loc.object_list().is_some());
        assert!(loc.start_jump());
        assert_eq!(loc.num_objects(), 0);
        assert_eq!(loc.object_by_index(1), None);
        assert_eq!(loc.object_list(), None);
        assert_eq!(loc.current_object_index(), None);
        assert_eq!(loc.focused_object(), None);
        assert!(!loc.has_focused_object());
    }

    #[test]
    fn stray_list_during_lock_is_ignored() {
        let mut loc = idle();
        loc.lock_object(LockFlags::empty());
        loc.set_object_list(planets(&[1]));
        assert_eq!(
            loc.state(),
            State::Lock {
                movement: Position::ZERO
            }
        );
        assert_eq!(loc.listener().lists.len(), 1);
    }

    #[test]
    fn listener_can_be_borrowed() {
        let mut recorder = Recorder::default();
        {
            let mut loc = Location::new(&mut recorder);
            loc.set_position(START);
        }
        assert_eq!(recorder.lists, vec![START]);

        let loc = Location::new(alloc::boxed::Box::new(Recorder::default()));
        assert!(loc.into_listener().lists.is_empty());
    }

    /// A coordinator whose first list query is stale: Idle, then two moves.
    fn build_again() -> Location<Recorder> {
        let mut loc = idle();
        loc.move_relative(1, 0);
        loc.move_relative(1, 0);
        assert_eq!(loc.state(), State::BuildAgain);
        loc
    }

    #[test]
    fn jump_from_build_again_waits_for_both_replies() {
        let mut loc = build_again();
        assert!(loc.start_jump());
        assert_eq!(
            loc.state(),
            State::BuildJump {
                movement: Position::ZERO
            }
        );
        loc.set_object_list(planets(&[1]));
        assert_eq!(
            loc.state(),
            State::Jump {
                movement: Position::ZERO
            }
        );
    }

    #[test]
    fn lock_from_build_again_fires_when_list_arrives() {
        let mut loc = build_again();
        loc.lock_object(LockFlags::LEFT);
        assert_eq!(
            loc.state(),
            State::BuildLock {
                movement: Position::ZERO,
                flags: LockFlags::LEFT
            }
        );
        assert!(loc.listener().locks.is_empty());

        loc.set_object_list(planets(&[1]));
        assert_eq!(
            loc.listener().locks,
            vec![(Position::new(1202, 2300), LockFlags::LEFT)]
        );
    }

    #[test]
    fn second_lock_during_jump_replaces_flags() {
        let mut loc = idle();
        assert!(loc.start_jump());
        loc.lock_object(LockFlags::LEFT);
        loc.lock_object(LockFlags::MARKED_ONLY);
        assert_eq!(
            loc.state(),
            State::JumpLock {
                movement: Position::ZERO,
                flags: LockFlags::MARKED_ONLY
            }
        );

        loc.set_position(Position::new(1700, 1700));
        assert_eq!(
            loc.listener().locks,
            vec![(Position::new(1700, 1700), LockFlags::MARKED_ONLY)]
        );
    }

    #[test]
    fn second_lock_during_build_jump_replaces_flags() {
        let mut loc = idle();
        loc.move_relative(1, 0);
        assert!(loc.start_jump());
        loc.lock_object(LockFlags::MARKED_ONLY);
        loc.lock_object(LockFlags::LEFT);
        assert_eq!(
            loc.state(),
            State::BuildJumpLock {
                movement: Position::ZERO,
                flags: LockFlags::LEFT
            }
        );

        loc.set_object_list(planets(&[1]));
        loc.set_position(Position::new(1700, 1700));
        assert_eq!(
            loc.listener().locks,
            vec![(Position::new(1700, 1700), LockFlags::LEFT)]
        );
    }

    #[test]
    fn jump_cancelled_by_queued_movement_reports_no_move() {
        let mut loc = idle();
        assert!(loc.start_jump());
        loc.move_relative(-5, 0);
        loc.take_events();

        loc.set_position(Position::new(1205, 2300));
        assert_eq!(loc.position(), START);
        assert_eq!(loc.state(), State::Build);
        assert_eq!(loc.listener().lists.last(), Some(&START));
        assert_eq!(loc.take_events().as_slice(), [LocationEvent::ObjectChanged(None)]);
    }

    #[test]
    fn focus_set_before_first_position_is_ignored() {
        let mut loc = Location::new(Recorder::default());
        loc.set_focused_object(Some(Reference::planet(3)));
        assert!(loc.events().is_empty());

        // The origin is the initial position, so nothing clears focus here.
        loc.set_position(Position::ZERO);
        loc.set_object_list(planets(&[1, 3]));
        assert_eq!(loc.focused_object(), Some(Reference::planet(1)));
    }

    #[test]
    fn relative_movement_wraps_across_the_coordinate_edge() {
        let config =
            Configuration::wrapped(Position::new(i32::MAX - 5, 0), Position::new(10, 10)).unwrap();
        let mut loc = Location::with_configuration(Recorder::default(), config);
        loc.set_position(Position::new(i32::MAX - 1, 0));
        loc.set_object_list(planets(&[1]));

        loc.move_relative(5, 0);
        assert_eq!(loc.position(), Position::new(i32::MAX - 6, 0));
        assert_eq!(loc.listener().lists.last(), Some(&Position::new(i32::MAX - 6, 0)));
    }
}
