// Copyright 2026 the Starchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Starchart Worker: a game side for [`starchart_location`] on its own thread.
//!
//! The coordinator in [`starchart_location`] only issues queries; something
//! has to answer them. This crate answers them on a background thread:
//!
//! - [`Starchart`] is the game-side data source: it builds object lists and
//!   resolves lock targets. [`StaticChart`] is an in-memory implementation.
//! - [`spawn`] moves a chart onto a named worker thread and returns the three
//!   ends of the connection: a [`WorkerListener`] to hand to the coordinator,
//!   a [`ReplyPump`] that feeds replies back on the coordinator's thread, and
//!   a [`WorkerHandle`] to join the worker.
//!
//! Requests are served in order, one reply per request, so the coordinator's
//! single-flight discipline carries over unchanged. Replies append to the
//! coordinator's event outbox, which the host drains after pumping. There
//! are no timeouts: callers that need to give up use
//! [`ReplyPump::pump_timeout`] and decide for themselves.
//!
//! ```
//! use std::time::Duration;
//!
//! use starchart_location::{Location, Position, Reference};
//! use starchart_worker::{ChartObject, StaticChart, spawn};
//!
//! let chart: StaticChart = [ChartObject::new(Reference::planet(7), Position::new(1500, 1500))]
//!     .into_iter()
//!     .collect();
//! let (listener, pump, handle) = spawn(chart)?;
//!
//! let mut loc = Location::new(listener);
//! loc.set_position(Position::new(1500, 1500));
//! while !loc.state().is_idle() {
//!     pump.pump_timeout(&mut loc, Duration::from_secs(5))?;
//!     // A UI would redraw the cursor and focus from these.
//!     let _events = loc.take_events();
//! }
//! assert_eq!(loc.focused_object(), Some(Reference::planet(7)));
//! assert!(loc.events().is_empty());
//!
//! // Dropping the coordinator closes the request channel and stops the worker.
//! drop(loc);
//! handle.join()?;
//! # Ok::<(), starchart_worker::WorkerError>(())
//! ```

mod chart;
mod error;
mod worker;

pub use chart::{ChartObject, Starchart, StaticChart};
pub use error::WorkerError;
pub use worker::{Reply, ReplyPump, Request, WorkerHandle, WorkerListener, spawn};
