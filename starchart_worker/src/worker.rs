// Copyright 2026 the Starchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The worker thread and its connection to a coordinator.

use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use starchart_location::{Listener, Location, LockFlags, ObjectList, Position};

use crate::{Starchart, WorkerError};

const THREAD_NAME: &str = "starchart-worker";

/// A query sent to the worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    /// Build the object list for a position.
    ObjectList(Position),
    /// Resolve a lock near a position.
    LockObject(Position, LockFlags),
}

/// The worker's answer to one [`Request`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Answer to [`Request::ObjectList`].
    ObjectList(ObjectList),
    /// Answer to [`Request::LockObject`]: the lock target.
    Position(Position),
}

impl Reply {
    /// Feeds this reply into a coordinator.
    pub fn apply<L: Listener>(self, loc: &mut Location<L>) {
        match self {
            Self::ObjectList(list) => loc.set_object_list(list),
            Self::Position(pos) => loc.set_position(pos),
        }
    }
}

/// [`Listener`] that forwards queries to the worker thread.
///
/// Cloning yields another sender on the same connection. The worker stops
/// once every clone is dropped.
#[derive(Clone, Debug)]
pub struct WorkerListener {
    requests: Sender<Request>,
}

impl WorkerListener {
    fn send(&self, request: Request) {
        if let Err(err) = self.requests.send(request) {
            tracing::warn!(request = ?err.into_inner(), "worker.request dropped: worker gone");
        }
    }
}

impl Listener for WorkerListener {
    fn request_object_list(&mut self, pos: Position) {
        self.send(Request::ObjectList(pos));
    }

    fn request_lock_object(&mut self, pos: Position, flags: LockFlags) {
        self.send(Request::LockObject(pos, flags));
    }
}

/// Receiving end for worker replies; lives on the coordinator's thread.
///
/// Applying a reply appends to the coordinator's event outbox. The pump never
/// drains it: the host calls [`Location::take_events`] after pumping.
#[derive(Debug)]
pub struct ReplyPump {
    replies: Receiver<Reply>,
}

impl ReplyPump {
    /// Applies every reply that is ready, without blocking.
    ///
    /// Returns the number of replies applied.
    pub fn pump<L: Listener>(&self, loc: &mut Location<L>) -> usize {
        let mut applied = 0;
        while let Ok(reply) = self.replies.try_recv() {
            reply.apply(loc);
            applied += 1;
        }
        applied
    }

    /// Waits up to `timeout` for one reply and applies it.
    ///
    /// Returns `Ok(false)` if nothing arrived in time. Replies already sent by
    /// a worker that has since exited are still delivered before
    /// [`WorkerError::Disconnected`] is reported.
    pub fn pump_timeout<L: Listener>(
        &self,
        loc: &mut Location<L>,
        timeout: Duration,
    ) -> Result<bool, WorkerError> {
        match self.replies.recv_timeout(timeout) {
            Ok(reply) => {
                reply.apply(loc);
                Ok(true)
            }
            Err(RecvTimeoutError::Timeout) => Ok(false),
            Err(RecvTimeoutError::Disconnected) => Err(WorkerError::Disconnected),
        }
    }
}

/// Owner of the worker thread.
#[derive(Debug)]
pub struct WorkerHandle {
    thread: JoinHandle<()>,
}

impl WorkerHandle {
    /// Waits for the worker to finish.
    ///
    /// The worker finishes once every [`WorkerListener`] is dropped, or once
    /// the [`ReplyPump`] is dropped and it has a reply to send.
    pub fn join(self) -> Result<(), WorkerError> {
        self.thread.join().map_err(|_| WorkerError::Panicked)
    }

    /// Returns `true` if the worker has stopped.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }
}

/// Starts a worker thread serving `chart`.
pub fn spawn<C: Starchart>(
    chart: C,
) -> Result<(WorkerListener, ReplyPump, WorkerHandle), WorkerError> {
    let (request_tx, request_rx) = crossbeam_channel::unbounded();
    let (reply_tx, reply_rx) = crossbeam_channel::unbounded();

    let thread = std::thread::Builder::new()
        .name(THREAD_NAME.into())
        .spawn(move || serve(chart, &request_rx, &reply_tx))?;

    Ok((
        WorkerListener {
            requests: request_tx,
        },
        ReplyPump { replies: reply_rx },
        WorkerHandle { thread },
    ))
}

fn serve<C: Starchart>(mut chart: C, requests: &Receiver<Request>, replies: &Sender<Reply>) {
    tracing::debug!("worker.start");
    for request in requests {
        tracing::debug!(?request, "worker.request");
        let reply = match request {
            Request::ObjectList(pos) => Reply::ObjectList(chart.object_list(pos)),
            Request::LockObject(pos, flags) => Reply::Position(chart.lock_object(pos, flags)),
        };
        if replies.send(reply).is_err() {
            tracing::warn!("worker.reply dropped: pump gone");
            break;
        }
    }
    tracing::debug!("worker.stop");
}
