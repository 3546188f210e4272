// Copyright 2026 the Starchart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors reported by the worker connection.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The worker thread could not be started.
    #[error("failed to spawn starchart worker thread")]
    Spawn(#[from] std::io::Error),

    /// The worker is gone and no replies are left to deliver.
    #[error("starchart worker disconnected")]
    Disconnected,

    /// The worker thread panicked.
    #[error("starchart worker panicked")]
    Panicked,
}
