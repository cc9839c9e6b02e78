// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Background execution of expensive operations.
//!
//! Key generation blocks for a prime search, so callers that must stay
//! responsive run it off-thread. Each job owns one spawned thread and
//! shares no state with other jobs. There is no cancellation: dropping a
//! handle detaches the thread and the work runs to completion
//! unobserved.

use std::panic;
use std::thread::{self, JoinHandle};

use rand::rngs::OsRng;
use serde_json::Value;

use crate::key::{KeyPair, KeyPairBuilder};
use crate::ops::{handle_request, Response};
use crate::Result;

/// Handle to one key generation running on its own thread.
pub struct GenerateJob {
    handle: JoinHandle<Result<KeyPair>>,
}

/// Starts a key generation configured by `builder` on a fresh thread.
pub fn spawn_generate(builder: KeyPairBuilder) -> GenerateJob {
    let handle = thread::spawn(move || {
        let mut rng = OsRng;
        builder.build(&mut rng)
    });
    GenerateJob { handle }
}

impl GenerateJob {
    /// True once the generation thread has run to completion.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Blocks until generation completes and returns its outcome.
    ///
    /// A panic on the worker thread (the fatal entropy failure path)
    /// resumes on the caller.
    pub fn wait(self) -> Result<KeyPair> {
        match self.handle.join() {
            Ok(outcome) => outcome,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}

/// Handle to one message-contract request running on its own thread.
pub struct RequestJob {
    handle: JoinHandle<Response>,
}

/// Executes `request` through [`handle_request`] on a fresh thread.
pub fn spawn_request(request: Value) -> RequestJob {
    let handle = thread::spawn(move || handle_request(&request));
    RequestJob { handle }
}

impl RequestJob {
    /// True once the request thread has run to completion.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Blocks until the request completes and returns its response.
    pub fn wait(self) -> Response {
        match self.handle.join() {
            Ok(response) => response,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}
