/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Caller-supplied sink for request/response transcripts.
//!
//! Structured diagnostics always go through `tracing`. A [`Logger`] is the
//! separate, opt-in hook for a human-readable wire transcript; callers check
//! [`Logger::is_enabled`] before building a message.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::Level;

pub trait Logger: Send + Sync {
    fn is_enabled(&self) -> bool;

    fn log(&self, message: fmt::Arguments<'_>);
}

/// Discards everything. The default hook.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn is_enabled(&self) -> bool {
        false
    }

    fn log(&self, _message: fmt::Arguments<'_>) {}
}

/// Forwards transcripts to `tracing` at DEBUG under the `gnip_client::wire` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn is_enabled(&self) -> bool {
        tracing::enabled!(target: "gnip_client::wire", Level::DEBUG)
    }

    fn log(&self, message: fmt::Arguments<'_>) {
        tracing::debug!(target: "gnip_client::wire", "{}", message);
    }
}

/// Keeps every transcript line in memory.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<String>>,
}

impl MemoryLogger {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Logger for MemoryLogger {
    fn is_enabled(&self) -> bool {
        true
    }

    fn log(&self, message: fmt::Arguments<'_>) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}
