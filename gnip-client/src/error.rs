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

//! Error taxonomy shared by every client operation.

use crate::codec::CodecError;
use std::fmt;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Coarse classification of an [`Error`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// The request never completed: connect, timeout, or broken stream.
    Transport,
    /// The service answered with a non-2xx status.
    Service,
    /// A document could not be serialized, deserialized, or (de)compressed.
    Encoding,
    /// The caller supplied an invalid argument; no request was sent.
    Usage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Service => "service",
            ErrorKind::Encoding => "encoding",
            ErrorKind::Usage => "usage",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
    #[error("service rejected request: {0}")]
    Service(#[from] ServiceError),
    #[error("encoding failure: {0}")]
    Encoding(#[from] CodecError),
    #[error("invalid argument: {0}")]
    Usage(String),
}

impl Error {
    pub(crate) fn usage(message: impl Into<String>) -> Self {
        Error::Usage(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) => ErrorKind::Transport,
            Error::Service(_) => ErrorKind::Service,
            Error::Encoding(_) => ErrorKind::Encoding,
            Error::Usage(_) => ErrorKind::Usage,
        }
    }

    /// HTTP status of a service fault, `None` for every other kind.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Service(service) => Some(service.status()),
            _ => None,
        }
    }

    pub fn as_service(&self) -> Option<&ServiceError> {
        match self {
            Error::Service(service) => Some(service),
            _ => None,
        }
    }
}

/// A non-2xx answer from the service, carrying its status and message.
///
/// Only the response translator builds these, so every instance reflects a
/// response that actually came back over the wire.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("status {status}: {message}")]
pub struct ServiceError {
    status: u16,
    message: String,
}

impl ServiceError {
    pub(crate) fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Failures below the HTTP status line.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("unable to connect to {url}: {reason}")]
    Connect { url: String, reason: String },
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("malformed response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },
    #[error("unable to build request: {0}")]
    InvalidRequest(String),
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },
}
