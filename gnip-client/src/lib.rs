/********************************************************************************
 * Copyright (c) 2024 Contributors to the Eclipse Foundation
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
//! # gnip-client
//!
//! `gnip-client` is a blocking client for the Gnip activity streaming service.
//! Publishers push activities, consumers define filters made of rules, and
//! both poll minute-aligned buckets of activities or notifications.
//!
//! Typical usage is centered on [`Config`] and [`GnipConnection`].
//!
//! ## Consuming a filter
//!
//! ```no_run
//! use gnip_client::resource::{Filter, Rule, RuleType};
//! use gnip_client::{Config, GnipConnection};
//!
//! # fn main() -> gnip_client::Result<()> {
//! let config = Config::builder("me@example.com", "secret")
//!     .use_gzip(true)
//!     .build()?;
//! let gnip = GnipConnection::new(config)?;
//!
//! let filter = Filter::new("my-filter")
//!     .with_full_data(false)
//!     .with_rule(Rule::new(RuleType::Actor, "joe"));
//! gnip.create_filter("twitter", &filter)?;
//!
//! for activity in &gnip.get_filter_activities("twitter", &filter, None)? {
//!     println!("{} {}", activity.at, activity.action);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Tunneling contract
//!
//! With `tunnel_over_post` set, updates and deletes travel as POST with an
//! `;edit` or `;delete` suffix. Any [`transport::HttpExchange`] can stand in
//! for the network:
//!
//! ```
//! use gnip_client::resource::Filter;
//! use gnip_client::transport::{HttpExchange, HttpRequest, HttpResponse, Method};
//! use gnip_client::{Config, GnipConnection, TransportError};
//!
//! struct Expect;
//!
//! impl HttpExchange for Expect {
//!     fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
//!         assert_eq!(request.method, Method::Post);
//!         assert!(request.url.ends_with("/publishers/twitter/filters/mine.xml;edit"));
//!         Ok(HttpResponse::new(200, "<result>Success</result>"))
//!     }
//! }
//!
//! let config = Config::builder("user", "secret")
//!     .tunnel_over_post(true)
//!     .build()
//!     .unwrap();
//! let gnip = GnipConnection::with_exchange(config, Expect);
//!
//! assert!(gnip.update_filter("twitter", &Filter::new("mine")).unwrap().is_success());
//! ```
//!
//! ## Architecture map
//!
//! - API facade: [`GnipConnection`] validates arguments and picks URLs
//! - Resource model: typed documents in [`resource`]
//! - Codec: XML and gzip framing in [`codec`]
//! - Transport: headers, tunneling, and compression in [`transport`]
//! - Translator: non-2xx responses into [`ServiceError`]
//!
//! ## Observability model
//!
//! The crate uses `tracing` for logs/events.
//! Library code emits events and does not initialize a global subscriber.
//! Binaries and tests are responsible for one-time `tracing_subscriber`
//! initialization. A separate [`Logger`] hook receives a plain wire
//! transcript when the caller installs one.

mod bucket;
pub use bucket::{bucket_token, floor_to_bucket, Bucket, BUCKET_WINDOW_MILLIS, CURRENT_BUCKET};

pub mod codec;
pub use codec::{CodecError, ContentEncoding, WirePayload};

mod config;
pub use config::{
    Config, ConfigBuilder, ConfigFile, DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT,
    DEFAULT_SERVER_URL, USER_AGENT,
};

mod connection;
pub use connection::GnipConnection;

mod error;
pub use error::{Error, ErrorKind, Result, ServiceError, TransportError};

mod logger;
pub use logger::{Logger, MemoryLogger, NoopLogger, TracingLogger};

#[doc(hidden)]
pub mod observability;

pub mod resource;

mod resource_path;
pub use resource_path::StreamKind;

mod translator;

pub mod transport;
