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

use gnip_client::transport::HttpRequest;
use gnip_client::resource::Resource;
use gnip_client::{Config, GnipConnection};
use integration_test_utils::{RecordingExchange, TEST_SERVER};
use std::sync::Arc;

pub(crate) type RecordingConnection = GnipConnection<Arc<RecordingExchange>>;

pub(crate) fn make_connection(config: Config) -> (RecordingConnection, Arc<RecordingExchange>) {
    integration_test_utils::init_logging();

    let exchange = RecordingExchange::new();
    let connection = GnipConnection::with_exchange(config, exchange.clone());
    (connection, exchange)
}

pub(crate) fn url(path: &str) -> String {
    format!("{TEST_SERVER}{path}")
}

/// Decodes the uncompressed XML body of a recorded request.
#[allow(dead_code)]
pub(crate) fn request_document<R: Resource>(request: &HttpRequest) -> R {
    let body = request
        .body
        .as_deref()
        .expect("request should carry a body");
    gnip_client::codec::from_xml(body).expect("request body should decode")
}
