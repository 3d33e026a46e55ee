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

mod support;

use gnip_client::resource::{Filter, Publisher};
use gnip_client::transport::HttpResponse;
use gnip_client::{ErrorKind, TransportError};
use integration_test_utils::{error_document, gzip_response, test_config, xml_response};
use support::make_connection;

#[test]
fn missing_filter_reports_structured_message() {
    let (connection, exchange) = make_connection(test_config());
    exchange.push_response(xml_response(404, &error_document("Not Found")).with_reason("Not Found"));

    let err = connection
        .get_filter("localPublisher", "missingFilter")
        .expect_err("404 should fail");

    assert_eq!(err.kind(), ErrorKind::Service);
    let service = err.as_service().expect("service fault");
    assert_eq!(service.status(), 404);
    assert_eq!(service.message(), "Not Found");
    assert!(service.is_not_found());
}

#[test]
fn unparsable_error_body_uses_status_line() {
    let (connection, exchange) = make_connection(test_config());
    exchange.push_response(
        HttpResponse::new(500, "<html><body>Internal error</body></html>")
            .with_reason("Internal Server Error"),
    );

    let err = connection
        .create_filter("localPublisher", &Filter::new("f"))
        .expect_err("500 should fail");

    assert_eq!(err.status(), Some(500));
    assert_eq!(
        err.as_service().expect("service fault").message(),
        "Error with request code: 500 message: Internal Server Error"
    );
}

#[test]
fn gzip_error_body_is_inflated_before_translation() {
    let (connection, exchange) = make_connection(test_config());
    exchange.push_response(gzip_response(401, &error_document("Invalid credentials")));

    let err = connection.get_publishers().expect_err("401 should fail");

    assert_eq!(
        err.as_service().expect("service fault").message(),
        "Invalid credentials"
    );
}

#[test]
fn transport_failures_keep_their_kind() {
    let (connection, exchange) = make_connection(test_config());
    exchange.push_failure(TransportError::Timeout {
        url: "http://gnip.test/publishers.xml".to_string(),
    });

    let err = connection.get_publishers().expect_err("timeout should fail");

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.status().is_none());
}

#[test]
fn wrong_document_in_success_body_is_an_encoding_fault() {
    let (connection, exchange) = make_connection(test_config());
    exchange.push_response(xml_response(200, r#"<filter name="f"/>"#));

    let err = connection
        .get_publisher("localPublisher")
        .expect_err("root mismatch should fail");

    assert_eq!(err.kind(), ErrorKind::Encoding);
}

#[test]
fn invalid_arguments_never_reach_the_wire() {
    let (connection, exchange) = make_connection(test_config());

    let err = connection
        .create_publisher(&Publisher::new(""))
        .expect_err("empty name should fail");

    assert_eq!(err.kind(), ErrorKind::Usage);
    assert_eq!(exchange.request_count(), 0);
}
