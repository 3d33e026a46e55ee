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

use chrono::{TimeZone, Utc};
use gnip_client::resource::{Activities, Activity, Actor, Payload, Publisher, RuleType};
use gnip_client::transport::{HttpResponse, Method};
use integration_test_utils::{publishers_document, test_config, test_config_builder, xml_response};
use support::{make_connection, request_document, url};

#[test]
fn get_publishers_lists_every_publisher() {
    let (connection, exchange) = make_connection(test_config());
    exchange.push_response(xml_response(200, &publishers_document(&["digg", "twitter"])));

    let publishers = connection.get_publishers().expect("listing should decode");

    assert_eq!(exchange.last_request().url, url("/publishers.xml"));
    assert_eq!(
        publishers.names().collect::<Vec<_>>(),
        vec!["digg", "twitter"]
    );
}

#[test]
fn get_publisher_reads_supported_rule_types() {
    let (connection, exchange) = make_connection(test_config());
    exchange.push_response(xml_response(
        200,
        r#"<publisher name="twitter"><supportedRuleTypes><type>actor</type><type>to</type></supportedRuleTypes></publisher>"#,
    ));

    let publisher = connection.get_publisher("twitter").expect("publisher");

    assert_eq!(exchange.last_request().url, url("/publishers/twitter.xml"));
    assert_eq!(
        publisher.supported_rule_types(),
        &[RuleType::Actor, RuleType::To]
    );
}

#[test]
fn create_update_delete_publisher_urls() {
    let config = test_config_builder()
        .tunnel_over_post(true)
        .build()
        .expect("config");
    let (connection, exchange) = make_connection(config);
    let publisher = Publisher::new("localPublisher").with_rule_types([RuleType::Actor]);

    connection.create_publisher(&publisher).expect("create");
    connection.update_publisher(&publisher).expect("update");
    connection.delete_publisher("localPublisher").expect("delete");

    let requests = exchange.requests();
    let seen: Vec<(Method, String)> = requests
        .iter()
        .map(|request| (request.method, request.url.clone()))
        .collect();
    assert_eq!(
        seen,
        vec![
            (Method::Post, url("/publishers")),
            (Method::Post, url("/publishers/localPublisher.xml;edit")),
            (Method::Post, url("/publishers/localPublisher.xml;delete")),
        ]
    );
    assert_eq!(request_document::<Publisher>(&requests[0]), publisher);
}

#[test]
fn publish_posts_batch_to_activity_collection() {
    let (connection, exchange) = make_connection(test_config());
    let at = Utc
        .with_ymd_and_hms(2008, 7, 2, 11, 16, 16)
        .single()
        .expect("instant");
    let payload = Payload::new(None, Some("body".to_string()), "raw").expect("payload");
    let batch = Activities::new([
        Activity::new(at, "upload").with_actor(Actor::new("joe")),
        Activity::new(at, "comment").with_payload(payload),
    ]);

    let ack = connection
        .publish("localPublisher", &batch)
        .expect("publish should succeed")
        .expect("non-empty publish should send a request");

    assert!(ack.is_success());
    let request = exchange.last_request();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, url("/publishers/localPublisher/activity"));
    assert_eq!(request_document::<Activities>(&request), batch);
}

#[test]
fn empty_publish_sends_nothing() {
    let (connection, exchange) = make_connection(test_config());

    let outcome = connection
        .publish("localPublisher", &Activities::default())
        .expect("empty publish should succeed");

    assert!(outcome.is_none());
    assert_eq!(exchange.request_count(), 0);
}

#[test]
fn empty_success_body_yields_empty_acknowledgement() {
    let (connection, exchange) = make_connection(test_config());
    exchange.push_response(HttpResponse::new(201, Vec::new()));

    let ack = connection
        .create_publisher(&Publisher::new("localPublisher"))
        .expect("create should succeed");

    assert!(!ack.is_success());
    assert!(ack.message.is_empty());
}
