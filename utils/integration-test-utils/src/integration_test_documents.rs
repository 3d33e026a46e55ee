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

//! Canned service documents and responses.

use gnip_client::codec;
use gnip_client::transport::HttpResponse;

pub const SUCCESS_DOCUMENT: &str =
    r#"<?xml version="1.0" encoding="UTF-8"?><result>Success</result>"#;

pub fn xml_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse::new(status, body.as_bytes().to_vec())
        .with_header("Content-Type", "application/xml")
}

pub fn success_response() -> HttpResponse {
    xml_response(200, SUCCESS_DOCUMENT).with_reason("OK")
}

/// `body` gzipped with a matching `Content-Encoding` header.
pub fn gzip_response(status: u16, body: &str) -> HttpResponse {
    let compressed = codec::gzip(body.as_bytes()).expect("test body should compress");
    HttpResponse::new(status, compressed)
        .with_header("Content-Type", "application/xml")
        .with_header("Content-Encoding", "gzip")
}

pub fn error_document(message: &str) -> String {
    format!(r#"<?xml version="1.0" encoding="UTF-8"?><error>{message}</error>"#)
}

pub fn publishers_document(names: &[&str]) -> String {
    let publishers: String = names
        .iter()
        .map(|name| format!(r#"<publisher name="{name}"/>"#))
        .collect();
    format!(r#"<?xml version="1.0" encoding="UTF-8"?><publishers>{publishers}</publishers>"#)
}

pub fn filter_document(name: &str, full_data: bool, rules: &[(&str, &str)]) -> String {
    let rules: String = rules
        .iter()
        .map(|(rule_type, value)| format!(r#"<rule type="{rule_type}" value="{value}"/>"#))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><filter name="{name}" fullData="{full_data}">{rules}</filter>"#
    )
}

/// One activity per `(at, action, actor)` triple.
pub fn activities_document(publisher: &str, activities: &[(&str, &str, &str)]) -> String {
    let activities: String = activities
        .iter()
        .map(|(at, action, actor)| {
            format!("<activity><at>{at}</at><action>{action}</action><actor>{actor}</actor></activity>")
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><activities publisher="{publisher}">{activities}</activities>"#
    )
}
