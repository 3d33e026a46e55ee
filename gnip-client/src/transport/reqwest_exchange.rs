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

use super::{HttpExchange, HttpRequest, HttpResponse, Method};
use crate::config::Config;
use crate::error::TransportError;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;

/// [`HttpExchange`] over a blocking `reqwest` client.
///
/// The client keeps no idle connections, so every exchange opens its own
/// connection. Response bodies are returned exactly as received.
#[derive(Clone, Debug)]
pub struct ReqwestExchange {
    client: Client,
}

impl ReqwestExchange {
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            // Bounds the full request and body, not each read.
            .timeout(config.read_timeout())
            .pool_max_idle_per_host(0)
            .redirect(Policy::none())
            .build()
            .map_err(|err| TransportError::InvalidRequest(err.to_string()))?;

        Ok(Self { client })
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl HttpExchange for ReqwestExchange {
    fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
            read_timeout,
        } = request;

        let mut builder = self
            .client
            .request(Self::method(method), url.as_str())
            .timeout(read_timeout);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().map_err(|err| map_error(&url, err))?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().map_err(|err| map_error(&url, err))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
            headers,
            body: body.to_vec(),
        })
    }
}

fn map_error(url: &str, err: reqwest::Error) -> TransportError {
    let url = url.to_string();
    if err.is_timeout() {
        TransportError::Timeout { url }
    } else if err.is_connect() {
        TransportError::Connect {
            url,
            reason: err.to_string(),
        }
    } else if err.is_body() || err.is_decode() {
        TransportError::MalformedResponse {
            url,
            reason: err.to_string(),
        }
    } else if err.is_builder() {
        TransportError::InvalidRequest(err.to_string())
    } else {
        TransportError::Request {
            url,
            reason: err.to_string(),
        }
    }
}
