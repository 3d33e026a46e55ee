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

//! Authenticated HTTP exchange with the service.
//!
//! [`Transport`] owns every wire concern: standard headers, method
//! tunneling, request compression, response inflation, and mapping of
//! non-2xx answers to [`ServiceError`](crate::ServiceError). The socket work
//! itself sits behind [`HttpExchange`] so it can be replaced in tests.

mod reqwest_exchange;
pub use reqwest_exchange::ReqwestExchange;

use crate::codec::{self, ContentEncoding, WirePayload};
use crate::config::Config;
use crate::error::{Error, TransportError};
use crate::logger::{Logger, NoopLogger};
use crate::observability::{events, fields};
use crate::resource_path::with_query;
use crate::translator;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn, Level};

const COMPONENT: &str = "transport";

pub const CONTENT_TYPE_XML: &str = "application/xml";
pub const EDIT_SUFFIX: &str = ";edit";
pub const DELETE_SUFFIX: &str = ";delete";

pub const HEADER_ACCEPT_ENCODING: &str = "Accept-Encoding";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_ENCODING: &str = "Content-Encoding";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_USER_AGENT: &str = "User-Agent";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully prepared request as it goes on the wire.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// Sent with an exact `Content-Length` when present.
    pub body: Option<Vec<u8>>,
    pub read_timeout: Duration,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub reason: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason: None,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// One blocking request/response cycle.
///
/// Implementations must not follow redirects, decompress bodies, or reuse
/// connections between calls.
pub trait HttpExchange: Send + Sync {
    fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: HttpExchange + ?Sized> HttpExchange for Arc<T> {
    fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).exchange(request)
    }
}

impl<T: HttpExchange + ?Sized> HttpExchange for Box<T> {
    fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).exchange(request)
    }
}

pub struct Transport<E> {
    config: Config,
    exchange: E,
    logger: Arc<dyn Logger>,
}

impl<E: HttpExchange> Transport<E> {
    pub fn new(config: Config, exchange: E) -> Self {
        Self {
            config,
            exchange,
            logger: Arc::new(NoopLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn exchange_ref(&self) -> &E {
        &self.exchange
    }

    pub fn get(&self, url: &str) -> Result<Vec<u8>, Error> {
        self.send(Method::Get, url, &[], None)
    }

    pub fn post(&self, url: &str, body: WirePayload) -> Result<Vec<u8>, Error> {
        self.send(Method::Post, url, &[], Some(body))
    }

    pub fn put(&self, url: &str, body: WirePayload) -> Result<Vec<u8>, Error> {
        self.send(Method::Put, url, &[], Some(body))
    }

    pub fn delete(&self, url: &str, query: &[(&str, &str)]) -> Result<Vec<u8>, Error> {
        self.send(Method::Delete, url, query, None)
    }

    /// Method and URL actually put on the wire for a logical request.
    pub fn dispatch(&self, method: Method, url: &str) -> (Method, String) {
        if !self.config.tunnel_over_post() {
            return (method, url.to_string());
        }
        match method {
            Method::Put => (Method::Post, format!("{url}{EDIT_SUFFIX}")),
            Method::Delete => (Method::Post, format!("{url}{DELETE_SUFFIX}")),
            Method::Get | Method::Post => (method, url.to_string()),
        }
    }

    /// Runs one logical request and returns the (inflated) 2xx body.
    pub fn send(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, &str)],
        body: Option<WirePayload>,
    ) -> Result<Vec<u8>, Error> {
        let (wire_method, target) = self.dispatch(method, url);
        let target = with_query(&target, query);
        if wire_method != method {
            debug!(
                event = events::HTTP_REQUEST_TUNNELED,
                component = COMPONENT,
                method = method.as_str(),
                wire_method = wire_method.as_str(),
                url = fields::format_url_path(&target),
                "tunneling request over POST"
            );
        }

        let request = self.prepare(wire_method, target, body)?;
        self.log_request(&request);

        debug!(
            event = events::HTTP_REQUEST_START,
            component = COMPONENT,
            method = wire_method.as_str(),
            url = fields::format_url_path(&request.url),
            bytes = request.body.as_ref().map_or(0, Vec::len),
            "sending request"
        );

        let url_for_errors = request.url.clone();
        let response = self.exchange.exchange(request).map_err(|err| {
            warn!(
                event = events::HTTP_REQUEST_FAILED,
                component = COMPONENT,
                method = wire_method.as_str(),
                url = fields::format_url_path(&url_for_errors),
                err = %err,
                "request did not complete"
            );
            Error::from(err)
        })?;

        self.complete(&url_for_errors, response)
    }

    fn prepare(
        &self,
        method: Method,
        url: String,
        body: Option<WirePayload>,
    ) -> Result<HttpRequest, Error> {
        let mut headers = vec![
            (HEADER_CONTENT_TYPE.to_string(), CONTENT_TYPE_XML.to_string()),
            (HEADER_AUTHORIZATION.to_string(), self.config.authorization()),
            (
                HEADER_USER_AGENT.to_string(),
                self.config.user_agent().to_string(),
            ),
        ];
        if self.config.use_gzip() {
            headers.push((HEADER_ACCEPT_ENCODING.to_string(), codec::GZIP.to_string()));
        }

        // POST always declares its length, even a bodiless tunneled DELETE.
        let body = match (body, method) {
            (Some(payload), _) => Some(self.compress(payload)?),
            (None, Method::Post | Method::Put) => Some(WirePayload::default()),
            (None, Method::Get | Method::Delete) => None,
        };
        if let Some(encoding) = body
            .as_ref()
            .filter(|payload| !payload.is_empty())
            .and_then(|payload| payload.encoding().header_value())
        {
            headers.push((HEADER_CONTENT_ENCODING.to_string(), encoding.to_string()));
        }

        Ok(HttpRequest {
            method,
            url,
            headers,
            body: body.map(WirePayload::into_bytes),
            read_timeout: self.config.read_timeout(),
        })
    }

    fn compress(&self, payload: WirePayload) -> Result<WirePayload, Error> {
        if !self.config.use_gzip() || payload.is_compressed() || payload.is_empty() {
            return Ok(payload);
        }
        let compressed = codec::gzip(payload.bytes())?;
        Ok(WirePayload::new(compressed, ContentEncoding::Gzip))
    }

    fn complete(&self, url: &str, response: HttpResponse) -> Result<Vec<u8>, Error> {
        let encoding = ContentEncoding::from_header(response.header(HEADER_CONTENT_ENCODING));
        let HttpResponse {
            status,
            reason,
            body,
            ..
        } = response;

        if self.logger.is_enabled() {
            self.logger.log(format_args!(
                "Response {status} {}",
                fields::format_optional(reason.as_deref())
            ));
        }

        if !(200..300).contains(&status) {
            // An error body that fails to inflate is still handed over raw.
            let body = match encoding {
                ContentEncoding::Gzip => codec::gunzip(&body).unwrap_or(body),
                ContentEncoding::Identity => body,
            };
            let service = translator::translate(status, reason.as_deref(), &body);
            warn!(
                event = events::HTTP_RESPONSE_REJECTED,
                component = COMPONENT,
                url = fields::format_url_path(url),
                status,
                err = %service,
                "service rejected request"
            );
            return Err(Error::Service(service));
        }

        let body = match encoding {
            ContentEncoding::Identity => body,
            ContentEncoding::Gzip => {
                let inflated = codec::gunzip(&body).map_err(|err| {
                    Error::Transport(TransportError::MalformedResponse {
                        url: url.to_string(),
                        reason: err.to_string(),
                    })
                })?;
                debug!(
                    event = events::HTTP_RESPONSE_INFLATED,
                    component = COMPONENT,
                    compressed = body.len(),
                    bytes = inflated.len(),
                    "inflated gzip response"
                );
                inflated
            }
        };

        debug!(
            event = events::HTTP_REQUEST_OK,
            component = COMPONENT,
            url = fields::format_url_path(url),
            status,
            bytes = body.len(),
            "request completed"
        );
        if tracing::enabled!(Level::TRACE) {
            tracing::trace!(
                event = events::HTTP_REQUEST_OK,
                component = COMPONENT,
                body = fields::format_body_preview(Some(body.as_slice())).as_str(),
                "response body"
            );
        }

        Ok(body)
    }

    fn log_request(&self, request: &HttpRequest) {
        if !self.logger.is_enabled() {
            return;
        }
        self.logger
            .log(format_args!("HTTP {} to {}", request.method, request.url));
        // Compressed bodies are not readable, so only plain ones are echoed.
        if let (false, Some(body)) = (self.config.use_gzip(), request.body.as_deref()) {
            if !body.is_empty() {
                self.logger
                    .log(format_args!("{}", String::from_utf8_lossy(body)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        HttpExchange, HttpRequest, HttpResponse, Method, Transport, CONTENT_TYPE_XML,
        HEADER_CONTENT_ENCODING,
    };
    use crate::codec::{self, WirePayload};
    use crate::config::Config;
    use crate::error::{ErrorKind, TransportError};
    use crate::logger::MemoryLogger;
    use std::sync::{Arc, Mutex, PoisonError};

    struct CannedExchange {
        response: HttpResponse,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl CannedExchange {
        fn new(response: HttpResponse) -> Arc<Self> {
            Arc::new(Self {
                response,
                seen: Mutex::new(Vec::new()),
            })
        }

        fn last(&self) -> HttpRequest {
            self.seen
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .last()
                .cloned()
                .expect("a request should have been sent")
        }
    }

    impl HttpExchange for CannedExchange {
        fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(request);
            Ok(self.response.clone())
        }
    }

    struct RefusingExchange;

    impl HttpExchange for RefusingExchange {
        fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            Err(TransportError::Connect {
                url: request.url,
                reason: "connection refused".to_string(),
            })
        }
    }

    fn config(tunnel: bool, gzip: bool) -> Config {
        Config::builder("user", "secret")
            .server("http://localhost:8080")
            .tunnel_over_post(tunnel)
            .use_gzip(gzip)
            .build()
            .expect("config")
    }

    #[test]
    fn every_request_carries_standard_headers() {
        let exchange = CannedExchange::new(HttpResponse::new(200, "<result>Success</result>"));
        let transport = Transport::new(config(false, false), exchange.clone());

        transport
            .get("http://localhost:8080/publishers.xml")
            .expect("request should succeed");

        let request = exchange.last();
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.header("content-type"), Some(CONTENT_TYPE_XML));
        assert_eq!(
            request.header("Authorization"),
            Some("Basic dXNlcjpzZWNyZXQ=")
        );
        assert!(request
            .header("User-Agent")
            .is_some_and(|agent| agent.starts_with("Gnip-Client-Rust/")));
        assert_eq!(request.header("Accept-Encoding"), None);
        assert_eq!(request.body, None);
    }

    #[test]
    fn tunneling_rewrites_put_and_delete_only() {
        let transport = Transport::new(config(true, false), RefusingExchange);

        assert_eq!(
            transport.dispatch(Method::Put, "http://h/publishers/p/filters/f.xml"),
            (Method::Post, "http://h/publishers/p/filters/f.xml;edit".to_string())
        );
        assert_eq!(
            transport.dispatch(Method::Delete, "http://h/publishers/p/filters/f.xml"),
            (
                Method::Post,
                "http://h/publishers/p/filters/f.xml;delete".to_string()
            )
        );
        assert_eq!(
            transport.dispatch(Method::Get, "http://h/publishers.xml"),
            (Method::Get, "http://h/publishers.xml".to_string())
        );
    }

    #[test]
    fn tunneled_delete_sends_empty_post_body() {
        let exchange = CannedExchange::new(HttpResponse::new(200, ""));
        let transport = Transport::new(config(true, false), exchange.clone());

        transport
            .delete("http://h/publishers/p/filters/f/rules", &[("type", "actor"), ("value", "joe")])
            .expect("delete should succeed");

        let request = exchange.last();
        assert_eq!(request.method, Method::Post);
        assert_eq!(
            request.url,
            "http://h/publishers/p/filters/f/rules;delete?type=actor&value=joe"
        );
        assert_eq!(request.body, Some(Vec::new()));
        assert_eq!(request.header(HEADER_CONTENT_ENCODING), None);
    }

    #[test]
    fn gzip_mode_compresses_body_and_negotiates_encoding() {
        let exchange = CannedExchange::new(HttpResponse::new(200, ""));
        let transport = Transport::new(config(false, true), exchange.clone());
        let document = b"<?xml version=\"1.0\" encoding=\"UTF-8\"?><rules/>".to_vec();

        transport
            .post("http://h/publishers/p/filters/f/rules", WirePayload::identity(document.clone()))
            .expect("post should succeed");

        let request = exchange.last();
        assert_eq!(request.header("Accept-Encoding"), Some("gzip"));
        assert_eq!(request.header("Content-Encoding"), Some("gzip"));
        let body = request.body.expect("body");
        assert_eq!(codec::gunzip(&body).expect("inflate"), document);
    }

    #[test]
    fn gzip_response_is_inflated_even_when_gzip_mode_is_off() {
        let compressed = codec::gzip(b"<result>Success</result>").expect("gzip");
        let exchange = CannedExchange::new(
            HttpResponse::new(200, compressed).with_header("content-encoding", "GZIP"),
        );
        let transport = Transport::new(config(false, false), exchange);

        let body = transport.get("http://h/publishers.xml").expect("get");

        assert_eq!(body, b"<result>Success</result>");
    }

    #[test]
    fn corrupt_gzip_response_is_a_transport_fault() {
        let exchange = CannedExchange::new(
            HttpResponse::new(200, b"not gzip".to_vec()).with_header("Content-Encoding", "gzip"),
        );
        let transport = Transport::new(config(false, false), exchange);

        let err = transport.get("http://h/publishers.xml").expect_err("corrupt");

        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn non_success_status_is_translated() {
        let exchange = CannedExchange::new(
            HttpResponse::new(404, "<error>Not Found</error>").with_reason("Not Found"),
        );
        let transport = Transport::new(config(false, false), exchange);

        let err = transport.get("http://h/publishers/nope.xml").expect_err("404");

        let service = err.as_service().expect("service fault");
        assert_eq!(service.status(), 404);
        assert_eq!(service.message(), "Not Found");
    }

    #[test]
    fn connect_failure_surfaces_as_transport_kind() {
        let transport = Transport::new(config(false, false), RefusingExchange);

        let err = transport.get("http://h/publishers.xml").expect_err("refused");

        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[test]
    fn logger_hook_sees_request_line_and_plain_body() {
        let logger = MemoryLogger::new();
        let exchange = CannedExchange::new(HttpResponse::new(200, "").with_reason("OK"));
        let transport =
            Transport::new(config(false, false), exchange).with_logger(logger.clone());

        transport
            .post("http://h/publishers/p/activity", WirePayload::identity("<activities/>"))
            .expect("post");

        assert_eq!(
            logger.lines(),
            vec![
                "HTTP POST to http://h/publishers/p/activity".to_string(),
                "<activities/>".to_string(),
                "Response 200 OK".to_string(),
            ]
        );
    }
}
