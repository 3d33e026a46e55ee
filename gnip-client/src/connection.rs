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

use crate::bucket::Bucket;
use crate::codec::{self, ContentEncoding, WirePayload};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logger::Logger;
use crate::observability::events;
use crate::resource::{
    validate_name, Acknowledgement, Activities, Filter, Publisher, Publishers, Resource, Rule,
    Rules,
};
use crate::resource_path::{rule_query, ResourcePath, StreamKind};
use crate::transport::{HttpExchange, ReqwestExchange, Transport};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info, warn};

const COMPONENT: &str = "connection";

/// Blocking client for publisher, filter, rule, and activity operations.
///
/// Every call issues exactly one request (none for an empty publish) and
/// either returns the decoded document or an [`Error`]. Argument problems
/// are reported as [`ErrorKind::Usage`](crate::ErrorKind::Usage) before
/// anything is sent.
pub struct GnipConnection<E = ReqwestExchange> {
    transport: Transport<E>,
}

impl GnipConnection<ReqwestExchange> {
    pub fn new(config: Config) -> Result<Self> {
        let exchange = ReqwestExchange::new(&config)?;
        Ok(Self::with_exchange(config, exchange))
    }
}

impl<E: HttpExchange> GnipConnection<E> {
    pub fn with_exchange(config: Config, exchange: E) -> Self {
        Self {
            transport: Transport::new(config, exchange),
        }
    }

    pub fn with_logger(self, logger: Arc<dyn Logger>) -> Self {
        Self {
            transport: self.transport.with_logger(logger),
        }
    }

    pub fn config(&self) -> &Config {
        self.transport.config()
    }

    pub fn transport(&self) -> &Transport<E> {
        &self.transport
    }

    fn server(&self) -> &str {
        self.config().server()
    }

    fn encoding(&self) -> ContentEncoding {
        ContentEncoding::from_flag(self.config().use_gzip())
    }

    fn encode<R: Resource>(&self, resource: &R) -> Result<WirePayload> {
        Ok(codec::encode(resource, self.encoding())?)
    }

    /// Runs `call` inside operation start/ok/failed events.
    fn operation<T>(&self, operation: &'static str, call: impl FnOnce() -> Result<T>) -> Result<T> {
        debug!(
            event = events::OPERATION_START,
            component = COMPONENT,
            operation,
            "operation started"
        );
        let outcome = call();
        match &outcome {
            Ok(_) => debug!(
                event = events::OPERATION_OK,
                component = COMPONENT,
                operation,
                "operation completed"
            ),
            Err(err) => warn!(
                event = events::OPERATION_FAILED,
                component = COMPONENT,
                operation,
                kind = %err.kind(),
                err = %err,
                "operation failed"
            ),
        }
        outcome
    }

    fn acknowledge(body: &[u8]) -> Result<Acknowledgement> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Acknowledgement::default());
        }
        Ok(codec::from_xml(body)?)
    }

    fn fetch<R: Resource>(&self, url: &str) -> Result<R> {
        let body = self.transport.get(url)?;
        Ok(codec::decode(&body, ContentEncoding::Identity)?)
    }

    pub fn create_publisher(&self, publisher: &Publisher) -> Result<Acknowledgement> {
        self.operation("create_publisher", || {
            check_name("publisher", &publisher.name)?;
            let body = self.encode(publisher)?;
            let url = ResourcePath::Publishers.url(self.server());
            Self::acknowledge(&self.transport.post(&url, body)?)
        })
    }

    pub fn get_publishers(&self) -> Result<Publishers> {
        self.operation("get_publishers", || {
            self.fetch(&ResourcePath::Publishers.document_url(self.server()))
        })
    }

    pub fn get_publisher(&self, name: &str) -> Result<Publisher> {
        self.operation("get_publisher", || {
            check_name("publisher", name)?;
            self.fetch(&ResourcePath::Publisher(name).document_url(self.server()))
        })
    }

    pub fn update_publisher(&self, publisher: &Publisher) -> Result<Acknowledgement> {
        self.operation("update_publisher", || {
            check_name("publisher", &publisher.name)?;
            let body = self.encode(publisher)?;
            let url = ResourcePath::Publisher(&publisher.name).document_url(self.server());
            Self::acknowledge(&self.transport.put(&url, body)?)
        })
    }

    pub fn delete_publisher(&self, name: &str) -> Result<Acknowledgement> {
        self.operation("delete_publisher", || {
            check_name("publisher", name)?;
            let url = ResourcePath::Publisher(name).document_url(self.server());
            Self::acknowledge(&self.transport.delete(&url, &[])?)
        })
    }

    pub fn create_filter(&self, publisher: &str, filter: &Filter) -> Result<Acknowledgement> {
        self.operation("create_filter", || {
            check_name("publisher", publisher)?;
            check_name("filter", &filter.name)?;
            let body = self.encode(filter)?;
            let url = ResourcePath::Filters { publisher }.url(self.server());
            Self::acknowledge(&self.transport.post(&url, body)?)
        })
    }

    pub fn get_filter(&self, publisher: &str, filter: &str) -> Result<Filter> {
        self.operation("get_filter", || {
            check_name("publisher", publisher)?;
            check_name("filter", filter)?;
            self.fetch(&ResourcePath::Filter { publisher, filter }.document_url(self.server()))
        })
    }

    /// Replaces the stored filter with `filter`, matched by name.
    pub fn update_filter(&self, publisher: &str, filter: &Filter) -> Result<Acknowledgement> {
        self.operation("update_filter", || {
            check_name("publisher", publisher)?;
            check_name("filter", &filter.name)?;
            let body = self.encode(filter)?;
            let url = ResourcePath::Filter {
                publisher,
                filter: &filter.name,
            }
            .document_url(self.server());
            Self::acknowledge(&self.transport.put(&url, body)?)
        })
    }

    pub fn delete_filter(&self, publisher: &str, filter: &str) -> Result<Acknowledgement> {
        self.operation("delete_filter", || {
            check_name("publisher", publisher)?;
            check_name("filter", filter)?;
            let url = ResourcePath::Filter { publisher, filter }.document_url(self.server());
            Self::acknowledge(&self.transport.delete(&url, &[])?)
        })
    }

    pub fn add_rule(&self, publisher: &str, filter: &str, rule: &Rule) -> Result<Acknowledgement> {
        self.operation("add_rule", || {
            check_name("publisher", publisher)?;
            check_name("filter", filter)?;
            check_rule(rule)?;
            let body = self.encode(rule)?;
            let url = ResourcePath::Rules { publisher, filter }.url(self.server());
            Self::acknowledge(&self.transport.post(&url, body)?)
        })
    }

    /// Adds every rule in `rules` with a single request.
    pub fn add_rules(
        &self,
        publisher: &str,
        filter: &str,
        rules: &Rules,
    ) -> Result<Acknowledgement> {
        self.operation("add_rules", || {
            check_name("publisher", publisher)?;
            check_name("filter", filter)?;
            if rules.is_empty() {
                return Err(Error::usage("rule batch must not be empty"));
            }
            rules.rules.iter().try_for_each(check_rule)?;
            let body = self.encode(rules)?;
            let url = ResourcePath::Rules { publisher, filter }.url(self.server());
            Self::acknowledge(&self.transport.post(&url, body)?)
        })
    }

    pub fn delete_rule(
        &self,
        publisher: &str,
        filter: &str,
        rule: &Rule,
    ) -> Result<Acknowledgement> {
        self.operation("delete_rule", || {
            check_name("publisher", publisher)?;
            check_name("filter", filter)?;
            check_rule(rule)?;
            let url = ResourcePath::Rules { publisher, filter }.url(self.server());
            Self::acknowledge(&self.transport.delete(&url, &rule_query(rule))?)
        })
    }

    /// Sends `activities` to the publisher's activity collection.
    ///
    /// An empty batch is not sent; the call returns `Ok(None)`.
    pub fn publish(
        &self,
        publisher: &str,
        activities: &Activities,
    ) -> Result<Option<Acknowledgement>> {
        self.operation("publish", || {
            check_name("publisher", publisher)?;
            if activities.is_empty() {
                info!(
                    event = events::PUBLISH_SKIP_EMPTY,
                    component = COMPONENT,
                    publisher,
                    "no activities to publish"
                );
                return Ok(None);
            }
            let body = self.encode(activities)?;
            let url = ResourcePath::Publish { publisher }.url(self.server());
            Self::acknowledge(&self.transport.post(&url, body)?).map(Some)
        })
    }

    /// Full activities for `publisher`, from the bucket containing `at` or
    /// the current bucket when `at` is `None`.
    pub fn get_publisher_activities(
        &self,
        publisher: &str,
        at: Option<DateTime<Utc>>,
    ) -> Result<Activities> {
        self.operation("get_publisher_activities", || {
            self.poll_stream(publisher, None, StreamKind::Activity, Bucket::from_instant(at))
        })
    }

    pub fn get_publisher_notifications(
        &self,
        publisher: &str,
        at: Option<DateTime<Utc>>,
    ) -> Result<Activities> {
        self.operation("get_publisher_notifications", || {
            self.poll_stream(
                publisher,
                None,
                StreamKind::Notification,
                Bucket::from_instant(at),
            )
        })
    }

    /// Activities matched by `filter`; full data or notifications depending
    /// on `filter.full_data`.
    pub fn get_filter_activities(
        &self,
        publisher: &str,
        filter: &Filter,
        at: Option<DateTime<Utc>>,
    ) -> Result<Activities> {
        self.operation("get_filter_activities", || {
            self.poll_stream(
                publisher,
                Some(&filter.name),
                StreamKind::for_full_data(filter.full_data),
                Bucket::from_instant(at),
            )
        })
    }

    /// Filter stream when `filter` is given, publisher notifications otherwise.
    pub fn poll(
        &self,
        publisher: &str,
        filter: Option<&Filter>,
        at: Option<DateTime<Utc>>,
    ) -> Result<Activities> {
        match filter {
            Some(filter) => self.get_filter_activities(publisher, filter, at),
            None => self.get_publisher_notifications(publisher, at),
        }
    }

    fn poll_stream(
        &self,
        publisher: &str,
        filter: Option<&str>,
        kind: StreamKind,
        bucket: Bucket,
    ) -> Result<Activities> {
        check_name("publisher", publisher)?;
        if let Some(filter) = filter {
            check_name("filter", filter)?;
        }

        let token = bucket.token(self.config().time_correction_millis());
        debug!(
            event = events::POLL_BUCKET_RESOLVED,
            component = COMPONENT,
            publisher,
            kind = kind.as_str(),
            bucket = token.as_str(),
            "resolved poll bucket"
        );

        let url = ResourcePath::Stream {
            publisher,
            filter,
            kind,
        }
        .bucket_url(self.server(), &token);
        self.fetch(&url)
    }
}

fn check_name(what: &str, name: &str) -> Result<()> {
    validate_name(what, name).map_err(Error::Usage)
}

fn check_rule(rule: &Rule) -> Result<()> {
    rule.validate().map_err(Error::Usage)
}

#[cfg(test)]
mod tests {
    use super::GnipConnection;
    use crate::config::Config;
    use crate::error::{ErrorKind, TransportError};
    use crate::resource::{Activities, Filter, Publisher, Rule, RuleType, Rules};
    use crate::transport::{HttpExchange, HttpRequest, HttpResponse};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct CountingExchange {
        calls: AtomicUsize,
    }

    impl HttpExchange for CountingExchange {
        fn exchange(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(HttpResponse::new(200, "<result>Success</result>"))
        }
    }

    fn connection() -> (GnipConnection<Arc<CountingExchange>>, Arc<CountingExchange>) {
        let exchange = Arc::new(CountingExchange::default());
        let config = Config::new("user", "secret").expect("config");
        (GnipConnection::with_exchange(config, exchange.clone()), exchange)
    }

    #[test]
    fn usage_errors_are_raised_before_any_request() {
        let (connection, exchange) = connection();

        let failures = [
            connection.get_publisher("").map(|_| ()),
            connection.create_filter("", &Filter::new("f")).map(|_| ()),
            connection.create_filter("p", &Filter::new("")).map(|_| ()),
            connection.get_filter("p", "bad/name").map(|_| ()),
            connection
                .add_rule("p", "f", &Rule::new(RuleType::Actor, ""))
                .map(|_| ()),
            connection.add_rules("p", "f", &Rules::default()).map(|_| ()),
            connection.update_publisher(&Publisher::new("")).map(|_| ()),
            connection.get_publisher_activities("", None).map(|_| ()),
        ];

        for failure in failures {
            assert_eq!(failure.expect_err("should be rejected").kind(), ErrorKind::Usage);
        }
        assert_eq!(exchange.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn empty_publish_is_a_noop() {
        let (connection, exchange) = connection();

        let outcome = connection
            .publish("localPublisher", &Activities::default())
            .expect("empty publish should succeed");

        assert!(outcome.is_none());
        assert_eq!(exchange.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn mutating_call_returns_acknowledgement() {
        let (connection, exchange) = connection();

        let ack = connection
            .delete_filter("localPublisher", "existingFilter")
            .expect("delete should succeed");

        assert!(ack.is_success());
        assert_eq!(exchange.calls.load(Ordering::SeqCst), 1);
    }
}
