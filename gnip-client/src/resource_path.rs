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

//! URL layout of the service's resource hierarchy.

use crate::resource::Rule;
use std::fmt;
use url::form_urlencoded;

const PUBLISHERS: &str = "publishers";
const FILTERS: &str = "filters";
const RULES: &str = "rules";
const ACTIVITY: &str = "activity";
const XML_SUFFIX: &str = ".xml";

/// Which stream flavour a poll reads.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum StreamKind {
    Activity,
    Notification,
}

impl StreamKind {
    pub fn for_full_data(full_data: bool) -> Self {
        if full_data {
            StreamKind::Activity
        } else {
            StreamKind::Notification
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StreamKind::Activity => "activity",
            StreamKind::Notification => "notification",
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed pointer at one node of the hierarchy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ResourcePath<'a> {
    Publishers,
    Publisher(&'a str),
    Filters {
        publisher: &'a str,
    },
    Filter {
        publisher: &'a str,
        filter: &'a str,
    },
    Rules {
        publisher: &'a str,
        filter: &'a str,
    },
    Publish {
        publisher: &'a str,
    },
    Stream {
        publisher: &'a str,
        filter: Option<&'a str>,
        kind: StreamKind,
    },
}

impl<'a> ResourcePath<'a> {
    fn segments(&self) -> Vec<&'a str> {
        match *self {
            ResourcePath::Publishers => vec![PUBLISHERS],
            ResourcePath::Publisher(publisher) => vec![PUBLISHERS, publisher],
            ResourcePath::Filters { publisher } => vec![PUBLISHERS, publisher, FILTERS],
            ResourcePath::Filter { publisher, filter } => {
                vec![PUBLISHERS, publisher, FILTERS, filter]
            }
            ResourcePath::Rules { publisher, filter } => {
                vec![PUBLISHERS, publisher, FILTERS, filter, RULES]
            }
            ResourcePath::Publish { publisher } => vec![PUBLISHERS, publisher, ACTIVITY],
            ResourcePath::Stream {
                publisher,
                filter,
                kind,
            } => {
                let mut segments = vec![PUBLISHERS, publisher];
                if let Some(filter) = filter {
                    segments.extend([FILTERS, filter]);
                }
                segments.push(kind.as_str());
                segments
            }
        }
    }

    /// Collection or action URL, no suffix.
    pub(crate) fn url(&self, server: &str) -> String {
        format!("{server}/{}", self.segments().join("/"))
    }

    /// Single-document URL ending in `.xml`.
    pub(crate) fn document_url(&self, server: &str) -> String {
        format!("{}{XML_SUFFIX}", self.url(server))
    }

    /// Bucket URL of a stream, `{stream}/{token}.xml`.
    pub(crate) fn bucket_url(&self, server: &str, token: &str) -> String {
        format!("{}/{token}{XML_SUFFIX}", self.url(server))
    }
}

/// `type=..&value=..` query pairs identifying a rule.
pub(crate) fn rule_query(rule: &Rule) -> [(&'static str, &str); 2] {
    [("type", rule.rule_type.as_str()), ("value", rule.value.as_str())]
}

/// Appends form-encoded `pairs` to `url`.
pub(crate) fn with_query(url: &str, pairs: &[(&str, &str)]) -> String {
    if pairs.is_empty() {
        return url.to_string();
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter())
        .finish();
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{query}")
}
