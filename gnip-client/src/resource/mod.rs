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

//! Typed documents exchanged with the service.
//!
//! Each document maps onto one root XML element. Attribute fields are
//! renamed with an `@` prefix and character data with `$text`, which is how
//! `quick-xml`'s serde layer tells them apart from child elements.

mod activity;
mod filter;
mod publisher;
mod result;

pub use activity::{Activities, Activity, Actor, GnipUrl, GnipValue, MediaUrl, Payload, Place, Point};
pub use filter::{Filter, Rule, RuleType, Rules};
pub use publisher::{Publisher, Publishers};
pub use result::{Acknowledgement, ErrorDocument};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

/// Which document a value serializes to.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ResourceKind {
    Publisher,
    Publishers,
    Filter,
    Rule,
    Rules,
    Activity,
    Activities,
    Acknowledgement,
    Error,
}

impl ResourceKind {
    /// Root element name on the wire.
    pub fn root(&self) -> &'static str {
        match self {
            ResourceKind::Publisher => "publisher",
            ResourceKind::Publishers => "publishers",
            ResourceKind::Filter => "filter",
            ResourceKind::Rule => "rule",
            ResourceKind::Rules => "rules",
            ResourceKind::Activity => "activity",
            ResourceKind::Activities => "activities",
            ResourceKind::Acknowledgement => "result",
            ResourceKind::Error => "error",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.root())
    }
}

/// A value the codec can move to and from XML.
pub trait Resource: Serialize + DeserializeOwned {
    const KIND: ResourceKind;

    /// Schema checks serde cannot express. Runs before encode and after decode.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Names end up as raw path segments, so they must not split or terminate one.
pub(crate) fn validate_name(what: &str, name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err(format!("{what} name must not be empty"));
    }
    if let Some(bad) = name
        .chars()
        .find(|c| matches!(c, '/' | '?' | '#' | ';' | '%') || c.is_whitespace() || c.is_control())
    {
        return Err(format!("{what} name `{name}` contains reserved character {bad:?}"));
    }
    Ok(())
}

fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Element text is trimmed on decode, so edge whitespace cannot survive the wire.
pub(crate) fn validate_text(what: &str, text: &str) -> Result<(), String> {
    if text.starts_with(is_xml_whitespace) || text.ends_with(is_xml_whitespace) {
        return Err(format!("{what} `{text}` must not start or end with whitespace"));
    }
    Ok(())
}

/// An optional element must carry text when present.
pub(crate) fn validate_optional_text(what: &str, text: Option<&str>) -> Result<(), String> {
    match text {
        Some("") => Err(format!("{what} must not be empty when present")),
        Some(text) => validate_text(what, text),
        None => Ok(()),
    }
}
