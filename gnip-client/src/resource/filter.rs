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

use super::{validate_name, validate_optional_text, validate_text, Resource, ResourceKind};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// What part of an activity a rule value is matched against.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum RuleType {
    Actor,
    Regarding,
    Source,
    Tag,
    To,
}

impl RuleType {
    pub const ALL: [RuleType; 5] = [
        RuleType::Actor,
        RuleType::Regarding,
        RuleType::Source,
        RuleType::Tag,
        RuleType::To,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleType::Actor => "actor",
            RuleType::Regarding => "regarding",
            RuleType::Source => "source",
            RuleType::Tag => "tag",
            RuleType::To => "to",
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        RuleType::ALL
            .into_iter()
            .find(|rule_type| rule_type.as_str() == value.trim())
            .ok_or_else(|| format!("unknown rule type `{value}`"))
    }
}

// Serialized as plain text so the same impl serves attributes and elements.
impl Serialize for RuleType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RuleType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(D::Error::custom)
    }
}

/// A single `(type, value)` match criterion.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Rule {
    #[serde(rename = "@type")]
    pub rule_type: RuleType,
    #[serde(rename = "@value")]
    pub value: String,
}

impl Rule {
    pub fn new(rule_type: RuleType, value: impl Into<String>) -> Self {
        Self {
            rule_type,
            value: value.into(),
        }
    }
}

impl Resource for Rule {
    const KIND: ResourceKind = ResourceKind::Rule;

    fn validate(&self) -> Result<(), String> {
        if self.value.is_empty() {
            return Err(format!("{} rule value must not be empty", self.rule_type));
        }
        validate_text("rule value", &self.value)
    }
}

/// Batch of rules for a single add request.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    #[serde(rename = "rule", default)]
    pub rules: Vec<Rule>,
}

impl Rules {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }
}

impl FromIterator<Rule> for Rules {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self {
            rules: iter.into_iter().collect(),
        }
    }
}

impl Resource for Rules {
    const KIND: ResourceKind = ResourceKind::Rules;

    fn validate(&self) -> Result<(), String> {
        self.rules.iter().try_for_each(Rule::validate)
    }
}

fn full_data_default() -> bool {
    true
}

/// A consumer-defined view over one publisher's stream.
///
/// `full_data` selects whether polls return full activities or notifications
/// only; `post_url`, when set, asks the service to push matches there.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(rename = "@fullData", default = "full_data_default")]
    pub full_data: bool,
    #[serde(rename = "postUrl", default, skip_serializing_if = "Option::is_none")]
    pub post_url: Option<String>,
    #[serde(rename = "rule", default)]
    pub rules: Vec<Rule>,
}

impl Filter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_data: true,
            post_url: None,
            rules: Vec::new(),
        }
    }

    pub fn with_full_data(mut self, full_data: bool) -> Self {
        self.full_data = full_data;
        self
    }

    pub fn with_post_url(mut self, post_url: impl Into<String>) -> Self {
        self.post_url = Some(post_url.into());
        self
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn remove_rule(&mut self, rule: &Rule) -> bool {
        let before = self.rules.len();
        self.rules.retain(|existing| existing != rule);
        before != self.rules.len()
    }

    pub fn has_rule(&self, rule: &Rule) -> bool {
        self.rules.contains(rule)
    }
}

impl Resource for Filter {
    const KIND: ResourceKind = ResourceKind::Filter;

    fn validate(&self) -> Result<(), String> {
        validate_name("filter", &self.name)?;
        validate_optional_text("postUrl", self.post_url.as_deref())?;
        self.rules.iter().try_for_each(Rule::validate)
    }
}
