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

use super::{validate_name, Resource, ResourceKind, RuleType};
use serde::{Deserialize, Serialize};

/// A named source of activities.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Publisher {
    #[serde(rename = "@name")]
    pub name: String,
    #[serde(
        rename = "supportedRuleTypes",
        default,
        skip_serializing_if = "SupportedRuleTypes::is_empty"
    )]
    supported_rule_types: SupportedRuleTypes,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
struct SupportedRuleTypes {
    #[serde(rename = "type", default)]
    types: Vec<RuleType>,
}

impl SupportedRuleTypes {
    fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Publisher {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            supported_rule_types: SupportedRuleTypes::default(),
        }
    }

    pub fn with_rule_types(mut self, types: impl IntoIterator<Item = RuleType>) -> Self {
        self.supported_rule_types.types = types.into_iter().collect();
        self
    }

    pub fn supported_rule_types(&self) -> &[RuleType] {
        &self.supported_rule_types.types
    }

    pub fn supports(&self, rule_type: RuleType) -> bool {
        self.supported_rule_types.types.contains(&rule_type)
    }
}

impl Resource for Publisher {
    const KIND: ResourceKind = ResourceKind::Publisher;

    fn validate(&self) -> Result<(), String> {
        validate_name("publisher", &self.name)
    }
}

/// Listing returned by `GET /publishers.xml`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Publishers {
    #[serde(rename = "publisher", default)]
    pub publishers: Vec<Publisher>,
}

impl Publishers {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.publishers.iter().map(|publisher| publisher.name.as_str())
    }

    pub fn find(&self, name: &str) -> Option<&Publisher> {
        self.publishers.iter().find(|publisher| publisher.name == name)
    }
}

impl Resource for Publishers {
    const KIND: ResourceKind = ResourceKind::Publishers;

    fn validate(&self) -> Result<(), String> {
        self.publishers.iter().try_for_each(Publisher::validate)
    }
}
