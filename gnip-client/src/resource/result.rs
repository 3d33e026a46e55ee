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

use super::{validate_text, Resource, ResourceKind};
use serde::{Deserialize, Serialize};

pub const SUCCESS_MESSAGE: &str = "Success";

/// The `<result>` document returned by mutating requests.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(rename = "$text", default)]
    pub message: String,
}

impl Acknowledgement {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.message.trim() == SUCCESS_MESSAGE
    }
}

impl Resource for Acknowledgement {
    const KIND: ResourceKind = ResourceKind::Acknowledgement;

    fn validate(&self) -> Result<(), String> {
        validate_text("result", &self.message)
    }
}

/// The `<error>` document carried by non-2xx responses.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ErrorDocument {
    #[serde(rename = "$text", default)]
    pub message: String,
}

impl Resource for ErrorDocument {
    const KIND: ResourceKind = ResourceKind::Error;

    fn validate(&self) -> Result<(), String> {
        validate_text("error", &self.message)
    }
}
