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

use gnip_client::{Config, ConfigBuilder};
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

pub const TEST_SERVER: &str = "http://gnip.test";

/// Installs a test-writer subscriber once per test binary; `RUST_LOG` wins.
pub fn init_logging() {
    static ONCE: OnceLock<()> = OnceLock::new();
    ONCE.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

pub fn test_config_builder() -> ConfigBuilder {
    Config::builder("test@example.com", "s3cret").server(TEST_SERVER)
}

pub fn test_config() -> Config {
    test_config_builder()
        .build()
        .expect("test configuration should validate")
}
