/********************************************************************************
 * Copyright (c) 2025 Contributors to the Eclipse Foundation
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

use gnip_client::ConfigFile;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    pub(crate) client: ConfigFile,
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default)]
    pub(crate) log_filter: Option<String>,
    /// Echo each request line and plain body through the wire logger.
    #[serde(default)]
    pub(crate) wire_log: bool,
}

#[cfg(test)]
mod tests {
    use super::CliConfig;
    use gnip_client::Config;

    const SAMPLE: &str = include_str!("../configs/gnip.json5");

    #[test]
    fn sample_config_parses() {
        let config: CliConfig = json5::from_str(SAMPLE).expect("sample config should parse");

        assert_eq!(config.log_filter.as_deref(), Some("gnip_client=info"));
        assert!(!config.wire_log);
        let client = Config::try_from(config.client).expect("client section should validate");
        assert!(client.use_gzip());
    }

    #[test]
    fn unknown_sections_are_rejected() {
        let source = r#"{ client: { username: "u", password: "p" }, proxy: {} }"#;

        assert!(json5::from_str::<CliConfig>(source).is_err());
    }
}
