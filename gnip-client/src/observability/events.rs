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

//! Canonical structured event names used across `gnip-client`.

// Transport events.
pub const HTTP_REQUEST_START: &str = "http_request_start";
pub const HTTP_REQUEST_OK: &str = "http_request_ok";
pub const HTTP_REQUEST_FAILED: &str = "http_request_failed";
pub const HTTP_REQUEST_TUNNELED: &str = "http_request_tunneled";
pub const HTTP_RESPONSE_INFLATED: &str = "http_response_inflated";
pub const HTTP_RESPONSE_REJECTED: &str = "http_response_rejected";

// Codec events.
pub const CODEC_ENCODE: &str = "codec_encode";
pub const CODEC_DECODE_FAILED: &str = "codec_decode_failed";
pub const ERROR_BODY_UNPARSED: &str = "error_body_unparsed";

// Connection facade events.
pub const OPERATION_START: &str = "operation_start";
pub const OPERATION_OK: &str = "operation_ok";
pub const OPERATION_FAILED: &str = "operation_failed";
pub const PUBLISH_SKIP_EMPTY: &str = "publish_skip_empty";
pub const POLL_BUCKET_RESOLVED: &str = "poll_bucket_resolved";
