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

mod integration_test_utils;
pub use integration_test_utils::{init_logging, test_config, test_config_builder, TEST_SERVER};

mod integration_test_documents;
pub use integration_test_documents::{
    activities_document, error_document, filter_document, gzip_response, publishers_document,
    success_response, xml_response, SUCCESS_DOCUMENT,
};

mod recording_exchange;
pub use recording_exchange::RecordingExchange;

mod test_server;
pub use test_server::{CannedResponse, RecordedRequest, TestServer};
