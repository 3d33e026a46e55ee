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

use crate::codec;
use crate::error::ServiceError;
use crate::observability::events;
use crate::resource::ErrorDocument;
use tracing::debug;

const COMPONENT: &str = "translator";

/// Turns a non-2xx response into a [`ServiceError`].
///
/// The message comes from the `<error>` body when one parses and is
/// non-empty; otherwise it is composed from the status and reason phrase.
pub(crate) fn translate(status: u16, reason: Option<&str>, body: &[u8]) -> ServiceError {
    let parsed = codec::from_xml::<ErrorDocument>(body)
        .map(|document| document.message.trim().to_string())
        .ok()
        .filter(|message| !message.is_empty());

    match parsed {
        Some(message) => ServiceError::new(status, message),
        None => {
            debug!(
                event = events::ERROR_BODY_UNPARSED,
                component = COMPONENT,
                status,
                bytes = body.len(),
                "error body did not carry a message"
            );
            ServiceError::new(status, fallback_message(status, reason))
        }
    }
}

fn fallback_message(status: u16, reason: Option<&str>) -> String {
    format!(
        "Error with request code: {status} message: {}",
        reason.unwrap_or("")
    )
    .trim_end()
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::translate;

    #[test]
    fn structured_error_body_supplies_message() {
        let error = translate(404, Some("Not Found"), b"<error>Not Found</error>");

        assert_eq!(error.status(), 404);
        assert_eq!(error.message(), "Not Found");
    }

    #[test]
    fn error_body_with_declaration_is_accepted() {
        let body = br#"<?xml version="1.0" encoding="UTF-8"?><error>Filter already exists</error>"#;

        assert_eq!(
            translate(409, Some("Conflict"), body).message(),
            "Filter already exists"
        );
    }

    #[test]
    fn unparsable_body_falls_back_to_status_line() {
        let error = translate(500, Some("Internal Server Error"), b"<html>oops</html>");

        assert_eq!(error.status(), 500);
        assert_eq!(
            error.message(),
            "Error with request code: 500 message: Internal Server Error"
        );
    }

    #[test]
    fn empty_error_message_falls_back() {
        let error = translate(401, None, b"<error/>");

        assert_eq!(error.message(), "Error with request code: 401 message:");
    }
}
