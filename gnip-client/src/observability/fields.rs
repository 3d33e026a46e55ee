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

//! Value formatting for structured event fields.

pub const NONE: &str = "none";

const MAX_BODY_PREVIEW: usize = 512;

/// Body rendering for debug events: lossy UTF-8, cut at a char boundary.
pub fn format_body_preview(body: Option<&[u8]>) -> String {
    let Some(body) = body else {
        return NONE.to_string();
    };
    let text = String::from_utf8_lossy(body);
    if text.len() <= MAX_BODY_PREVIEW {
        return text.into_owned();
    }

    let mut cut = MAX_BODY_PREVIEW;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}... ({} bytes)", &text[..cut], body.len())
}

/// Drops any query string so rule values are not written to logs.
pub fn format_url_path(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

pub fn format_optional(value: Option<&str>) -> &str {
    value.unwrap_or(NONE)
}
