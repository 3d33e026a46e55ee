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

//! XML document codec with optional gzip framing.
//!
//! [`encode`] validates a [`Resource`], serializes it under its root element
//! and optionally compresses the result. [`decode`] inflates when told the
//! bytes are gzip, verifies the root element, deserializes, and validates.
//! Payload `raw` values use the same gzip step followed by base64.

use crate::observability::events;
use crate::resource::Resource;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{self, Read, Write};
use thiserror::Error;
use tracing::debug;

const COMPONENT: &str = "codec";

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
pub const GZIP: &str = "gzip";

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed <{root}> document: {reason}")]
    MalformedDocument { root: &'static str, reason: String },
    #[error("gzip stream failure: {0}")]
    Compression(#[source] io::Error),
    #[error("invalid payload encoding: {0}")]
    Payload(String),
}

impl CodecError {
    fn malformed(root: &'static str, reason: impl Into<String>) -> Self {
        CodecError::MalformedDocument {
            root,
            reason: reason.into(),
        }
    }
}

/// Content coding of a byte stream.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum ContentEncoding {
    #[default]
    Identity,
    Gzip,
}

impl ContentEncoding {
    /// Reads a `Content-Encoding` header value; anything but gzip is identity.
    pub fn from_header(value: Option<&str>) -> Self {
        match value {
            Some(value) if value.trim().eq_ignore_ascii_case(GZIP) => ContentEncoding::Gzip,
            _ => ContentEncoding::Identity,
        }
    }

    pub fn from_flag(use_gzip: bool) -> Self {
        if use_gzip {
            ContentEncoding::Gzip
        } else {
            ContentEncoding::Identity
        }
    }

    pub fn header_value(&self) -> Option<&'static str> {
        match self {
            ContentEncoding::Identity => None,
            ContentEncoding::Gzip => Some(GZIP),
        }
    }
}

/// Encoded request body plus the coding already applied to it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WirePayload {
    bytes: Vec<u8>,
    encoding: ContentEncoding,
}

impl WirePayload {
    pub fn new(bytes: Vec<u8>, encoding: ContentEncoding) -> Self {
        Self { bytes, encoding }
    }

    pub fn identity(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(bytes.into(), ContentEncoding::Identity)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn encoding(&self) -> ContentEncoding {
        self.encoding
    }

    pub fn is_compressed(&self) -> bool {
        self.encoding == ContentEncoding::Gzip
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Serializes `resource` to a UTF-8 document with an XML declaration.
pub fn to_xml<R: Resource>(resource: &R) -> Result<String, CodecError> {
    let root = R::KIND.root();
    resource
        .validate()
        .map_err(|reason| CodecError::malformed(root, reason))?;

    let body = quick_xml::se::to_string_with_root(root, resource)
        .map_err(|err| CodecError::malformed(root, err.to_string()))?;

    Ok(format!("{XML_DECLARATION}{body}"))
}

pub fn encode<R: Resource>(
    resource: &R,
    encoding: ContentEncoding,
) -> Result<WirePayload, CodecError> {
    let xml = to_xml(resource)?;
    let bytes = match encoding {
        ContentEncoding::Identity => xml.into_bytes(),
        ContentEncoding::Gzip => gzip(xml.as_bytes())?,
    };

    debug!(
        event = events::CODEC_ENCODE,
        component = COMPONENT,
        root = R::KIND.root(),
        bytes = bytes.len(),
        gzip = encoding == ContentEncoding::Gzip,
        "encoded document"
    );

    Ok(WirePayload::new(bytes, encoding))
}

/// Parses a document whose root element must match `R`.
pub fn from_xml<R: Resource>(bytes: &[u8]) -> Result<R, CodecError> {
    let root = R::KIND.root();
    let text = std::str::from_utf8(bytes)
        .map_err(|err| CodecError::malformed(root, format!("document is not UTF-8: {err}")))?;

    let found = root_element(text).map_err(|reason| CodecError::malformed(root, reason))?;
    if found != root {
        return Err(CodecError::malformed(
            root,
            format!("unexpected root element <{found}>"),
        ));
    }

    let resource: R =
        quick_xml::de::from_str(text).map_err(|err| CodecError::malformed(root, err.to_string()))?;
    resource
        .validate()
        .map_err(|reason| CodecError::malformed(root, reason))?;

    Ok(resource)
}

pub fn decode<R: Resource>(bytes: &[u8], encoding: ContentEncoding) -> Result<R, CodecError> {
    let resource = match encoding {
        ContentEncoding::Identity => from_xml(bytes),
        ContentEncoding::Gzip => from_xml(&gunzip(bytes)?),
    };

    if let Err(err) = resource.as_ref() {
        debug!(
            event = events::CODEC_DECODE_FAILED,
            component = COMPONENT,
            root = R::KIND.root(),
            err = %err,
            "unable to decode document"
        );
    }

    resource
}

fn root_element(text: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(text);
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) | Ok(Event::Empty(start)) => {
                return Ok(String::from_utf8_lossy(start.name().as_ref()).into_owned())
            }
            Ok(Event::Eof) => return Err("document has no root element".to_string()),
            Ok(_) => {}
            Err(err) => return Err(err.to_string()),
        }
    }
}

pub fn gzip(bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(bytes)
        .map_err(CodecError::Compression)?;
    encoder.finish().map_err(CodecError::Compression)
}

pub fn gunzip(bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
    let mut inflated = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut inflated)
        .map_err(CodecError::Compression)?;
    Ok(inflated)
}

/// base64 of the gzip of `raw`.
pub fn encode_payload(raw: &[u8]) -> Result<String, CodecError> {
    Ok(STANDARD.encode(gzip(raw)?))
}

pub fn decode_payload(encoded: &str) -> Result<Vec<u8>, CodecError> {
    let compressed = decode_base64(encoded)?;
    gunzip(&compressed).map_err(|err| CodecError::Payload(err.to_string()))
}

pub(crate) fn decode_base64(encoded: &str) -> Result<Vec<u8>, CodecError> {
    // Line-wrapped base64 is legal inside the document text.
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    STANDARD
        .decode(compact)
        .map_err(|err| CodecError::Payload(err.to_string()))
}
