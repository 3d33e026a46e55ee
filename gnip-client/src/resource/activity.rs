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

use super::{validate_optional_text, validate_text, Resource, ResourceKind};
use crate::codec::{self, CodecError};
use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One event reported by a publisher.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub at: DateTime<Utc>,
    pub action: String,
    #[serde(rename = "activityID", default, skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,
    #[serde(rename = "URL", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "source", default)]
    pub sources: Vec<String>,
    #[serde(rename = "keyword", default)]
    pub keywords: Vec<String>,
    #[serde(rename = "place", default)]
    pub places: Vec<Place>,
    #[serde(rename = "actor", default)]
    pub actors: Vec<Actor>,
    #[serde(rename = "destinationURL", default)]
    pub destination_urls: Vec<GnipUrl>,
    #[serde(rename = "tag", default)]
    pub tags: Vec<GnipValue>,
    #[serde(rename = "to", default)]
    pub to: Vec<GnipValue>,
    #[serde(rename = "regardingURL", default)]
    pub regarding_urls: Vec<GnipUrl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
}

impl Activity {
    pub fn new(at: DateTime<Utc>, action: impl Into<String>) -> Self {
        Self {
            at,
            action: action.into(),
            activity_id: None,
            url: None,
            sources: Vec::new(),
            keywords: Vec::new(),
            places: Vec::new(),
            actors: Vec::new(),
            destination_urls: Vec::new(),
            tags: Vec::new(),
            to: Vec::new(),
            regarding_urls: Vec::new(),
            payload: None,
        }
    }

    pub fn with_activity_id(mut self, id: impl Into<String>) -> Self {
        self.activity_id = Some(id.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_actor(mut self, actor: Actor) -> Self {
        self.actors.push(actor);
        self
    }

    pub fn with_tag(mut self, tag: GnipValue) -> Self {
        self.tags.push(tag);
        self
    }

    pub fn with_to(mut self, to: GnipValue) -> Self {
        self.to.push(to);
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.sources.push(source.into());
        self
    }

    pub fn with_place(mut self, place: Place) -> Self {
        self.places.push(place);
        self
    }

    pub fn with_destination_url(mut self, url: GnipUrl) -> Self {
        self.destination_urls.push(url);
        self
    }

    pub fn with_regarding_url(mut self, url: GnipUrl) -> Self {
        self.regarding_urls.push(url);
        self
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }
}

impl Resource for Activity {
    const KIND: ResourceKind = ResourceKind::Activity;

    fn validate(&self) -> Result<(), String> {
        if self.action.trim().is_empty() {
            return Err("activity action must not be empty".to_string());
        }
        validate_text("action", &self.action)?;
        validate_optional_text("activityID", self.activity_id.as_deref())?;
        validate_optional_text("URL", self.url.as_deref())?;
        let texts = self
            .sources
            .iter()
            .map(|source| ("source", source.as_str()))
            .chain(self.keywords.iter().map(|keyword| ("keyword", keyword.as_str())))
            .chain(self.actors.iter().map(|actor| ("actor", actor.value.as_str())))
            .chain(self.tags.iter().map(|tag| ("tag", tag.value.as_str())))
            .chain(self.to.iter().map(|to| ("to", to.value.as_str())))
            .chain(
                self.destination_urls
                    .iter()
                    .map(|url| ("destinationURL", url.url.as_str())),
            )
            .chain(
                self.regarding_urls
                    .iter()
                    .map(|url| ("regardingURL", url.url.as_str())),
            );
        for (what, text) in texts {
            validate_text(what, text)?;
        }
        self.places.iter().try_for_each(Place::validate)?;
        match &self.payload {
            Some(payload) => payload.validate(),
            None => Ok(()),
        }
    }
}

/// A batch of activities, optionally tagged with the publisher that owns it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Activities {
    #[serde(rename = "@publisher", default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(rename = "activity", default)]
    pub activities: Vec<Activity>,
}

impl Activities {
    pub fn new(activities: impl IntoIterator<Item = Activity>) -> Self {
        Self {
            publisher: None,
            activities: activities.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Activity> {
        self.activities.iter()
    }
}

impl<'a> IntoIterator for &'a Activities {
    type Item = &'a Activity;
    type IntoIter = std::slice::Iter<'a, Activity>;

    fn into_iter(self) -> Self::IntoIter {
        self.activities.iter()
    }
}

impl Resource for Activities {
    const KIND: ResourceKind = ResourceKind::Activities;

    fn validate(&self) -> Result<(), String> {
        self.activities.iter().try_for_each(Activity::validate)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    #[serde(rename = "@uid", default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(rename = "@metaURL", default, skip_serializing_if = "Option::is_none")]
    pub meta_url: Option<String>,
    #[serde(rename = "$text", default)]
    pub value: String,
}

impl Actor {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    pub fn with_meta_url(mut self, meta_url: impl Into<String>) -> Self {
        self.meta_url = Some(meta_url.into());
        self
    }
}

/// A text value with an optional metadata link.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GnipValue {
    #[serde(rename = "@metaURL", default, skip_serializing_if = "Option::is_none")]
    pub meta_url: Option<String>,
    #[serde(rename = "$text", default)]
    pub value: String,
}

impl GnipValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            meta_url: None,
            value: value.into(),
        }
    }

    pub fn with_meta_url(mut self, meta_url: impl Into<String>) -> Self {
        self.meta_url = Some(meta_url.into());
        self
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GnipUrl {
    #[serde(rename = "@metaURL", default, skip_serializing_if = "Option::is_none")]
    pub meta_url: Option<String>,
    #[serde(rename = "$text", default)]
    pub url: String,
}

impl GnipUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            meta_url: None,
            url: url.into(),
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MediaUrl {
    #[serde(rename = "@width", default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(rename = "@height", default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(rename = "@duration", default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(rename = "@mimeType", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(rename = "@type", default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(rename = "$text", default)]
    pub url: String,
}

impl MediaUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// Latitude/longitude pair, written as `"lat lon"`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

impl Point {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Serialize for Point {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{} {}", self.latitude, self.longitude))
    }
}

impl<'de> Deserialize<'de> for Point {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let mut coordinates = text.split_whitespace().map(str::parse::<f64>);
        match (coordinates.next(), coordinates.next(), coordinates.next()) {
            (Some(Ok(latitude)), Some(Ok(longitude)), None) => Ok(Point::new(latitude, longitude)),
            _ => Err(D::Error::custom(format!(
                "point `{text}` is not a `latitude longitude` pair"
            ))),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<Point>,
    #[serde(rename = "elev", default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
    #[serde(rename = "featuretypetag", default, skip_serializing_if = "Option::is_none")]
    pub feature_type_tag: Option<String>,
    #[serde(rename = "featurename", default, skip_serializing_if = "Option::is_none")]
    pub feature_name: Option<String>,
    #[serde(rename = "relationshiptag", default, skip_serializing_if = "Option::is_none")]
    pub relationship_tag: Option<String>,
}

impl Place {
    pub fn at_point(latitude: f64, longitude: f64) -> Self {
        Self {
            point: Some(Point::new(latitude, longitude)),
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), String> {
        validate_optional_text("featuretypetag", self.feature_type_tag.as_deref())?;
        validate_optional_text("featurename", self.feature_name.as_deref())?;
        validate_optional_text("relationshiptag", self.relationship_tag.as_deref())
    }
}

/// Publisher-supplied content attached to an activity.
///
/// `raw` is stored and transmitted as base64 of the gzip of the original
/// bytes; [`Payload::decoded_raw`] reverses both steps.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Payload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body: Option<String>,
    #[serde(rename = "mediaURL", default)]
    media_urls: Vec<MediaUrl>,
    raw: String,
}

impl Payload {
    /// Compresses and encodes `raw` for the wire.
    pub fn new(
        title: Option<String>,
        body: Option<String>,
        raw: impl AsRef<[u8]>,
    ) -> Result<Self, CodecError> {
        Ok(Self {
            title,
            body,
            media_urls: Vec::new(),
            raw: codec::encode_payload(raw.as_ref())?,
        })
    }

    /// Wraps an already encoded `raw` value, checking that it decodes.
    pub fn from_encoded(
        title: Option<String>,
        body: Option<String>,
        encoded_raw: impl Into<String>,
    ) -> Result<Self, CodecError> {
        let payload = Self {
            title,
            body,
            media_urls: Vec::new(),
            raw: encoded_raw.into(),
        };
        payload.decoded_raw()?;
        Ok(payload)
    }

    pub fn with_media_url(mut self, media_url: MediaUrl) -> Self {
        self.media_urls.push(media_url);
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn media_urls(&self) -> &[MediaUrl] {
        &self.media_urls
    }

    /// The base64 text exactly as carried in the document.
    pub fn encoded_raw(&self) -> &str {
        &self.raw
    }

    pub fn decoded_raw(&self) -> Result<Vec<u8>, CodecError> {
        codec::decode_payload(&self.raw)
    }

    pub fn decoded_raw_string(&self) -> Result<String, CodecError> {
        String::from_utf8(self.decoded_raw()?)
            .map_err(|err| CodecError::Payload(format!("raw payload is not UTF-8: {err}")))
    }

    fn validate(&self) -> Result<(), String> {
        validate_optional_text("payload title", self.title.as_deref())?;
        validate_optional_text("payload body", self.body.as_deref())?;
        for media_url in &self.media_urls {
            validate_text("mediaURL", &media_url.url)?;
        }
        validate_text("payload raw", &self.raw)?;
        if self.raw.trim().is_empty() {
            return Err("payload raw must not be empty".to_string());
        }
        codec::decode_base64(&self.raw)
            .map(|_| ())
            .map_err(|err| err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{Activities, Activity, Actor, Payload};
    use crate::resource::Resource;
    use chrono::{TimeZone, Utc};

    #[test]
    fn payload_raw_survives_encoding() {
        let payload = Payload::new(
            Some("title".to_string()),
            Some("body".to_string()),
            "raw value",
        )
        .expect("payload should encode");

        assert_ne!(payload.encoded_raw(), "raw value");
        assert_eq!(
            payload.decoded_raw_string().expect("payload should decode"),
            "raw value"
        );
    }

    #[test]
    fn from_encoded_rejects_non_base64() {
        assert!(Payload::from_encoded(None, None, "not*base64").is_err());
    }

    #[test]
    fn activity_requires_action() {
        let at = Utc.with_ymd_and_hms(2008, 7, 2, 11, 16, 16).single().expect("at");
        let batch = Activities::new([
            Activity::new(at, "upload").with_actor(Actor::new("joe")),
            Activity::new(at, " "),
        ]);

        assert_eq!(batch.len(), 2);
        assert!(batch.validate().is_err());
        assert!(batch.activities[0].validate().is_ok());
    }
}
