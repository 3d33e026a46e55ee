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

//! Minute-aligned bucket tokens for activity polling.
//!
//! The service files activities into one-minute buckets. A poll names either
//! the live `current` bucket or a historical one by its UTC start minute,
//! rendered as `yyyyMMddHHmm`.

use chrono::{DateTime, Utc};
use std::fmt;

pub const BUCKET_WINDOW_MILLIS: i64 = 60_000;
pub const CURRENT_BUCKET: &str = "current";

const BUCKET_TOKEN_FORMAT: &str = "%Y%m%d%H%M";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Bucket {
    Current,
    At(DateTime<Utc>),
}

impl Bucket {
    pub fn from_instant(instant: Option<DateTime<Utc>>) -> Self {
        instant.map_or(Bucket::Current, Bucket::At)
    }

    /// Path token for this bucket after applying `correction_millis`.
    pub fn token(&self, correction_millis: i64) -> String {
        match self {
            Bucket::Current => CURRENT_BUCKET.to_string(),
            Bucket::At(instant) => bucket_token(*instant, correction_millis),
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token(0))
    }
}

/// Start of the window containing `instant_millis + correction_millis`.
///
/// The sum saturates. The partial window just above `i64::MIN` has no start
/// in range, so it maps to the first whole window instead.
pub fn floor_to_bucket(instant_millis: i64, correction_millis: i64) -> i64 {
    let corrected = instant_millis.saturating_add(correction_millis);
    let offset = corrected.rem_euclid(BUCKET_WINDOW_MILLIS);
    corrected
        .checked_sub(offset)
        .unwrap_or(corrected + (BUCKET_WINDOW_MILLIS - offset))
}

pub fn bucket_token(instant: DateTime<Utc>, correction_millis: i64) -> String {
    let floored = floor_to_bucket(instant.timestamp_millis(), correction_millis);
    // Minute formatting already truncates, so an unrepresentable floor can
    // fall back to the uncorrected instant.
    DateTime::<Utc>::from_timestamp_millis(floored)
        .unwrap_or(instant)
        .format(BUCKET_TOKEN_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{bucket_token, floor_to_bucket, Bucket, BUCKET_WINDOW_MILLIS, CURRENT_BUCKET};
    use chrono::{DateTime, TimeZone, Utc};
    use proptest::prelude::*;

    fn at(secs: i64, millis: u32) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, millis * 1_000_000)
            .single()
            .expect("test instant should be representable")
    }

    #[test]
    fn token_is_utc_start_minute() {
        let instant = Utc
            .with_ymd_and_hms(2008, 7, 2, 11, 16, 16)
            .single()
            .expect("instant");

        assert_eq!(bucket_token(instant, 0), "200807021116");
    }

    #[test]
    fn correction_can_push_into_next_minute() {
        let instant = Utc
            .with_ymd_and_hms(2008, 7, 2, 11, 16, 50)
            .single()
            .expect("instant");

        assert_eq!(bucket_token(instant, 15_000), "200807021117");
        assert_eq!(bucket_token(instant, -60_000), "200807021115");
    }

    #[test]
    fn floor_rounds_toward_negative_infinity() {
        assert_eq!(floor_to_bucket(-1, 0), -BUCKET_WINDOW_MILLIS);
        assert_eq!(floor_to_bucket(59_999, 0), 0);
        assert_eq!(floor_to_bucket(60_000, 0), 60_000);
    }

    #[test]
    fn extreme_corrections_stay_in_range() {
        for (instant, correction) in [(0, i64::MIN), (i64::MIN, -1), (0, i64::MAX), (i64::MAX, 1)] {
            let floored = floor_to_bucket(instant, correction);

            assert_eq!(floored % BUCKET_WINDOW_MILLIS, 0);
            let corrected = instant.saturating_add(correction);
            assert!(floored.abs_diff(corrected) < BUCKET_WINDOW_MILLIS as u64);
        }

        let instant = Utc
            .with_ymd_and_hms(2008, 7, 2, 11, 16, 16)
            .single()
            .expect("instant");
        assert_eq!(bucket_token(instant, i64::MIN), "200807021116");
        assert_eq!(bucket_token(instant, i64::MAX), "200807021116");
    }

    #[test]
    fn current_bucket_ignores_correction() {
        assert_eq!(Bucket::Current.token(90_000), CURRENT_BUCKET);
        assert_eq!(Bucket::from_instant(None), Bucket::Current);
    }

    proptest! {
        #[test]
        fn instants_in_one_window_share_a_token(
            window in 0i64..4_000_000,
            first in 0i64..BUCKET_WINDOW_MILLIS,
            second in 0i64..BUCKET_WINDOW_MILLIS,
        ) {
            let start = window * BUCKET_WINDOW_MILLIS;
            let a = at((start + first) / 1000, ((start + first) % 1000) as u32);
            let b = at((start + second) / 1000, ((start + second) % 1000) as u32);

            prop_assert_eq!(bucket_token(a, 0), bucket_token(b, 0));
        }

        #[test]
        fn floor_is_idempotent_and_aligned(
            instant in -10_000_000_000_000i64..10_000_000_000_000,
            correction in -86_400_000i64..86_400_000,
        ) {
            let floored = floor_to_bucket(instant, correction);

            prop_assert_eq!(floored % BUCKET_WINDOW_MILLIS, 0);
            prop_assert!(floored <= instant + correction);
            prop_assert!(instant + correction - floored < BUCKET_WINDOW_MILLIS);
            prop_assert_eq!(floor_to_bucket(floored, 0), floored);
        }

        #[test]
        fn token_has_twelve_digits(millis in 0i64..253_402_300_799_000) {
            let instant = at(millis / 1000, (millis % 1000) as u32);
            let token = bucket_token(instant, 0);

            prop_assert_eq!(token.len(), 12);
            prop_assert!(token.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
