//! # Run Stamps
//!
//! Every accepted refresh is identified by the UTC second it was persisted
//! in, rendered as `YYYYMMDDTHHMMSSZ` (e.g. `20260115T123045Z`). The same
//! stamp names the blob (`analysis/{stamp}.json`) and keys the record, which
//! is what ties the two copies together.
//!
//! Two refreshes completing within the same second produce the same stamp
//! and the later write replaces the earlier one. That collision window is
//! accepted; there is no sequence suffix.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Timelike, Utc};

use crate::error::CoreError;

/// `strftime` pattern of a run stamp.
pub const STAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Prefix under which analysis blobs are stored.
pub const OBJECT_KEY_PREFIX: &str = "analysis/";

/// A UTC instant truncated to seconds, identifying one persisted refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunStamp(DateTime<Utc>);

impl RunStamp {
    /// Stamp for the current UTC second.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// Stamp for a given instant, discarding sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt.with_nanosecond(0).unwrap_or(dt))
    }

    /// Parse the `YYYYMMDDTHHMMSSZ` form back into a stamp.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        // chrono's %Y accepts signed and wider years; the stamp is fixed-width.
        if s.len() != 16 || !s.is_ascii() {
            return Err(CoreError::InvalidStamp {
                value: s.to_string(),
                reason: "expected 16 ASCII characters".to_string(),
            });
        }
        let naive = NaiveDateTime::parse_from_str(s, STAMP_FORMAT).map_err(|e| {
            CoreError::InvalidStamp {
                value: s.to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self(naive.and_utc()))
    }

    /// Parse a blob key of the form `analysis/{stamp}.json`.
    pub fn from_object_key(key: &str) -> Result<Self, CoreError> {
        let stamp = key
            .strip_prefix(OBJECT_KEY_PREFIX)
            .and_then(|rest| rest.strip_suffix(".json"))
            .ok_or_else(|| CoreError::InvalidStamp {
                value: key.to_string(),
                reason: "not an analysis object key".to_string(),
            })?;
        Self::parse(stamp)
    }

    /// Object-store key of the blob written under this stamp.
    pub fn object_key(&self) -> String {
        format!("{OBJECT_KEY_PREFIX}{self}.json")
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl fmt::Display for RunStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(STAMP_FORMAT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn renders_compact_utc_form() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 45).unwrap();
        assert_eq!(RunStamp::from_utc(dt).to_string(), "20260115T123045Z");
    }

    #[test]
    fn discards_subseconds() {
        let dt = Utc
            .with_ymd_and_hms(2026, 1, 15, 12, 30, 45)
            .unwrap()
            .with_nanosecond(999_999_999)
            .unwrap();
        let stamp = RunStamp::from_utc(dt);
        assert_eq!(stamp.as_datetime().nanosecond(), 0);
        assert_eq!(stamp.to_string(), "20260115T123045Z");
    }

    #[test]
    fn object_key_embeds_stamp() {
        let dt = Utc.with_ymd_and_hms(2026, 6, 30, 23, 59, 59).unwrap();
        assert_eq!(
            RunStamp::from_utc(dt).object_key(),
            "analysis/20260630T235959Z.json"
        );
    }

    #[test]
    fn parse_round_trips() {
        let stamp = RunStamp::now();
        assert_eq!(RunStamp::parse(&stamp.to_string()).unwrap(), stamp);
        assert_eq!(RunStamp::from_object_key(&stamp.object_key()).unwrap(), stamp);
    }

    #[test]
    fn parse_rejects_other_shapes() {
        assert!(RunStamp::parse("2026-01-15T12:30:45Z").is_err());
        assert!(RunStamp::parse("20260115T123045").is_err());
        assert!(RunStamp::parse("20261315T123045Z").is_err());
        assert!(RunStamp::from_object_key("results/20260115T123045Z.json").is_err());
        assert!(RunStamp::from_object_key("analysis/20260115T123045Z.txt").is_err());
    }
}
