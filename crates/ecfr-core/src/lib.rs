//! # ecfr-core — Domain Types for the eCFR Analyzer
//!
//! Leaf crate of the workspace. Holds the data that flows between the
//! paginated fetcher, the request router, and the two persistence targets.
//!
//! ## Contents
//!
//! - [`AnalysisBundle`]: the per-request result, one variant per action.
//! - [`compute_custom_metric`]: the derived `combined_total` figure.
//! - [`normalize`]: converts a JSON tree into a [`RecordValue`] tree where
//!   every float has become an exact decimal, for stores that reject floats.
//! - [`RunStamp`]: the `YYYYMMDDTHHMMSSZ` identifier shared by the blob
//!   and the record written for one request.
//! - [`AnalysisRecord`]: the structured record written to the record store.
//!
//! ## Crate Policy
//!
//! - No I/O. Everything here is pure and synchronous.
//! - No `.unwrap()` outside tests.

pub mod action;
pub mod bundle;
pub mod error;
pub mod metric;
pub mod normalize;
pub mod record;
pub mod stamp;

pub use action::Action;
pub use bundle::AnalysisBundle;
pub use error::CoreError;
pub use metric::{compute_custom_metric, CustomMetric, ItemCount};
pub use normalize::{normalize, RecordValue};
pub use record::AnalysisRecord;
pub use stamp::RunStamp;
