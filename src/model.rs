/// Core data types for the SP3 fetch service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic, no I/O, and no external dependencies - only types.

use std::path::PathBuf;

use crate::products::ProductClass;

// ---------------------------------------------------------------------------
// GPS time types
// ---------------------------------------------------------------------------

/// A calendar date resolved against the GPS epoch (1980-01-06, a Sunday).
///
/// Invariant: `week * 7 + day_of_week == days_since_epoch`, with
/// `day_of_week` in `0..=6` (0 = Sunday). Produced by
/// `gpstime::to_gps_week_day`; the GPS week doubles as the archive's
/// directory key (`{archive_base}/{week:04}/`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpsWeekDay {
    pub week: u32,
    pub day_of_week: u32,
}

// ---------------------------------------------------------------------------
// Probe types
// ---------------------------------------------------------------------------

/// Outcome of a single remote existence probe.
///
/// Modeled as a tagged result rather than an error so the coordinator's
/// continue-or-abort decision is an explicit match:
///   Found        → fetch and stop probing
///   Absent       → try the next candidate
///   AuthRejected → abort the whole sweep (credential problem is not
///                  candidate-specific)
///   Transient    → log and try the next candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    Found,
    Absent,
    AuthRejected,
    Transient(String),
}

// ---------------------------------------------------------------------------
// Download result
// ---------------------------------------------------------------------------

/// A successfully delivered orbit file.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    /// Local path of the delivered file (decompressed when possible).
    pub path: PathBuf,
    /// Remote filename the archive resolved.
    pub filename: String,
    /// Product class actually delivered.
    pub product: ProductClass,
    /// True when the delivered class is lower-latency than the optimal one
    /// (the degrade chain fired at least once).
    pub fallback_used: bool,
    /// True when decompression was unavailable and the compressed artifact
    /// was kept - a degraded success, not a failure.
    pub still_compressed: bool,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when locating or fetching an SP3 product.
///
/// Only `NoProductAvailable` and `AuthRequired` are terminal by nature;
/// `NotFoundForClass` triggers the degrade chain and is terminal only when
/// no lower-latency class remains (it then names the last class attempted).
#[derive(Debug, PartialEq)]
pub enum FetchError {
    /// The target date is below the 3-hour ultra-rapid floor.
    NoProductAvailable { hours_elapsed: f64 },
    /// Every candidate for this class (and any fallback classes) was absent.
    NotFoundForClass(ProductClass),
    /// The archive rejected the bearer token (HTTP 401).
    AuthRequired,
    /// Local filesystem failure while delivering a resolved candidate.
    /// Transport failures during fetch are soft: logged and skipped by the
    /// candidate sweep, never surfaced here.
    Io(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::NoProductAvailable { hours_elapsed } => {
                write!(
                    f,
                    "no product available yet: only {:.1}h elapsed (3h minimum)",
                    hours_elapsed
                )
            }
            FetchError::NotFoundForClass(product) => {
                write!(f, "no {} file found on the archive", product)
            }
            FetchError::AuthRequired => {
                write!(f, "archive rejected the bearer token (HTTP 401)")
            }
            FetchError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}
