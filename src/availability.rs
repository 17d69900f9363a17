/// Product availability classification.
///
/// IGS products appear on the archive after fixed publication delays:
/// ultra-rapid after ~3 hours, rapid after ~1 day, final after ~12 days.
/// Given a target date and the current time, this module picks the optimal
/// (most precise available) product class, or reports that nothing can
/// exist yet.
///
/// # Clock injection
/// `classify_at` accepts `now` as a parameter rather than calling
/// `Utc::now()` internally, keeping classification purely deterministic in
/// tests. `classify` is the convenience wrapper for production callers.

use chrono::{DateTime, NaiveDate, Utc};

use crate::products::ProductClass;

/// Fractional hours elapsed between the target date (taken at 00:00 UTC)
/// and `now`. Negative when the target date is in the future.
pub fn hours_elapsed_at(target: NaiveDate, now: DateTime<Utc>) -> f64 {
    let target_midnight = target.and_hms_opt(0, 0, 0).unwrap().and_utc();
    (now - target_midnight).num_seconds() as f64 / 3600.0
}

/// Pick the optimal product class for `target` as of `now`.
///
/// Thresholds are applied in descending order, so the result is the most
/// precise class whose publication delay has passed:
///   elapsed >= 288h → Final
///   elapsed >=  24h → Rapid
///   elapsed >=   3h → UltraRapid
///   otherwise       → None (nothing published yet)
pub fn classify_at(target: NaiveDate, now: DateTime<Utc>) -> Option<ProductClass> {
    let elapsed = hours_elapsed_at(target, now);

    if elapsed >= ProductClass::Final.min_elapsed_hours() {
        Some(ProductClass::Final)
    } else if elapsed >= ProductClass::Rapid.min_elapsed_hours() {
        Some(ProductClass::Rapid)
    } else if elapsed >= ProductClass::UltraRapid.min_elapsed_hours() {
        Some(ProductClass::UltraRapid)
    } else {
        None
    }
}

/// Convenience wrapper that uses the real current time.
/// Use `classify_at` in tests to keep them deterministic.
pub fn classify(target: NaiveDate) -> Option<ProductClass> {
    classify_at(target, Utc::now())
}
