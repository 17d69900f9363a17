/// Remote archive access.
///
/// The coordinator only needs two capabilities from the outside world:
/// "does this URL exist" and "fetch this URL to disk". `ArchiveClient`
/// captures exactly that seam so the fallback logic can be driven by a
/// mock in tests; `cddis::CddisClient` is the production implementation.

use std::path::Path;

use crate::model::ProbeStatus;

pub mod cddis;

/// Existence-probe and fetch capability against a remote archive.
pub trait ArchiveClient {
    /// HEAD-equivalent existence check with a short per-probe timeout.
    /// Never fails hard - every outcome is a `ProbeStatus` so the caller's
    /// continue-or-abort decision is an explicit match.
    fn probe(&self, url: &str) -> ProbeStatus;

    /// Streaming GET of the body to `dest`. Implementations must write
    /// atomically (write-then-rename) so a concurrent unrelated run never
    /// observes a partial file.
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), String>;
}
