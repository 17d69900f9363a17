/// SP3 orbit product fetch service.
///
/// Locates IGS precise-orbit files on the NASA CDDIS archive, picking the
/// product class (final / rapid / ultra-rapid) from how much time has
/// elapsed since the target date, probing an ordered list of candidate
/// filenames across format eras and analysis centers, and degrading to a
/// lower-latency class when a whole list comes up empty. Delivered files
/// are decompressed and given a coarse structural sanity check.
///
/// Module map, leaf-first:
/// - `model` - shared domain types, no logic
/// - `products` - product/era/interval enums and the code tables
/// - `gpstime` - calendar date ↔ GPS week/day math
/// - `availability` - elapsed-time product classification
/// - `candidates` - ordered candidate filename generation
/// - `ingest` - the archive client trait and the CDDIS implementation
/// - `decompress` - gzip / Unix-compress handling
/// - `coordinator` - probe sweep and fallback orchestration
/// - `inspect` - SP3 header sanity check
/// - `config`, `logging` - service plumbing

pub mod availability;
pub mod candidates;
pub mod config;
pub mod coordinator;
pub mod decompress;
pub mod gpstime;
pub mod ingest;
pub mod inspect;
pub mod logging;
pub mod model;
pub mod products;
