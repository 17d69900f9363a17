/// Fallback download coordination.
///
/// Ties the decision modules together: classify the target date, generate
/// the candidate list for the optimal product class, probe candidates in
/// order, and fetch + decompress the first hit. When a whole class comes
/// up empty the coordinator degrades along UltraRapid → Rapid → Final and
/// retries; an auth rejection aborts everything immediately, since the
/// credential problem is not class-specific.
///
/// Configuration and the archive client are passed in explicitly - there
/// is no ambient state, and every invocation is an independent, stateless
/// computation over (target date, now).

use chrono::{DateTime, NaiveDate, Utc};
use std::fs;
use std::path::PathBuf;

use crate::availability;
use crate::candidates;
use crate::config::Config;
use crate::decompress::{self, Decompressed};
use crate::ingest::ArchiveClient;
use crate::logging::{self, LogSource};
use crate::model::{Download, FetchError, ProbeStatus};
use crate::products::ProductClass;

pub struct Coordinator<'a, A: ArchiveClient> {
    config: &'a Config,
    archive: &'a A,
}

impl<'a, A: ArchiveClient> Coordinator<'a, A> {
    pub fn new(config: &'a Config, archive: &'a A) -> Coordinator<'a, A> {
        Coordinator { config, archive }
    }

    /// Smart download: pick the optimal product class for the date, then
    /// walk the degrade chain until something is delivered.
    pub fn smart_download_at(
        &self,
        target: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Download, FetchError> {
        let Some(optimal) = availability::classify_at(target, now) else {
            return Err(FetchError::NoProductAvailable {
                hours_elapsed: availability::hours_elapsed_at(target, now),
            });
        };

        let mut product = optimal;
        loop {
            logging::info(
                LogSource::System,
                None,
                &format!("trying {} products for {}", product, target),
            );

            match self.download_product_at(target, product, now) {
                Ok(mut download) => {
                    download.fallback_used = product != optimal;
                    return Ok(download);
                }
                Err(FetchError::NotFoundForClass(_)) => match product.fallback() {
                    Some(next) => {
                        logging::warn(
                            LogSource::System,
                            None,
                            &format!("no {} product found, falling back to {}", product, next),
                        );
                        product = next;
                    }
                    None => return Err(FetchError::NotFoundForClass(product)),
                },
                // Auth rejections and local I/O failures are not
                // class-specific; retrying a lower-latency class cannot help.
                Err(other) => return Err(other),
            }
        }
    }

    /// Convenience wrapper that uses the real current time.
    pub fn smart_download(&self, target: NaiveDate) -> Result<Download, FetchError> {
        self.smart_download_at(target, Utc::now())
    }

    /// Probe one product class's candidate list in order and deliver the
    /// first hit. Probe order is the only preference - no scoring.
    pub fn download_product_at(
        &self,
        target: NaiveDate,
        product: ProductClass,
        now: DateTime<Utc>,
    ) -> Result<Download, FetchError> {
        let set = candidates::generate_at(target, product, now);
        let directory = set.directory_url(&self.config.archive_base);

        logging::info(
            LogSource::Cddis,
            None,
            &format!(
                "probing {} {} candidates in {} ({} era, GPS week {})",
                set.filenames.len(),
                product,
                directory,
                set.era,
                set.gps_week
            ),
        );

        for filename in &set.filenames {
            let url = format!("{}{}", directory, filename);

            match self.archive.probe(&url) {
                ProbeStatus::Found => {
                    logging::info(LogSource::Cddis, Some(filename), "candidate resolved");
                    match self.deliver(&url, filename, product)? {
                        Some(download) => return Ok(download),
                        // A resolved candidate that fails to fetch is the
                        // archive misbehaving; skip it like any other soft
                        // failure and keep sweeping.
                        None => continue,
                    }
                }
                ProbeStatus::Absent => continue,
                ProbeStatus::AuthRejected => {
                    logging::error(
                        LogSource::Cddis,
                        Some(filename),
                        "authentication rejected, aborting candidate sweep",
                    );
                    return Err(FetchError::AuthRequired);
                }
                ProbeStatus::Transient(reason) => {
                    logging::log_probe_failure(filename, product, &reason);
                    continue;
                }
            }
        }

        Err(FetchError::NotFoundForClass(product))
    }

    /// Fetch a resolved candidate into the output directory and decompress.
    ///
    /// `Ok(None)` means the fetch itself failed: a soft, candidate-specific
    /// condition the sweep should skip past. Only local filesystem trouble
    /// (the output directory cannot be created) is a hard `Io` error.
    fn deliver(
        &self,
        url: &str,
        filename: &str,
        product: ProductClass,
    ) -> Result<Option<Download>, FetchError> {
        fs::create_dir_all(&self.config.output_directory).map_err(|e| {
            FetchError::Io(format!(
                "cannot create {}: {}",
                self.config.output_directory.display(),
                e
            ))
        })?;

        let dest: PathBuf = self.config.output_directory.join(filename);
        if let Err(reason) = self.archive.fetch(url, &dest) {
            logging::log_probe_failure(filename, product, &reason);
            return Ok(None);
        }

        let (path, still_compressed) = match decompress::decompress_auto(&dest, self.config.auto_cleanup)
        {
            Decompressed::Plain(p) => (p, false),
            Decompressed::Kept(p) => (p, true),
        };

        Ok(Some(Download {
            path,
            filename: filename.to_string(),
            product,
            fallback_used: false,
            still_compressed,
        }))
    }
}
