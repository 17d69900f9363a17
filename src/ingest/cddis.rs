/// NASA CDDIS archive client.
///
/// CDDIS serves IGS orbit products from
/// `https://cddis.nasa.gov/archive/gnss/products/{gps_week:04}/` and
/// requires NASA Earthdata authentication; this client carries the bearer
/// token on every request via default headers.
///
/// Existence probes use HEAD with a short timeout - the candidate sweep may
/// issue dozens of them. Body fetches stream to disk with a generous
/// timeout and an atomic write-then-rename.

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::ingest::ArchiveClient;
use crate::model::ProbeStatus;

/// Per-probe budget; the sweep's worst case is candidates × this.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(8);

/// Body-fetch budget; SP3 files run up to a few tens of MB.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(120);

pub struct CddisClient {
    http: reqwest::blocking::Client,
}

impl CddisClient {
    /// Build a client with the bearer token baked into every request.
    pub fn new(bearer_token: &str) -> Result<CddisClient, String> {
        let mut headers = reqwest::header::HeaderMap::new();
        let auth = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", bearer_token))
            .map_err(|e| format!("invalid bearer token: {}", e))?;
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let http = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("sp3fetch-service/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| format!("failed to create HTTP client: {}", e))?;

        Ok(CddisClient { http })
    }
}

impl ArchiveClient for CddisClient {
    fn probe(&self, url: &str) -> ProbeStatus {
        match self.http.head(url).timeout(PROBE_TIMEOUT).send() {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    ProbeStatus::Found
                } else {
                    match status.as_u16() {
                        404 => ProbeStatus::Absent,
                        401 => ProbeStatus::AuthRejected,
                        code => ProbeStatus::Transient(format!("HTTP {}", code)),
                    }
                }
            }
            Err(e) => ProbeStatus::Transient(format!("request failed: {}", e)),
        }
    }

    fn fetch(&self, url: &str, dest: &Path) -> Result<(), String> {
        let mut response = self
            .http
            .get(url)
            .timeout(FETCH_TIMEOUT)
            .send()
            .map_err(|e| format!("request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("HTTP {}", response.status()));
        }

        let filename = dest
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| format!("destination has no filename: {}", dest.display()))?;
        let part = dest.with_file_name(format!("{}.part", filename));

        let mut file = fs::File::create(&part)
            .map_err(|e| format!("cannot create {}: {}", part.display(), e))?;
        response
            .copy_to(&mut file)
            .map_err(|e| format!("download failed: {}", e))?;

        // Rename only once the body is fully on disk.
        fs::rename(&part, dest)
            .map_err(|e| format!("cannot finalize {}: {}", dest.display(), e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_with_ordinary_token() {
        assert!(CddisClient::new("eyJ0eXAiOiJKV1QifQ.payload.sig").is_ok());
    }

    #[test]
    fn test_client_rejects_token_with_control_characters() {
        assert!(CddisClient::new("bad\ntoken").is_err());
    }
}
