/// Artifact decompression.
///
/// Archive files arrive gzip-compressed (`.gz`, modern era) or
/// Unix-compress'd (`.Z`, legacy era). Gzip is handled in-process with
/// flate2; `.Z` needs the external `uncompress` tool. When decompression
/// is impossible the compressed artifact is kept and reported as a
/// degraded success - the caller still has a usable file, just not a
/// plain-text one.

use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::logging::{self, LogSource};

/// Result of a decompression attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decompressed {
    /// Plain file at this path; any compressed intermediate is gone when
    /// auto-cleanup is on.
    Plain(PathBuf),
    /// Decompression unavailable or failed; the compressed artifact was
    /// kept at this path.
    Kept(PathBuf),
}

/// Decompress by extension: `.gz` in-process, `.Z` via `uncompress`,
/// anything else passed through untouched.
pub fn decompress_auto(path: &Path, auto_cleanup: bool) -> Decompressed {
    match path.extension().and_then(|e| e.to_str()) {
        Some("gz") => decompress_gzip(path, auto_cleanup),
        Some("Z") => decompress_unix_z(path),
        _ => Decompressed::Plain(path.to_path_buf()),
    }
}

/// Inflate a `.gz` file next to itself, stripping the suffix.
pub fn decompress_gzip(path: &Path, auto_cleanup: bool) -> Decompressed {
    let out = path.with_extension("");

    match inflate_to(path, &out) {
        Ok(size) => {
            logging::info(
                LogSource::Decompress,
                None,
                &format!("decompressed {} ({} bytes)", out.display(), size),
            );
            if auto_cleanup {
                if let Err(e) = fs::remove_file(path) {
                    logging::warn(
                        LogSource::Decompress,
                        None,
                        &format!("cannot remove {}: {}", path.display(), e),
                    );
                }
            }
            Decompressed::Plain(out)
        }
        Err(e) => {
            logging::warn(
                LogSource::Decompress,
                None,
                &format!("gzip decompression failed ({}), keeping {}", e, path.display()),
            );
            // Don't leave a truncated output lying around.
            let _ = fs::remove_file(&out);
            Decompressed::Kept(path.to_path_buf())
        }
    }
}

fn inflate_to(src: &Path, dst: &Path) -> io::Result<u64> {
    let mut decoder = GzDecoder::new(File::open(src)?);
    let mut out = File::create(dst)?;
    io::copy(&mut decoder, &mut out)
}

/// Decompress a `.Z` file with the external `uncompress` tool, which
/// replaces the file in place (so there is no separate cleanup step).
pub fn decompress_unix_z(path: &Path) -> Decompressed {
    let out = path.with_extension("");

    match Command::new("uncompress").arg(path).status() {
        Ok(status) if status.success() && out.exists() => {
            logging::info(
                LogSource::Decompress,
                None,
                &format!("decompressed {}", out.display()),
            );
            Decompressed::Plain(out)
        }
        _ => {
            logging::warn(
                LogSource::Decompress,
                None,
                &format!("uncompress unavailable or failed, keeping {}", path.display()),
            );
            Decompressed::Kept(path.to_path_buf())
        }
    }
}
