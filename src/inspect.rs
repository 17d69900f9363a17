/// SP3 structural sanity check.
///
/// Not a parser - just a coarse "does this look like an orbit file" scan.
/// SP3 headers list the satellite IDs on `+` lines as fixed-width 3-char
/// tokens (constellation letter + 2-digit PRN) starting at a fixed column;
/// counting them per constellation is enough to catch truncated downloads,
/// HTML error pages saved as data, and format mismatches.
///
/// A report with `ok: false` is a signal, not a failure - the file is kept
/// either way.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::Path;

/// Header lines examined from the top of the file.
const HEADER_SCAN_LINES: usize = 200;

/// Column where the satellite ID block starts on `+` header lines.
const SAT_BLOCK_OFFSET: usize = 9;

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct InspectionReport {
    pub file: String,
    pub size_bytes: u64,
    pub satellite_count: usize,
    /// Distinct satellites per constellation letter (G, R, E, C, J, S).
    pub constellation_counts: BTreeMap<char, usize>,
    pub ok: bool,
    /// Why `ok` is false, when it is.
    pub note: Option<String>,
}

impl InspectionReport {
    fn not_ok(file: &Path, note: &str) -> InspectionReport {
        InspectionReport {
            file: file.display().to_string(),
            size_bytes: 0,
            satellite_count: 0,
            constellation_counts: BTreeMap::new(),
            ok: false,
            note: Some(note.to_string()),
        }
    }
}

/// Human-readable constellation name for a system letter.
pub fn constellation_name(letter: char) -> &'static str {
    match letter {
        'G' => "GPS",
        'R' => "GLONASS",
        'E' => "Galileo",
        'C' => "BeiDou",
        'J' => "QZSS",
        'S' => "SBAS",
        _ => "Unknown",
    }
}

// ---------------------------------------------------------------------------
// Inspection
// ---------------------------------------------------------------------------

/// Inspect a delivered file. Never panics and never raises - every failure
/// mode comes back as `ok: false` with a note.
pub fn inspect(path: &Path) -> InspectionReport {
    if !path.exists() {
        return InspectionReport::not_ok(path, "file not found");
    }

    let name = path.to_string_lossy();
    if name.ends_with(".gz") || name.ends_with(".Z") {
        return InspectionReport::not_ok(path, "file is still compressed");
    }

    let bytes = match fs::read(path) {
        Ok(b) => b,
        Err(e) => return InspectionReport::not_ok(path, &format!("cannot read file: {}", e)),
    };
    if bytes.is_empty() {
        return InspectionReport::not_ok(path, "file is empty");
    }
    let contents = String::from_utf8_lossy(&bytes);

    let mut satellites: BTreeSet<String> = BTreeSet::new();
    let mut per_constellation: BTreeMap<char, BTreeSet<String>> = BTreeMap::new();

    for line in contents.lines().take(HEADER_SCAN_LINES) {
        if !line.starts_with('+') {
            continue;
        }
        let section: Vec<char> = line
            .get(SAT_BLOCK_OFFSET..)
            .unwrap_or("")
            .trim()
            .chars()
            .collect();

        let mut pos = 0;
        while pos + 3 <= section.len() {
            let token: String = section[pos..pos + 3].iter().collect();
            let mut chars = token.chars();
            let letter = chars.next().unwrap_or(' ');
            if letter.is_ascii_alphabetic() && chars.all(|c| c.is_ascii_digit()) {
                let constellation = letter.to_ascii_uppercase();
                satellites.insert(token.clone());
                per_constellation.entry(constellation).or_default().insert(token);
            }
            pos += 3;
        }
    }

    let constellation_counts: BTreeMap<char, usize> = per_constellation
        .iter()
        .map(|(letter, sats)| (*letter, sats.len()))
        .collect();
    let satellite_count = satellites.len();

    InspectionReport {
        file: path.display().to_string(),
        size_bytes: bytes.len() as u64,
        satellite_count,
        constellation_counts,
        ok: satellite_count > 0,
        note: if satellite_count > 0 {
            None
        } else {
            Some("no satellites detected in header - file may not be SP3".to_string())
        },
    }
}

/// Write the report as pretty-printed JSON, for machine consumption.
pub fn write_report_json(report: &InspectionReport, path: &Path) -> io::Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_mixed_constellation_header_line() {
        // Satellite IDs start at column 9 of a '+' line.
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "orbit.SP3", "+   32   G01G02R01R02\n");

        let report = inspect(&path);

        assert!(report.ok);
        assert_eq!(report.satellite_count, 4);
        assert_eq!(report.constellation_counts.get(&'G'), Some(&2));
        assert_eq!(report.constellation_counts.get(&'R'), Some(&2));
    }

    #[test]
    fn test_satellites_spanning_multiple_plus_lines_are_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "orbit.SP3",
            "+   32   G01G02G03\n+        G03G04\n* not a header line G99\n",
        );

        let report = inspect(&path);

        assert_eq!(report.satellite_count, 4, "G03 appears twice, count it once");
        assert_eq!(report.constellation_counts.get(&'G'), Some(&4));
    }

    #[test]
    fn test_empty_file_is_not_ok_without_panicking() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "orbit.SP3", "");

        let report = inspect(&path);

        assert!(!report.ok);
        assert_eq!(report.satellite_count, 0);
        assert_eq!(report.note.as_deref(), Some("file is empty"));
    }

    #[test]
    fn test_missing_file_is_not_ok() {
        let report = inspect(Path::new("/nonexistent/orbit.SP3"));
        assert!(!report.ok);
        assert_eq!(report.note.as_deref(), Some("file not found"));
    }

    #[test]
    fn test_still_compressed_file_is_not_ok() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "orbit.SP3.gz", "binary-ish");

        let report = inspect(&path);

        assert!(!report.ok);
        assert_eq!(report.note.as_deref(), Some("file is still compressed"));
    }

    #[test]
    fn test_file_without_header_markers_reports_format_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "orbit.SP3", "<html>503 Service Unavailable</html>\n");

        let report = inspect(&path);

        assert!(!report.ok);
        assert!(report.note.unwrap().contains("no satellites"));
    }

    #[test]
    fn test_header_scan_stops_after_200_lines() {
        let dir = tempfile::tempdir().unwrap();
        let mut contents = "comment\n".repeat(HEADER_SCAN_LINES);
        contents.push_str("+   32   G01G02\n");
        let path = write_file(dir.path(), "orbit.SP3", &contents);

        let report = inspect(&path);

        assert_eq!(report.satellite_count, 0, "line 201 must not be scanned");
    }

    #[test]
    fn test_report_serializes_to_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "orbit.SP3", "+   32   G01R01\n");
        let report = inspect(&path);

        let out = dir.path().join("report.json");
        write_report_json(&report, &out).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["satellite_count"], 2);
        assert_eq!(json["constellation_counts"]["G"], 1);
        assert_eq!(json["ok"], true);
    }

    #[test]
    fn test_constellation_names() {
        assert_eq!(constellation_name('G'), "GPS");
        assert_eq!(constellation_name('R'), "GLONASS");
        assert_eq!(constellation_name('X'), "Unknown");
    }
}
