/// Candidate filename generation.
///
/// For a target date and product class, produces the ordered list of
/// filenames to probe on the archive, plus the GPS week that keys the
/// server-side directory. Ordering is significant: it is the probe order,
/// and the first URL that resolves wins - there is no scoring beyond list
/// position.
///
/// Two grammars apply depending on the format era (GPS week 2238 cutover):
/// modern IGS20 long names carry year/day-of-year, span, and sampling
/// interval; legacy short names carry GPS week and day-of-week. Ultra-rapid
/// products additionally bucket by update hour, with a 3-hour publication
/// delay when the target date is today.
///
/// `now` is injected for the same reason as in `availability`: the
/// ultra-rapid hour windows depend on the current UTC hour, and tests need
/// them deterministic.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};

use crate::gpstime::{day_of_year, to_gps_week_day};
use crate::products::{
    FormatEra, Interval, ProductClass, LEGACY_FINAL_CENTERS, LEGACY_RAPID_CENTERS,
    LEGACY_ULTRA_CENTERS, LEGACY_ULTRA_CENTER_HOURS, MODERN_FINAL_CODES, MODERN_RAPID_CODES,
    MODERN_ULTRA_CODES_01D, MODERN_ULTRA_CODES_02D,
};

/// Publication delay applied to ultra-rapid update hours, in hours.
const ULTRA_PUBLICATION_DELAY_H: i32 = 3;

/// Modern ultra-rapid update hours, newest first.
const MODERN_ULTRA_HOUR_GRID: [i32; 4] = [18, 12, 6, 0];

/// Legacy ultra-rapid 3-hour bucket grid, newest first.
const LEGACY_ULTRA_HOUR_GRID: [i32; 8] = [21, 18, 15, 12, 9, 6, 3, 0];

// ---------------------------------------------------------------------------
// Candidate set
// ---------------------------------------------------------------------------

/// The ordered probe list for one `(date, class)` attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    /// GPS week of the target date - the archive directory key.
    pub gps_week: u32,
    /// Filename grammar era the week falls in.
    pub era: FormatEra,
    /// Candidate filenames, in probe order.
    pub filenames: Vec<String>,
}

impl CandidateSet {
    /// The single server-side directory all candidates are probed in.
    pub fn directory_url(&self, archive_base: &str) -> String {
        format!("{}/{:04}/", archive_base.trim_end_matches('/'), self.gps_week)
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate the ordered candidate list for `(date, product)` as of `now`.
pub fn generate_at(date: NaiveDate, product: ProductClass, now: DateTime<Utc>) -> CandidateSet {
    let wd = to_gps_week_day(date);
    let era = FormatEra::for_week(wd.week);

    let filenames = match era {
        FormatEra::Modern => match product {
            ProductClass::Final => modern_daily_names(date, MODERN_FINAL_CODES),
            ProductClass::Rapid => modern_daily_names(date, MODERN_RAPID_CODES),
            ProductClass::UltraRapid => modern_ultra_names(date, now),
        },
        FormatEra::Legacy => match product {
            ProductClass::Final => legacy_final_names(wd.week, wd.day_of_week),
            ProductClass::Rapid => legacy_rapid_names(wd.week, wd.day_of_week),
            ProductClass::UltraRapid => legacy_ultra_names(date, now),
        },
    };

    CandidateSet { gps_week: wd.week, era, filenames }
}

// ---------------------------------------------------------------------------
// Modern grammar (GPS week >= 2238)
// ---------------------------------------------------------------------------

fn modern_name(code: &str, year: i32, doy: u32, hhmm: &str, span: &str, interval: Interval) -> String {
    format!(
        "{}_{}{:03}{}_{}_{}_ORB.SP3.gz",
        code,
        year,
        doy,
        hhmm,
        span,
        interval.tag()
    )
}

/// Daily (final/rapid) names: interval-major, then code-table order.
fn modern_daily_names(date: NaiveDate, codes: &[&str]) -> Vec<String> {
    let year = date.year();
    let doy = day_of_year(date);

    let mut names = Vec::with_capacity(Interval::PRIORITY.len() * codes.len());
    for interval in Interval::PRIORITY {
        for code in codes {
            names.push(modern_name(code, year, doy, "0000", "01D", interval));
        }
    }
    names
}

/// Update hours of the modern ultra-rapid cycle that have cleared the
/// publication delay, newest first.
///
/// Today: hours from {18,12,06,00} at or below `now.hour() - 3`; may be
/// empty early in the day. Past dates: all four hours.
fn modern_ultra_hours(date: NaiveDate, now: DateTime<Utc>) -> Vec<u32> {
    if date == now.date_naive() {
        let current_hour = now.hour() as i32;
        MODERN_ULTRA_HOUR_GRID
            .iter()
            .filter(|&&h| h <= current_hour - ULTRA_PUBLICATION_DELAY_H)
            .map(|&h| h as u32)
            .collect()
    } else {
        MODERN_ULTRA_HOUR_GRID.iter().map(|&h| h as u32).collect()
    }
}

/// Legacy 3-hour bucket hours that have cleared the publication delay,
/// newest first. Same delay rule as `modern_ultra_hours` but against the
/// eight-bucket grid - the two grammars are genuinely different and are
/// kept as independent computations.
fn legacy_fallback_hours(date: NaiveDate, now: DateTime<Utc>) -> Vec<u32> {
    if date == now.date_naive() {
        let current_hour = now.hour() as i32;
        LEGACY_ULTRA_HOUR_GRID
            .iter()
            .filter(|&&h| h <= current_hour - ULTRA_PUBLICATION_DELAY_H)
            .map(|&h| h as u32)
            .collect()
    } else {
        LEGACY_ULTRA_HOUR_GRID.iter().map(|&h| h as u32).collect()
    }
}

fn modern_ultra_names(date: NaiveDate, now: DateTime<Utc>) -> Vec<String> {
    let year = date.year();
    let doy = day_of_year(date);
    let mut names = Vec::new();

    // Primary tier: 6-hourly update buckets.
    let available_hours = modern_ultra_hours(date, now);

    if available_hours.is_empty() && date == now.date_naive() {
        // Too early for any of today's buckets - probe yesterday's late
        // ones instead. Note the deliberate asymmetry: `available_hours`
        // stays empty, so the today-hour loop below emits nothing on such
        // days. Only this block contributes.
        let yesterday = date - Duration::days(1);
        for hour in [18u32, 12] {
            for interval in Interval::PRIORITY {
                for code in MODERN_ULTRA_CODES_01D {
                    names.push(modern_name(
                        code,
                        yesterday.year(),
                        day_of_year(yesterday),
                        &format!("{:02}00", hour),
                        "02D",
                        interval,
                    ));
                }
            }
        }
    }

    for hour in &available_hours {
        let hhmm = format!("{:02}00", hour);
        for interval in Interval::PRIORITY {
            for code in MODERN_ULTRA_CODES_02D {
                names.push(modern_name(code, year, doy, &hhmm, "02D", interval));
            }
            for code in MODERN_ULTRA_CODES_01D {
                names.push(modern_name(code, year, doy, &hhmm, "01D", interval));
            }
        }
    }

    // Secondary tier: legacy-style 3-hour buckets, always appended.
    let legacy_hours = legacy_fallback_hours(date, now);

    if legacy_hours.is_empty() && date == now.date_naive() {
        let yesterday = to_gps_week_day(date - Duration::days(1));
        for hour in [21u32, 18] {
            names.push(legacy_igu_name(yesterday.week, yesterday.day_of_week, hour));
        }
    }

    let wd = to_gps_week_day(date);
    for hour in &legacy_hours {
        names.push(legacy_igu_name(wd.week, wd.day_of_week, *hour));
    }

    names
}

// ---------------------------------------------------------------------------
// Legacy grammar (GPS week < 2238)
// ---------------------------------------------------------------------------

fn legacy_igu_name(week: u32, dow: u32, hour: u32) -> String {
    format!("igu{:04}{}_{:02}.sp3.Z", week, dow, hour)
}

fn legacy_final_names(week: u32, dow: u32) -> Vec<String> {
    let mut names: Vec<String> = LEGACY_FINAL_CENTERS
        .iter()
        .map(|center| format!("{}{:04}{}.sp3.Z", center, week, dow))
        .collect();
    names.push(format!("igs{:04}{}.sp3.Z", week, dow));
    names
}

fn legacy_rapid_names(week: u32, dow: u32) -> Vec<String> {
    let mut names: Vec<String> = LEGACY_RAPID_CENTERS
        .iter()
        .map(|center| format!("{}r{:04}{}.sp3.Z", center, week, dow))
        .collect();
    names.push(format!("igr{:04}{}.sp3.Z", week, dow));
    names
}

fn legacy_ultra_names(date: NaiveDate, now: DateTime<Utc>) -> Vec<String> {
    let wd = to_gps_week_day(date);
    let mut names = Vec::new();

    let hours = legacy_fallback_hours(date, now);
    if hours.is_empty() && date == now.date_naive() {
        let yesterday = to_gps_week_day(date - Duration::days(1));
        for hour in [21u32, 18] {
            names.push(legacy_igu_name(yesterday.week, yesterday.day_of_week, hour));
        }
    }
    for hour in &hours {
        names.push(legacy_igu_name(wd.week, wd.day_of_week, *hour));
    }

    // Per-center ultra-rapid solutions at fixed 6h update hours,
    // appended unconditionally.
    for hour in LEGACY_ULTRA_CENTER_HOURS {
        for center in LEGACY_ULTRA_CENTERS {
            names.push(format!("{}u{:04}{}_{:02}.sp3.Z", center, wd.week, wd.day_of_week, hour));
        }
    }

    names
}
