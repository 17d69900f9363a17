/// GPS time conversions.
///
/// Calendar dates map to (GPS week, day-of-week) pairs relative to the GPS
/// epoch, 1980-01-06 00:00 UTC - a Sunday, so day-of-week 0 is Sunday by
/// construction. The GPS week is the archive's directory key; the
/// day-of-week and day-of-year feed the filename grammars.
///
/// All functions are pure date math with no clock access.

use chrono::{Datelike, NaiveDate};

use crate::model::GpsWeekDay;

/// The GPS epoch: 1980-01-06, 00:00 UTC.
pub fn gps_epoch() -> NaiveDate {
    // Statically valid, so the unwrap cannot fire.
    NaiveDate::from_ymd_opt(1980, 1, 6).unwrap()
}

/// Convert a calendar date to its GPS week and day-of-week.
///
/// Caller contract: `date` must not precede the GPS epoch. Dates before
/// 1980-01-06 have no GPS week number and are a caller error.
pub fn to_gps_week_day(date: NaiveDate) -> GpsWeekDay {
    let days = (date - gps_epoch()).num_days();
    debug_assert!(days >= 0, "date precedes the GPS epoch");

    GpsWeekDay {
        week: (days / 7) as u32,
        day_of_week: (days % 7) as u32,
    }
}

/// Day of year, 1..=366.
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_epoch_is_week_zero_day_zero() {
        let wd = to_gps_week_day(ymd(1980, 1, 6));
        assert_eq!(wd, GpsWeekDay { week: 0, day_of_week: 0 });
    }

    #[test]
    fn test_saturday_after_epoch_is_day_six() {
        let wd = to_gps_week_day(ymd(1980, 1, 12));
        assert_eq!(wd, GpsWeekDay { week: 0, day_of_week: 6 });
    }

    #[test]
    fn test_second_sunday_rolls_the_week() {
        let wd = to_gps_week_day(ymd(1980, 1, 13));
        assert_eq!(wd, GpsWeekDay { week: 1, day_of_week: 0 });
    }

    #[test]
    fn test_modern_era_boundary_week() {
        // 2022-11-27 is the first Sunday of GPS week 2238, the IGS20 cutover.
        let wd = to_gps_week_day(ymd(2022, 11, 27));
        assert_eq!(wd, GpsWeekDay { week: 2238, day_of_week: 0 });
        let before = to_gps_week_day(ymd(2022, 11, 26));
        assert_eq!(before, GpsWeekDay { week: 2237, day_of_week: 6 });
    }

    #[test]
    fn test_week_day_invariant_holds_across_a_span_of_dates() {
        // week*7 + day_of_week must equal whole days since the epoch,
        // with day_of_week always in 0..=6.
        let mut date = ymd(1980, 1, 6);
        let end = ymd(2030, 1, 6);
        while date <= end {
            let days = (date - gps_epoch()).num_days() as u32;
            let wd = to_gps_week_day(date);
            assert_eq!(wd.week * 7 + wd.day_of_week, days, "invariant broken at {}", date);
            assert!(wd.day_of_week <= 6);
            date += chrono::Duration::days(97); // coarse stride, crosses leap years
        }
    }

    #[test]
    fn test_day_of_year() {
        assert_eq!(day_of_year(ymd(2025, 1, 1)), 1);
        assert_eq!(day_of_year(ymd(2025, 12, 31)), 365);
        // Leap year
        assert_eq!(day_of_year(ymd(2024, 3, 1)), 61);
        assert_eq!(day_of_year(ymd(2024, 12, 31)), 366);
    }
}
