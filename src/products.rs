/// Product registry for the SP3 fetch service.
///
/// Defines the closed set of orbit product classes, filename format eras,
/// sampling intervals, and the analysis-center product-code tables used to
/// build candidate filenames. This is the single source of truth for the
/// archive's naming grammar - all other modules should reference codes from
/// here rather than hardcoding string literals.

use std::fmt;

// ---------------------------------------------------------------------------
// Product classes
// ---------------------------------------------------------------------------

/// IGS orbit product classes, trading latency for precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductClass {
    /// Reference-grade solution, published ~12 days after the fact.
    Final,
    /// Daily solution, published ~1 day after the fact.
    Rapid,
    /// Near-real-time solution, published every 6 hours with a ~3h delay.
    UltraRapid,
}

impl ProductClass {
    /// Minimum hours that must have elapsed since the target date before
    /// this product class can exist on the archive.
    pub fn min_elapsed_hours(self) -> f64 {
        match self {
            ProductClass::Final => 12.0 * 24.0,
            ProductClass::Rapid => 24.0,
            ProductClass::UltraRapid => 3.0,
        }
    }

    /// Next class to try when every candidate for this one is absent.
    /// The degrade direction is UltraRapid → Rapid → Final; Final has no
    /// fallback.
    pub fn fallback(self) -> Option<ProductClass> {
        match self {
            ProductClass::UltraRapid => Some(ProductClass::Rapid),
            ProductClass::Rapid => Some(ProductClass::Final),
            ProductClass::Final => None,
        }
    }
}

impl fmt::Display for ProductClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductClass::Final => write!(f, "final"),
            ProductClass::Rapid => write!(f, "rapid"),
            ProductClass::UltraRapid => write!(f, "ultra-rapid"),
        }
    }
}

// ---------------------------------------------------------------------------
// Format eras
// ---------------------------------------------------------------------------

/// First GPS week of the IGS20 long-filename convention (November 2022).
pub const MODERN_ERA_FIRST_WEEK: u32 = 2238;

/// Filename grammar eras. The archive switched naming conventions at GPS
/// week 2238; the era decides which grammar, centers, and intervals apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatEra {
    /// Short names, e.g. `igs22370.sp3.Z`.
    Legacy,
    /// IGS20 long names, e.g. `IGS0OPSFIN_20223130000_01D_15M_ORB.SP3.gz`.
    Modern,
}

impl FormatEra {
    /// Pure step function of the GPS week: 2237 → Legacy, 2238 → Modern.
    pub fn for_week(gps_week: u32) -> FormatEra {
        if gps_week >= MODERN_ERA_FIRST_WEEK {
            FormatEra::Modern
        } else {
            FormatEra::Legacy
        }
    }
}

impl fmt::Display for FormatEra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatEra::Legacy => write!(f, "legacy"),
            FormatEra::Modern => write!(f, "IGS20"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sampling intervals
// ---------------------------------------------------------------------------

/// Sampling-interval tags of modern-era filenames, densest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interval {
    S01,
    S30,
    M05,
    M15,
}

impl Interval {
    /// Try-order within a product class: 01S > 30S > 05M > 15M.
    pub const PRIORITY: [Interval; 4] =
        [Interval::S01, Interval::S30, Interval::M05, Interval::M15];

    /// The tag as it appears in the filename grammar.
    pub fn tag(self) -> &'static str {
        match self {
            Interval::S01 => "01S",
            Interval::S30 => "30S",
            Interval::M05 => "05M",
            Interval::M15 => "15M",
        }
    }
}

// ---------------------------------------------------------------------------
// Modern-era product codes
// ---------------------------------------------------------------------------
// Each code is the 10-character prefix of an IGS20 long filename: center,
// solution campaign, and product class in one token.

/// Final-orbit codes, combined IGS solution first.
pub static MODERN_FINAL_CODES: &[&str] =
    &["IGS0OPSFIN", "COD0MGXFIN", "GFZ0MGXFIN", "WUM0MGXFIN"];

/// Rapid-orbit codes.
pub static MODERN_RAPID_CODES: &[&str] = &[
    "IGS0OPSRAP",
    "COD0OPSRAP",
    "GFZ0OPSRAP",
    "JPL0OPSRAP",
    "IGR0OPSRAP",
];

/// Ultra-rapid codes publishing 2-day (48h) spans.
pub static MODERN_ULTRA_CODES_02D: &[&str] =
    &["IGS0OPSULT", "COD0OPSULT", "GFZ0OPSULT", "JPL0OPSULT"];

/// Ultra-rapid codes also publishing 1-day spans, and the set probed for
/// yesterday's late buckets when today has no qualifying update hour.
pub static MODERN_ULTRA_CODES_01D: &[&str] = &["IGS0OPSULT", "COD0OPSULT", "GFZ0OPSULT"];

// ---------------------------------------------------------------------------
// Legacy-era center prefixes
// ---------------------------------------------------------------------------
// Legacy names are `{center}{week:04}{dow}.sp3.Z` with a product letter
// wedged into the prefix for rapid (`r`) and ultra-rapid (`u`) solutions.
// The combined IGS solutions use their own prefixes (igs/igr/igu) and are
// appended separately by the generator.

pub static LEGACY_FINAL_CENTERS: &[&str] = &["cod", "gfz", "whu"];

pub static LEGACY_RAPID_CENTERS: &[&str] = &["cod", "gfz", "jpl"];

/// Centers publishing legacy ultra-rapid solutions at fixed 6h update hours.
pub static LEGACY_ULTRA_CENTERS: &[&str] = &["cod", "gfz"];

/// Update hours of legacy per-center ultra-rapid solutions.
pub static LEGACY_ULTRA_CENTER_HOURS: &[u32] = &[18, 12, 6, 0];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_era_is_a_step_function_of_gps_week() {
        assert_eq!(FormatEra::for_week(2237), FormatEra::Legacy);
        assert_eq!(FormatEra::for_week(2238), FormatEra::Modern);
        assert_eq!(FormatEra::for_week(0), FormatEra::Legacy);
        assert_eq!(FormatEra::for_week(3000), FormatEra::Modern);
    }

    #[test]
    fn test_fallback_chain_degrades_toward_final() {
        assert_eq!(ProductClass::UltraRapid.fallback(), Some(ProductClass::Rapid));
        assert_eq!(ProductClass::Rapid.fallback(), Some(ProductClass::Final));
        assert_eq!(ProductClass::Final.fallback(), None);
    }

    #[test]
    fn test_thresholds_are_descending_along_the_fallback_chain() {
        assert_eq!(ProductClass::Final.min_elapsed_hours(), 288.0);
        assert_eq!(ProductClass::Rapid.min_elapsed_hours(), 24.0);
        assert_eq!(ProductClass::UltraRapid.min_elapsed_hours(), 3.0);
    }

    #[test]
    fn test_interval_priority_is_densest_first() {
        let tags: Vec<&str> = Interval::PRIORITY.iter().map(|i| i.tag()).collect();
        assert_eq!(tags, vec!["01S", "30S", "05M", "15M"]);
    }

    #[test]
    fn test_combined_igs_solution_is_probed_first_in_each_class() {
        assert!(MODERN_FINAL_CODES[0].starts_with("IGS"));
        assert!(MODERN_RAPID_CODES[0].starts_with("IGS"));
        assert!(MODERN_ULTRA_CODES_02D[0].starts_with("IGS"));
    }
}
