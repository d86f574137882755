//! Scoring rules: which value a mode records and how records compare.

use tracing::instrument;

use super::types::Mode;

/// Returns true if `current` beats `stored` under the mode's rule.
///
/// Lower is better for basic (elapsed seconds) and limited (attempts used);
/// higher is better for timed (seconds remaining). Ties are not improvements.
/// No stored value is always beaten.
#[instrument]
pub fn is_improvement(mode: Mode, current: u32, stored: Option<u32>) -> bool {
    match stored {
        None => true,
        Some(stored) => match mode {
            Mode::Basic | Mode::Limited => current < stored,
            Mode::Timed => current > stored,
        },
    }
}

/// Formats seconds as `MM:SS`.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Formats a stored record value the way the mode measures it.
pub fn format_record(mode: Mode, value: u32) -> String {
    match mode {
        Mode::Basic => format_clock(u64::from(value)),
        Mode::Limited => format!("{} attempts", value),
        Mode::Timed => format!("{} s left", value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_record_always_improved() {
        for mode in [Mode::Basic, Mode::Limited, Mode::Timed] {
            assert!(is_improvement(mode, 0, None));
            assert!(is_improvement(mode, 999, None));
        }
    }

    #[test]
    fn test_basic_lower_is_better() {
        assert!(is_improvement(Mode::Basic, 25, Some(30)));
        assert!(!is_improvement(Mode::Basic, 35, Some(30)));
        assert!(!is_improvement(Mode::Basic, 30, Some(30)));
    }

    #[test]
    fn test_limited_lower_is_better() {
        assert!(is_improvement(Mode::Limited, 10, Some(12)));
        assert!(!is_improvement(Mode::Limited, 12, Some(12)));
    }

    #[test]
    fn test_timed_higher_is_better() {
        assert!(is_improvement(Mode::Timed, 40, Some(20)));
        assert!(!is_improvement(Mode::Timed, 20, Some(20)));
        assert!(!is_improvement(Mode::Timed, 5, Some(20)));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(3600), "60:00");
    }

    #[test]
    fn test_format_record_per_mode() {
        assert_eq!(format_record(Mode::Basic, 42), "00:42");
        assert_eq!(format_record(Mode::Limited, 18), "18 attempts");
        assert_eq!(format_record(Mode::Timed, 25), "25 s left");
    }
}
