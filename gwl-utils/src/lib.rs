//! Shared utility functions for GWL crates.

/// Date utility functions
pub mod dates {
    use anyhow::{anyhow, bail};
    use chrono::NaiveDate;

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a station date in "YYYY-M-D" format.
    ///
    /// Month and day may be one or two digits, the year must be four. The
    /// fields must form a real calendar date: "2023-2-30" is rejected rather
    /// than rolled over into March.
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        let parts: Vec<&str> = s.split('-').collect();
        let [year, month, day] = parts.as_slice() else {
            bail!("expected YYYY-M-D, got {:?}", s);
        };
        let field = |text: &str, min: usize, max: usize| -> anyhow::Result<u32> {
            if text.len() < min || text.len() > max || !text.bytes().all(|b| b.is_ascii_digit()) {
                bail!("malformed date field {:?} in {:?}", text, s);
            }
            Ok(text.parse::<u32>()?)
        };
        let year = field(*year, 4, 4)? as i32;
        let month = field(*month, 1, 2)?;
        let day = field(*day, 1, 2)?;
        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| anyhow!("{:?} is not a calendar date", s))
    }

    /// Whole days elapsed from `origin` to `date`.
    ///
    /// Dates carry no time zone, so daylight-saving shifts never produce
    /// fractional days.
    pub fn days_between(date: &NaiveDate, origin: &NaiveDate) -> i64 {
        (*date - *origin).num_days()
    }

}

/// Numeric field parsing
pub mod numbers {
    /// Parse a decimal field into a finite f64.
    ///
    /// Surrounding whitespace is ignored. "NaN", "inf" and overflowing
    /// literals are rejected.
    pub fn parse_finite(s: &str) -> Option<f64> {
        s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    #[cfg(test)]
    mod tests {
        use super::parse_finite;

        #[test]
        fn test_parse_finite() {
            assert_eq!(parse_finite("12.5"), Some(12.5));
            assert_eq!(parse_finite(" -3.25 "), Some(-3.25));
            assert_eq!(parse_finite("7"), Some(7.0));
        }

        #[test]
        fn test_parse_finite_rejects() {
            assert_eq!(parse_finite(""), None);
            assert_eq!(parse_finite("abc"), None);
            assert_eq!(parse_finite("NaN"), None);
            assert_eq!(parse_finite("inf"), None);
            assert_eq!(parse_finite("-infinity"), None);
            assert_eq!(parse_finite("1e400"), None);
        }
    }
}
