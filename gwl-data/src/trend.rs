//! Linear trend fitting and extrapolation of station water levels.
//!
//! Levels are regressed against whole days elapsed since a series' first
//! reading using ordinary least squares. Extrapolation starts from the
//! series' own last reading, never from the current date.

use gwl_core::reading::Reading;
use gwl_utils::dates::days_between;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How far past the last reading to predict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Horizon {
    Week,
    Month,
    #[default]
    Year,
    Days(i64),
}

impl Horizon {
    pub fn days(&self) -> i64 {
        match self {
            Horizon::Week => 7,
            Horizon::Month => 30,
            Horizon::Year => 365,
            Horizon::Days(days) => *days,
        }
    }

    /// Short label for display, e.g. "Week" or "90 days".
    pub fn label(&self) -> String {
        match self {
            Horizon::Week => "Week".to_string(),
            Horizon::Month => "Month".to_string(),
            Horizon::Year => "Year".to_string(),
            Horizon::Days(1) => "1 day".to_string(),
            Horizon::Days(days) => format!("{days} days"),
        }
    }
}

impl FromStr for Horizon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "week" => Ok(Horizon::Week),
            "month" => Ok(Horizon::Month),
            "year" => Ok(Horizon::Year),
            other => other
                .parse::<i64>()
                .map(Horizon::Days)
                .map_err(|_| format!("expected week, month, year or a number of days, got {s:?}")),
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A predicted level, or `Unavailable` when the series carries no trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "Option<f64>")]
pub enum Prediction {
    Level(f64),
    Unavailable,
}

impl Prediction {
    pub fn level(&self) -> Option<f64> {
        match self {
            Prediction::Level(level) => Some(*level),
            Prediction::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Prediction::Level(_))
    }
}

impl From<Prediction> for Option<f64> {
    fn from(value: Prediction) -> Self {
        value.level()
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Level(level) => write!(f, "{level:.2}"),
            Prediction::Unavailable => write!(f, "N/A"),
        }
    }
}

/// Least-squares line of level against days since the first reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendLine {
    /// Level change per day
    pub slope: f64,
    pub intercept: f64,
    /// Days from the first to the last reading
    pub last_days: i64,
}

impl TrendLine {
    /// Fit a line to a date-ordered series.
    ///
    /// Returns `None` for fewer than two readings, or when every reading
    /// falls on the same date and the slope is undefined.
    pub fn fit(series: &[Reading]) -> Option<TrendLine> {
        let (first, last) = match series {
            [first, .., last] => (first, last),
            _ => return None,
        };
        let n = series.len() as f64;
        let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
        for reading in series {
            let x = days_between(&reading.date, &first.date) as f64;
            let y = reading.level;
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_x2 += x * x;
        }
        let denominator = n * sum_x2 - sum_x * sum_x;
        if denominator == 0.0 {
            return None;
        }
        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / n;
        Some(TrendLine {
            slope,
            intercept,
            last_days: days_between(&last.date, &first.date),
        })
    }

    /// Level on the line `days` after the first reading.
    pub fn at(&self, days: f64) -> f64 {
        self.slope * days + self.intercept
    }

    /// Level `horizon_days` after the last reading.
    pub fn extrapolate(&self, horizon_days: i64) -> Prediction {
        let prediction_point = self.last_days as f64 + horizon_days as f64;
        let predicted = self.at(prediction_point);
        if predicted.is_finite() {
            Prediction::Level(predicted)
        } else {
            Prediction::Unavailable
        }
    }
}

/// Predict a station's level `horizon_days` after its last reading.
pub fn predict(series: &[Reading], horizon_days: i64) -> Prediction {
    TrendLine::fit(series)
        .map(|line| line.extrapolate(horizon_days))
        .unwrap_or(Prediction::Unavailable)
}
