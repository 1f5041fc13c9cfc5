//! Usage-percentage classification for allowance and cut-area pairs.
//!
//! Two independent threshold scales are in play: alert classes switch at
//! 90/100 percent, progress-bar colors at 50/99. They look similar but must
//! not be merged.

use serde::{Deserialize, Serialize};

/// `used / allowed * 100`, or 0 when nothing is allowed.
pub fn usage_percentage(used: f64, allowed: Option<f64>) -> f64 {
    match allowed {
        Some(allowed) if allowed != 0.0 => used / allowed * 100.0,
        _ => 0.0,
    }
}

/// Alert classification for a usage percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Danger,
    Warning,
    Normal,
}

impl AlertLevel {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            AlertLevel::Danger
        } else if percentage >= 90.0 {
            AlertLevel::Warning
        } else {
            AlertLevel::Normal
        }
    }

    /// CSS class used by the dashboard; normal renders as no class at all.
    pub fn class(&self) -> &'static str {
        match self {
            AlertLevel::Danger => "danger",
            AlertLevel::Warning => "warning",
            AlertLevel::Normal => "",
        }
    }
}

/// Progress-bar color for a usage percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarColor {
    Green,
    YellowGreen,
    Red,
}

impl BarColor {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 99.0 {
            BarColor::Red
        } else if percentage >= 50.0 {
            BarColor::YellowGreen
        } else {
            BarColor::Green
        }
    }

    pub fn css(&self) -> &'static str {
        match self {
            BarColor::Green => "green",
            BarColor::YellowGreen => "yellowgreen",
            BarColor::Red => "red",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn percentage_is_zero_without_an_allowance() {
        assert_eq!(usage_percentage(10.0, None), 0.0);
        assert_eq!(usage_percentage(10.0, Some(0.0)), 0.0);
        assert_eq!(usage_percentage(45.0, Some(50.0)), 90.0);
    }

    #[test_case(89.9, "" ; "just below warning")]
    #[test_case(90.0, "warning" ; "warning threshold")]
    #[test_case(95.0, "warning" ; "mid warning band")]
    #[test_case(99.9, "warning" ; "just below danger")]
    #[test_case(100.0, "danger" ; "danger threshold")]
    #[test_case(130.0, "danger" ; "over allowance")]
    fn alert_classes(percentage: f64, expected: &str) {
        assert_eq!(AlertLevel::from_percentage(percentage).class(), expected);
    }

    #[test_case(0.0, "green" ; "empty bar")]
    #[test_case(49.9, "green" ; "just below half")]
    #[test_case(50.0, "yellowgreen" ; "half threshold")]
    #[test_case(98.9, "yellowgreen" ; "just below red")]
    #[test_case(99.0, "red" ; "red threshold")]
    #[test_case(120.0, "red" ; "over full")]
    fn bar_colors(percentage: f64, expected: &str) {
        assert_eq!(BarColor::from_percentage(percentage).css(), expected);
    }

    #[test]
    fn alert_and_color_scales_stay_independent() {
        // 95%: already a warning, but the bar is still yellow-green
        assert_eq!(AlertLevel::from_percentage(95.0), AlertLevel::Warning);
        assert_eq!(BarColor::from_percentage(95.0), BarColor::YellowGreen);
        // 99.5%: red bar, but not yet a danger alert
        assert_eq!(BarColor::from_percentage(99.5), BarColor::Red);
        assert_eq!(AlertLevel::from_percentage(99.5), AlertLevel::Warning);
    }
}
