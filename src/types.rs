// src/types.rs

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Priority level a task is filed under.
///
/// - `Low`: nice to have.
/// - `Medium`: default for new tasks.
/// - `High`: should be picked up first when nothing else is urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Priority {
    /// Seed activation for the spreading-activation engine.
    pub fn base_activation(self) -> f64 {
        match self {
            Priority::High => 1.0,
            Priority::Medium => 0.6,
            Priority::Low => 0.3,
        }
    }

    /// Weight used by the heuristic fallback scorer.
    pub fn heuristic_weight(self) -> f64 {
        match self {
            Priority::High => 30.0,
            Priority::Medium => 20.0,
            Priority::Low => 10.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!(
                "invalid priority: {other} (expected \"low\", \"medium\" or \"high\")"
            )),
        }
    }
}

/// Bucket an activation value falls into on the analytics chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayColor {
    /// Activation above 0.8.
    Red,
    /// Activation above 0.5.
    Orange,
    /// Activation above 0.3.
    Blue,
    Green,
}

impl DisplayColor {
    pub fn for_activation(value: f64) -> Self {
        if value > 0.8 {
            DisplayColor::Red
        } else if value > 0.5 {
            DisplayColor::Orange
        } else if value > 0.3 {
            DisplayColor::Blue
        } else {
            DisplayColor::Green
        }
    }

    pub fn hex(self) -> &'static str {
        match self {
            DisplayColor::Red => "#ef4444",
            DisplayColor::Orange => "#f97316",
            DisplayColor::Blue => "#3b82f6",
            DisplayColor::Green => "#22c55e",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert_eq!(" low ".parse::<Priority>(), Ok(Priority::Low));
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn display_color_thresholds_are_exclusive() {
        assert_eq!(DisplayColor::for_activation(0.81), DisplayColor::Red);
        assert_eq!(DisplayColor::for_activation(0.8), DisplayColor::Orange);
        assert_eq!(DisplayColor::for_activation(0.5), DisplayColor::Blue);
        assert_eq!(DisplayColor::for_activation(0.3), DisplayColor::Green);
    }
}
