use crate::picker::DEFAULT_YEAR_SPAN;
use crate::width::WidthConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Breakpoint constants for the calendar width hints.
    pub widths: WidthConfig,
    /// Maximum back-history depth; unbounded when absent.
    pub history_limit: Option<usize>,
    /// Years offered by the month picker on either side of the current year.
    pub picker_year_span: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            widths: WidthConfig::default(),
            history_limit: None,
            picker_year_span: DEFAULT_YEAR_SPAN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_fills_defaults() {
        let settings: Settings = serde_yaml::from_str("history_limit: 25\n").unwrap();
        assert_eq!(settings.history_limit, Some(25));
        assert_eq!(settings.picker_year_span, 10);
        assert_eq!(settings.widths, WidthConfig::default());
    }

    #[test]
    fn breakpoint_override() {
        let yaml = "widths:\n  mobile:\n    base: 300\n    unit: 40\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.widths.mobile.base, 300);
        assert_eq!(settings.widths.mobile.unit, 40);
        assert_eq!(settings.widths.tablet, WidthConfig::default().tablet);
    }

    #[test]
    fn round_trips_through_yaml() {
        let settings = Settings {
            history_limit: Some(8),
            picker_year_span: 3,
            ..Settings::default()
        };
        let text = serde_yaml::to_string(&settings).unwrap();
        let back: Settings = serde_yaml::from_str(&text).unwrap();
        assert_eq!(back, settings);
    }
}
