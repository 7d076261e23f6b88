use serde::{Deserialize, Serialize};
use std::fmt;

/// Width formula for one presentation breakpoint:
/// `max(base, base + weeks * unit)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub base: u32,
    pub unit: i32,
}

impl Breakpoint {
    pub const fn new(base: u32, unit: i32) -> Self {
        Breakpoint { base, unit }
    }

    pub fn width(&self, week_count: usize) -> u32 {
        let base = i64::from(self.base);
        let weeks = i64::try_from(week_count).unwrap_or(i64::MAX);
        let grown = weeks
            .saturating_mul(i64::from(self.unit))
            .saturating_add(base);
        u32::try_from(grown.max(base)).unwrap_or(u32::MAX)
    }
}

/// Fluid clamp settings: preferred width as a share of the viewport, never
/// wider than `max_px`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FluidConfig {
    pub viewport_percent: u32,
    pub max_px: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidthConfig {
    pub mobile: Breakpoint,
    pub tablet: Breakpoint,
    pub desktop: Breakpoint,
    pub large_desktop: Breakpoint,
    pub fluid: FluidConfig,
}

impl Default for WidthConfig {
    fn default() -> Self {
        WidthConfig {
            mobile: Breakpoint::new(280, 50),
            tablet: Breakpoint::new(500, 80),
            desktop: Breakpoint::new(700, 100),
            large_desktop: Breakpoint::new(900, 120),
            fluid: FluidConfig {
                viewport_percent: 90,
                max_px: 600,
            },
        }
    }
}

impl WidthConfig {
    pub fn hints(&self, week_count: usize) -> WidthHints {
        let mobile = self.mobile.width(week_count);
        WidthHints {
            mobile,
            tablet: self.tablet.width(week_count),
            desktop: self.desktop.width(week_count),
            large_desktop: self.large_desktop.width(week_count),
            fluid: FluidWidth {
                min_px: mobile.min(self.fluid.max_px),
                viewport_percent: self.fluid.viewport_percent,
                max_px: self.fluid.max_px,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WidthHints {
    pub mobile: u32,
    pub tablet: u32,
    pub desktop: u32,
    pub large_desktop: u32,
    pub fluid: FluidWidth,
}

/// `clamp(min_px, viewport_percent vw, max_px)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FluidWidth {
    pub min_px: u32,
    pub viewport_percent: u32,
    pub max_px: u32,
}

impl FluidWidth {
    /// Evaluates the clamp for a concrete viewport width. The result never
    /// exceeds `max_px`.
    pub fn resolve(&self, viewport_px: u32) -> u32 {
        let preferred = u64::from(viewport_px) * u64::from(self.viewport_percent) / 100;
        let preferred = u32::try_from(preferred).unwrap_or(u32::MAX);
        preferred.max(self.min_px).min(self.max_px)
    }
}

impl fmt::Display for FluidWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "clamp({}px, {}vw, {}px)",
            self.min_px, self.viewport_percent, self.max_px
        )
    }
}

/// Width hints for `week_count` columns using the default breakpoints.
pub fn width_hints(week_count: usize) -> WidthHints {
    WidthConfig::default().hints(week_count)
}
