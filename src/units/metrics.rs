//! Density-independent unit conversion.

use serde::{Deserialize, Serialize};

/// Display densities needed for pixel conversions.
///
/// `density` scales density-independent pixels (dp) and `scaled_density`
/// scales scale-independent pixels (sp), which also include the user's font
/// size preference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayMetrics {
    pub density: f32,
    pub scaled_density: f32,
}

impl Default for DisplayMetrics {
    /// A baseline 160 dpi screen at normal font size.
    fn default() -> Self {
        Self {
            density: 1.0,
            scaled_density: 1.0,
        }
    }
}

/// Rounds half up and truncates toward zero, matching integer pixel math.
fn round_px(value: f32) -> i32 {
    (value + 0.5) as i32
}

impl DisplayMetrics {
    /// Creates metrics from the two densities.
    #[must_use]
    pub fn new(density: f32, scaled_density: f32) -> Self {
        Self {
            density,
            scaled_density,
        }
    }

    /// Physical pixels to density-independent pixels.
    #[must_use]
    pub fn px_to_dp(&self, px: f32) -> i32 {
        round_px(px / self.density)
    }

    /// Density-independent pixels to physical pixels.
    #[must_use]
    pub fn dp_to_px(&self, dp: f32) -> i32 {
        round_px(dp * self.density)
    }

    /// Physical pixels to scale-independent pixels.
    #[must_use]
    pub fn px_to_sp(&self, px: f32) -> i32 {
        round_px(px / self.scaled_density)
    }

    /// Scale-independent pixels to physical pixels.
    #[must_use]
    pub fn sp_to_px(&self, sp: f32) -> i32 {
        round_px(sp * self.scaled_density)
    }

    /// Scale-independent pixels to density-independent pixels at the current font scale.
    #[must_use]
    pub fn sp_to_dp(&self, sp: f32) -> i32 {
        round_px(sp / self.font_scale())
    }

    /// Density-independent pixels to scale-independent pixels at the current font scale.
    #[must_use]
    pub fn dp_to_sp(&self, dp: f32) -> i32 {
        round_px(dp * self.font_scale())
    }

    /// Ratio of sp to dp.
    fn font_scale(&self) -> f32 {
        self.scaled_density / self.density
    }
}

#[cfg(test)]
mod tests {
    use crate::units::metrics::DisplayMetrics;

    #[test]
    fn test_dp_conversions_round_half_up() {
        let xhdpi = DisplayMetrics::new(2.0, 2.0);
        assert_eq!(xhdpi.dp_to_px(16.0), 32);
        assert_eq!(xhdpi.px_to_dp(33.0), 17);
        assert_eq!(xhdpi.px_to_dp(32.9), 16);

        let hdpi = DisplayMetrics::new(1.5, 1.5);
        assert_eq!(hdpi.dp_to_px(1.0), 2);
        assert_eq!(hdpi.px_to_dp(10.0), 7);
    }

    #[test]
    fn test_sp_conversions_use_scaled_density() {
        let large_font = DisplayMetrics::new(2.0, 2.6);
        assert_eq!(large_font.sp_to_px(10.0), 26);
        assert_eq!(large_font.px_to_sp(26.0), 10);
        assert_eq!(large_font.dp_to_sp(10.0), 13);
        assert_eq!(large_font.sp_to_dp(13.0), 10);
    }

    #[test]
    fn test_default_is_identity() {
        let metrics = DisplayMetrics::default();
        assert_eq!(metrics.dp_to_px(12.0), 12);
        assert_eq!(metrics.sp_to_dp(12.0), 12);
    }
}
