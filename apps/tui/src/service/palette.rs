/// Severity tones shared by circles, hotspots and risk badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Danger,
    Warning,
    Safe,
    Accent,
}

impl Tone {
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Danger => "#E74C3C",
            Self::Warning => "#F39C12",
            Self::Safe => "#2ECC71",
            Self::Accent => "#00B4D8",
        }
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Danger => (0xE7, 0x4C, 0x3C),
            Self::Warning => (0xF3, 0x9C, 0x12),
            Self::Safe => (0x2E, 0xCC, 0x71),
            Self::Accent => (0x00, 0xB4, 0xD8),
        }
    }
}

pub const MIN_CIRCLE_RADIUS: f64 = 500.0;

/// Circle radius in meters; never below [`MIN_CIRCLE_RADIUS`].
pub fn circle_radius(intensity: f64) -> f64 {
    MIN_CIRCLE_RADIUS.max(intensity * 100.0)
}

pub fn circle_color(intensity: f64) -> Tone {
    if intensity >= 10.0 {
        Tone::Danger
    } else if intensity >= 5.0 {
        Tone::Warning
    } else {
        Tone::Safe
    }
}

pub fn risk_color(level: &str) -> Tone {
    match level {
        "high" => Tone::Danger,
        "medium" => Tone::Warning,
        "low" => Tone::Safe,
        _ => Tone::Accent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_has_a_visible_minimum() {
        assert!((circle_radius(2.0) - 500.0).abs() < f64::EPSILON);
        assert!((circle_radius(0.0) - 500.0).abs() < f64::EPSILON);
        assert!((circle_radius(8.0) - 800.0).abs() < f64::EPSILON);
        assert!((circle_radius(12.0) - 1200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn color_bands_follow_thresholds() {
        assert_eq!(circle_color(10.0), Tone::Danger);
        assert_eq!(circle_color(42.0), Tone::Danger);
        assert_eq!(circle_color(9.99), Tone::Warning);
        assert_eq!(circle_color(5.0), Tone::Warning);
        assert_eq!(circle_color(4.99), Tone::Safe);
        assert_eq!(circle_color(0.0), Tone::Safe);
        assert_eq!(circle_color(12.0).hex(), "#E74C3C");
    }

    #[test]
    fn risk_colors_fall_back_to_accent() {
        assert_eq!(risk_color("high").hex(), "#E74C3C");
        assert_eq!(risk_color("medium").hex(), "#F39C12");
        assert_eq!(risk_color("low").hex(), "#2ECC71");
        assert_eq!(risk_color("unknown").hex(), "#00B4D8");
    }
}
