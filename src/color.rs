use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Sequential colour scale: indicator value → Color32
// ---------------------------------------------------------------------------

/// Maps numeric indicator values onto a blue ramp, light for the bottom of
/// the domain and saturated/dark for the top. Values outside the domain are
/// clamped; missing values get a neutral grey.
#[derive(Debug, Clone)]
pub struct SequentialScale {
    min: f64,
    max: f64,
    missing_color: Color32,
}

impl SequentialScale {
    /// Build a scale over `[min, max]`. A degenerate domain (max ≤ min) maps
    /// every value to the midpoint of the ramp.
    pub fn new(min: f64, max: f64) -> Self {
        SequentialScale {
            min,
            max,
            missing_color: Color32::GRAY,
        }
    }

    /// Build a scale spanning the present values in an iterator, if any.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            min = min.min(v);
            max = max.max(v);
        }
        (min <= max).then(|| SequentialScale::new(min, max))
    }

    /// Look up the colour for a value; `None` is the missing marker.
    pub fn color_for(&self, value: Option<f64>) -> Color32 {
        let Some(v) = value else {
            return self.missing_color;
        };

        let range = self.max - self.min;
        let t = if range.abs() < f64::EPSILON {
            0.5
        } else {
            ((v - self.min) / range).clamp(0.0, 1.0)
        };

        // Blue hue; sweep lightness from pale to deep as t grows.
        let hsl = Hsl::new(210.0, 0.35 + 0.45 * t as f32, 0.85 - 0.55 * t as f32);
        let rgb: Srgb = hsl.into_color();
        Color32::from_rgb(
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_value_gets_the_neutral_colour() {
        let scale = SequentialScale::new(0.0, 40.0);
        assert_eq!(scale.color_for(None), Color32::GRAY);
    }

    #[test]
    fn higher_values_are_darker() {
        let scale = SequentialScale::new(0.0, 40.0);
        let low = scale.color_for(Some(2.0));
        let high = scale.color_for(Some(38.0));
        // Compare perceived brightness via the green channel of the ramp.
        assert!(low.g() > high.g());
    }

    #[test]
    fn out_of_domain_values_are_clamped() {
        let scale = SequentialScale::new(0.0, 40.0);
        assert_eq!(scale.color_for(Some(-10.0)), scale.color_for(Some(0.0)));
        assert_eq!(scale.color_for(Some(99.0)), scale.color_for(Some(40.0)));
    }

    #[test]
    fn from_values_requires_at_least_one_value() {
        assert!(SequentialScale::from_values(std::iter::empty()).is_none());
        assert!(SequentialScale::from_values([3.0]).is_some());
    }
}
