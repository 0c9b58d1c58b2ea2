use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub label: String,
    /// Top score times 100; not clamped.
    pub confidence_percent: f32,
}

/// Renders as `"<label> (<confidence>%)"` with two decimals.
impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}%)", self.label, self.confidence_percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_has_two_decimals() {
        let result = PredictionResult {
            label: "Tomato___Late_blight".to_string(),
            confidence_percent: 7.0,
        };

        assert_eq!(result.to_string(), "Tomato___Late_blight (7.00%)");
    }
}
