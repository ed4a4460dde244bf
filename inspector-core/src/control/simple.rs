#[derive(Debug, Clone)]
pub struct CheckboxControl {
    pub label: String,
    pub checked: bool,
    pub editable: bool,
}

#[derive(Debug, Clone)]
pub struct ProgressControl {
    pub label: String,
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl ProgressControl {
    /// Completed fraction in `[0, 1]`; an empty range reads as zero.
    pub fn fraction(&self) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 || !span.is_finite() {
            return 0.0;
        }
        (((self.value - self.min) / span).clamp(0.0, 1.0)) as f32
    }
}

#[derive(Debug, Clone)]
pub struct ActionControl {
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_fraction() {
        let progress = ProgressControl {
            label: "p".into(),
            value: 25.0,
            min: 0.0,
            max: 50.0,
        };
        assert_eq!(progress.fraction(), 0.5);
        let empty = ProgressControl { min: 3.0, max: 3.0, ..progress };
        assert_eq!(empty.fraction(), 0.0);
    }
}
