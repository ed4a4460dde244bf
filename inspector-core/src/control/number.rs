use parameter::NumberSpec;

pub const UNBOUNDED_MIN: f64 = -10_000_000.0;
pub const UNBOUNDED_MAX: f64 = 10_000_000.0;
/// Step used when a parameter declares a step of zero.
pub const ZERO_STEP_FALLBACK: f64 = 0.001;

/// Integer slider domain: positions are multiples of the number's step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderState {
    pub min: i64,
    pub max: i64,
    pub position: i64,
}

#[derive(Debug, Clone)]
pub struct NumberControl {
    label: String,
    value: f64,
    min: f64,
    max: f64,
    step: f64,
    decimals: usize,
    editable: bool,
    slider: Option<SliderState>,
    syncing: bool,
}

/// Corrected step and the number of decimals it implies.
pub fn precision_for_step(step: f64) -> (f64, usize) {
    let step = if step == 0.0 || !step.is_finite() {
        ZERO_STEP_FALLBACK
    } else {
        step.abs()
    };
    let decimals = (1.0 / step).log10().round().max(0.0) as usize;
    (step, decimals)
}

impl NumberControl {
    pub fn new(label: impl Into<String>, value: f64, spec: &NumberSpec, editable: bool) -> Self {
        let (step, decimals) = precision_for_step(spec.step);
        let mut control = Self {
            label: label.into(),
            value: 0.0,
            min: UNBOUNDED_MIN,
            max: UNBOUNDED_MAX,
            step,
            decimals,
            editable,
            slider: None,
            syncing: false,
        };
        control.update_spec(spec);
        control.update_value(value);
        control
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn decimals(&self) -> usize {
        self.decimals
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn slider(&self) -> Option<SliderState> {
        self.slider
    }

    pub fn display_text(&self) -> String {
        format!("{:.*}", self.decimals, self.value)
    }

    /// Pulls bounds, step and slider range from a (possibly changed) spec.
    /// A spec with unusable bounds is repaired first and loses its slider.
    pub fn update_spec(&mut self, spec: &NumberSpec) {
        let mut spec = spec.clone();
        for note in spec.repair() {
            log::debug!("number control '{}': {note}", self.label);
        }
        let (step, decimals) = precision_for_step(spec.step);
        self.step = step;
        self.decimals = decimals;
        self.min = spec.min.unwrap_or(UNBOUNDED_MIN);
        self.max = spec.max.unwrap_or(UNBOUNDED_MAX);
        // One-sided bounds may lie beyond the default limit on the open side.
        if self.min > self.max {
            if spec.min.is_none() {
                self.min = self.max;
            } else {
                self.max = self.min;
            }
        }
        self.slider = match (spec.slider, spec.min, spec.max) {
            (true, Some(min), Some(max)) => Some(SliderState {
                min: (min / step).round() as i64,
                max: (max / step).round() as i64,
                position: 0,
            }),
            _ => None,
        };
        self.sync_slider();
    }

    /// Push path: shows `value` and moves the slider without echoing back.
    pub fn update_value(&mut self, value: f64) {
        self.set_number(value);
    }

    /// The user entered a number; returns the value the box settled on.
    pub fn enter_number(&mut self, value: f64) -> f64 {
        self.set_number(value)
    }

    /// The user dragged the slider; returns the resulting number.
    pub fn move_slider(&mut self, position: i64) -> f64 {
        let Some(slider) = self.slider.as_mut() else {
            return self.value;
        };
        slider.position = position.clamp(slider.min, slider.max);
        let target = slider.position as f64 * self.step;
        self.syncing = true;
        let value = self.set_number(target);
        self.syncing = false;
        value
    }

    fn set_number(&mut self, value: f64) -> f64 {
        let value = if value.is_finite() { value } else { self.value };
        let scale = 10f64.powi(self.decimals as i32);
        let rounded = (value.clamp(self.min, self.max) * scale).round() / scale;
        self.value = rounded;
        if !self.syncing {
            self.sync_slider();
        }
        rounded
    }

    fn sync_slider(&mut self) {
        let step = self.step;
        let value = self.value;
        if let Some(slider) = self.slider.as_mut() {
            slider.position = ((value / step).round() as i64).clamp(slider.min, slider.max);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider_spec(min: f64, max: f64, step: f64) -> NumberSpec {
        NumberSpec::range(min, max).with_step(step).with_slider()
    }

    #[test]
    fn precision_follows_step() {
        assert_eq!(precision_for_step(0.01), (0.01, 2));
        assert_eq!(precision_for_step(1.0), (1.0, 0));
        assert_eq!(precision_for_step(10.0), (10.0, 0));
        assert_eq!(precision_for_step(0.0), (ZERO_STEP_FALLBACK, 3));
    }

    #[test]
    fn slider_range_is_scaled_by_step() {
        let control = NumberControl::new("x", 2.5, &slider_spec(0.0, 10.0, 0.5), true);
        let slider = control.slider().expect("slider");
        assert_eq!((slider.min, slider.max, slider.position), (0, 20, 5));
    }

    #[test]
    fn number_and_slider_converge_within_one_step() {
        let step = 0.01;
        let mut control = NumberControl::new("x", 0.0, &slider_spec(-5.0, 5.0, step), true);
        for n in [3.14159, -2.718, 0.004, 4.999] {
            control.enter_number(n);
            let position = control.slider().expect("slider").position;
            let back = control.move_slider(position);
            assert!((back - n).abs() <= step, "{back} vs {n}");
            assert_eq!(control.slider().expect("slider").position, position);
        }
    }

    #[test]
    fn inverted_range_is_swapped_without_slider() {
        let mut control = NumberControl::new("x", 1.0, &slider_spec(5.0, 0.0, 1.0), true);
        assert_eq!((control.min(), control.max()), (0.0, 5.0));
        assert!(control.slider().is_none());
        assert_eq!(control.enter_number(9.0), 5.0);
        assert_eq!(control.move_slider(3), 5.0);
    }

    #[test]
    fn non_finite_bounds_become_unbounded() {
        let control = NumberControl::new("x", 3.0, &slider_spec(f64::NAN, 10.0, 1.0), true);
        assert_eq!((control.min(), control.max()), (UNBOUNDED_MIN, 10.0));
        assert!(control.slider().is_none());
        assert_eq!(control.value(), 3.0);

        let control = NumberControl::new("x", 3.0, &NumberSpec::range(0.0, f64::INFINITY), true);
        assert_eq!((control.min(), control.max()), (0.0, UNBOUNDED_MAX));
    }

    #[test]
    fn one_sided_bound_beyond_default_limit() {
        let spec = NumberSpec {
            min: Some(2.0 * UNBOUNDED_MAX),
            ..NumberSpec::default()
        };
        let mut control = NumberControl::new("x", 0.0, &spec, true);
        assert_eq!(control.enter_number(1.0), 2.0 * UNBOUNDED_MAX);
    }

    #[test]
    fn nan_step_falls_back() {
        let control = NumberControl::new("x", 0.5, &slider_spec(0.0, 1.0, f64::NAN), true);
        assert_eq!(control.step(), ZERO_STEP_FALLBACK);
        assert!(control.slider().is_none());
    }

    #[test]
    fn entered_values_are_clamped_to_bounds() {
        let mut control = NumberControl::new("x", 0.0, &NumberSpec::range(0.0, 1.0).with_step(0.1), true);
        assert_eq!(control.enter_number(7.0), 1.0);
        assert_eq!(control.display_text(), "1.0");
        assert!(control.slider().is_none());
    }
}
