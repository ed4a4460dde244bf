use crate::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Text,
    Number,
    Checkbox,
    Choice,
    File,
    Action,
    Progress,
    Image,
    Date,
}

impl ParameterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKind::Text => "text",
            ParameterKind::Number => "number",
            ParameterKind::Checkbox => "checkbox",
            ParameterKind::Choice => "choice",
            ParameterKind::File => "file",
            ParameterKind::Action => "action",
            ParameterKind::Progress => "progress",
            ParameterKind::Image => "image",
            ParameterKind::Date => "date",
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileMode {
    Open,
    Save,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberSpec {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: f64,
    pub slider: bool,
    pub enforce_range: bool,
    pub enforce_step: bool,
}

impl Default for NumberSpec {
    fn default() -> Self {
        Self {
            min: None,
            max: None,
            step: 0.0,
            slider: false,
            enforce_range: false,
            enforce_step: false,
        }
    }
}

impl NumberSpec {
    pub fn range(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            ..Self::default()
        }
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_slider(mut self) -> Self {
        self.slider = true;
        self
    }

    pub fn enforcing_range(mut self) -> Self {
        self.enforce_range = true;
        self
    }

    pub fn enforcing_step(mut self) -> Self {
        self.enforce_step = true;
        self
    }

    /// Fixes a spec that cannot describe a range: non-finite bounds become
    /// unbounded, inverted bounds are swapped and a non-finite or negative
    /// step is replaced. The slider is turned off whenever a bound had to
    /// be fixed or one is missing. Returns a note per fix.
    pub fn repair(&mut self) -> Vec<&'static str> {
        let mut notes = Vec::new();
        if self.min.is_some_and(|min| !min.is_finite()) {
            self.min = None;
            notes.push("minimum is not a finite number, dropped");
        }
        if self.max.is_some_and(|max| !max.is_finite()) {
            self.max = None;
            notes.push("maximum is not a finite number, dropped");
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                self.min = Some(max);
                self.max = Some(min);
                notes.push("minimum above maximum, bounds swapped");
            }
        }
        if !self.step.is_finite() {
            self.step = 0.0;
            notes.push("step is not a finite number, reset");
        } else if self.step < 0.0 {
            self.step = -self.step;
            notes.push("negative step, sign dropped");
        }
        if self.slider && (!notes.is_empty() || self.min.is_none() || self.max.is_none()) {
            self.slider = false;
            notes.push("slider needs a valid range, disabled");
        }
        notes
    }

    /// Applies range clamping and step truncation as configured.
    pub fn normalize(&self, value: f64) -> f64 {
        let mut value = value;
        if self.enforce_range {
            if let Some(min) = self.min {
                value = value.max(min);
            }
            if let Some(max) = self.max {
                value = value.min(max);
            }
        }
        if self.enforce_step && self.step > 0.0 {
            value = (value / self.step).trunc() * self.step;
        }
        value
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub label: String,
    pub value: Value,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// A choice whose value is its own label.
    pub fn plain(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            value: Value::Text(label.clone()),
            label,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParameterSpec {
    Text { format: String },
    Number(NumberSpec),
    Checkbox,
    Choice { choices: Vec<Choice> },
    File { mode: FileMode, pattern: String },
    Action,
    Progress { min: f64, max: f64 },
    Image { height: f32 },
    Date { format: String },
}

impl ParameterSpec {
    pub fn kind(&self) -> ParameterKind {
        match self {
            ParameterSpec::Text { .. } => ParameterKind::Text,
            ParameterSpec::Number(_) => ParameterKind::Number,
            ParameterSpec::Checkbox => ParameterKind::Checkbox,
            ParameterSpec::Choice { .. } => ParameterKind::Choice,
            ParameterSpec::File { .. } => ParameterKind::File,
            ParameterSpec::Action => ParameterKind::Action,
            ParameterSpec::Progress { .. } => ParameterKind::Progress,
            ParameterSpec::Image { .. } => ParameterKind::Image,
            ParameterSpec::Date { .. } => ParameterKind::Date,
        }
    }
}

pub const DEFAULT_TEXT_FORMAT: &str = "{}";
pub const DEFAULT_FILE_PATTERN: &str = "All files (*.*)";
pub const DEFAULT_IMAGE_HEIGHT: f32 = 100.0;
