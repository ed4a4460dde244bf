//! Editable views over a single parameter.

mod choice;
mod file;
mod image;
mod number;
mod simple;
mod text;

use parameter::{Parameter, ParameterKind, ParameterSpec, Value};
use std::path::PathBuf;

pub use choice::{ChoiceControl, ChoiceSelection};
pub use file::FileControl;
pub use image::{ImageControl, ImageViewer, ZOOM_IN, ZOOM_OUT};
pub use number::{
    precision_for_step, NumberControl, SliderState, UNBOUNDED_MAX, UNBOUNDED_MIN,
    ZERO_STEP_FALLBACK,
};
pub use simple::{ActionControl, CheckboxControl, ProgressControl};
pub use text::TextControl;

#[derive(Debug)]
pub enum Control {
    Text(TextControl),
    Number(NumberControl),
    Checkbox(CheckboxControl),
    Choice(ChoiceControl),
    File(FileControl),
    Image(ImageControl),
    Progress(ProgressControl),
    Action(ActionControl),
}

/// A user interaction with a control, as reported by the host toolkit.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEdit {
    /// Text typed into a text or file box.
    Text(String),
    /// Editing of a text box finished (focus lost or enter pressed).
    FinishText,
    Number(f64),
    Slider(i64),
    Checked(bool),
    Choice(usize),
    FileChosen(Option<PathBuf>),
    Click,
    OpenViewer,
    CloseViewer,
    Zoom { delta: f32, pointer: [f32; 2] },
}

impl Control {
    pub fn label(&self) -> &str {
        match self {
            Control::Text(c) => c.label(),
            Control::Number(c) => c.label(),
            Control::Checkbox(c) => &c.label,
            Control::Choice(c) => c.label(),
            Control::File(c) => c.label(),
            Control::Image(c) => c.label(),
            Control::Progress(c) => &c.label,
            Control::Action(c) => &c.label,
        }
    }

    /// The parameter kind this control is suited for. Date parameters are
    /// shown by a read-only text control.
    pub fn kind(&self) -> ParameterKind {
        match self {
            Control::Text(_) => ParameterKind::Text,
            Control::Number(_) => ParameterKind::Number,
            Control::Checkbox(_) => ParameterKind::Checkbox,
            Control::Choice(_) => ParameterKind::Choice,
            Control::File(_) => ParameterKind::File,
            Control::Image(_) => ParameterKind::Image,
            Control::Progress(_) => ParameterKind::Progress,
            Control::Action(_) => ParameterKind::Action,
        }
    }

    pub fn is_editable(&self) -> bool {
        match self {
            Control::Text(c) => c.is_editable(),
            Control::Number(c) => c.is_editable(),
            Control::Checkbox(c) => c.editable,
            Control::Choice(c) => c.is_editable(),
            Control::File(c) => c.is_editable(),
            Control::Action(_) => true,
            Control::Image(_) | Control::Progress(_) => false,
        }
    }

    /// Pulls the full current state of `parameter` into the control.
    pub fn update_from_parameter(&mut self, parameter: &Parameter) {
        let value = parameter.value();
        match self {
            Control::Text(c) => match parameter.formatted_date() {
                Some(date) => c.update_value(&Value::Text(date)),
                None => c.update_value(&value),
            },
            Control::Number(c) => {
                if let Some(spec) = parameter.number_spec() {
                    c.update_spec(&spec);
                }
                if let Some(n) = value.as_f64() {
                    c.update_value(n);
                }
            }
            Control::Checkbox(c) => c.checked = value.as_bool().unwrap_or(false),
            Control::Choice(c) => {
                c.update_choices(parameter.choice_labels());
                c.update_value(parameter.selected_label().as_deref());
            }
            Control::File(c) => c.update_value(&value),
            Control::Image(c) => c.load(&value),
            Control::Progress(c) => {
                if let ParameterSpec::Progress { min, max } = &*parameter.spec() {
                    c.min = *min;
                    c.max = *max;
                }
                c.value = value.as_f64().unwrap_or(c.min);
            }
            Control::Action(_) => {}
        }
    }

    /// The value the control currently shows, in parameter terms.
    pub fn displayed_value(&self) -> Value {
        match self {
            Control::Text(c) => Value::Text(c.text().to_string()),
            Control::Number(c) => Value::Number(c.value()),
            Control::Checkbox(c) => Value::Bool(c.checked),
            Control::Choice(c) => c
                .current_label()
                .map(|label| Value::Text(label.to_string()))
                .unwrap_or_default(),
            Control::File(c) => Value::Text(c.path().to_string()),
            Control::Image(c) => c.image().cloned().map(Value::from).unwrap_or_default(),
            Control::Progress(c) => Value::Number(c.value),
            Control::Action(_) => Value::None,
        }
    }
}
