//! Creates the control matching a parameter's kind and keeps the two in
//! sync: edits flow from the control into the parameter, external changes
//! are pushed back through the parameter's view slot.

use crate::control::{
    ActionControl, CheckboxControl, ChoiceControl, ChoiceSelection, Control, ControlEdit,
    FileControl, ImageControl, NumberControl, ProgressControl, TextControl,
};
use crate::decode::{ImageDecoder, NoImageDecoder};
use parameter::{
    ParamRef, Parameter, ParameterKind, ParameterSpec, Value, ViewRefresh, ViewToken,
    DEFAULT_TEXT_FORMAT,
};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

/// Services the host toolkit lends to controls.
#[derive(Clone)]
pub struct BindingHost {
    pub image_decoder: Rc<dyn ImageDecoder>,
}

impl Default for BindingHost {
    fn default() -> Self {
        Self {
            image_decoder: Rc::new(NoImageDecoder),
        }
    }
}

impl BindingHost {
    pub fn with_decoder(decoder: impl ImageDecoder + 'static) -> Self {
        Self {
            image_decoder: Rc::new(decoder),
        }
    }
}

/// Shared cell the parameter pushes into.
struct ControlCell(RefCell<Control>);

impl ViewRefresh for ControlCell {
    fn refresh(&self, parameter: &Parameter) {
        match self.0.try_borrow_mut() {
            Ok(mut control) => control.update_from_parameter(parameter),
            Err(_) => log::debug!(
                "control for '{}' is busy, skipping refresh",
                parameter.name()
            ),
        }
    }
}

/// A control bound to one parameter. Dropping it clears the parameter's
/// push-target if this binding still holds it.
pub struct BoundControl {
    parameter: ParamRef,
    cell: Rc<ControlCell>,
    token: Option<ViewToken>,
}

/// Returns the control for `parameter`, or `None` when its value does not
/// have the shape its kind requires.
pub fn build(parameter: &ParamRef, host: &BindingHost) -> Option<BoundControl> {
    let Some(control) = make_control(parameter, host) else {
        log::debug!(
            "no control for parameter '{}' ({}) holding {:?}",
            parameter.name(),
            parameter.kind(),
            parameter.value()
        );
        return None;
    };
    let cell = Rc::new(ControlCell(RefCell::new(control)));
    let token = if parameter.kind() == ParameterKind::Action {
        None
    } else {
        let weak = Rc::downgrade(&cell);
        Some(parameter.attach_view(weak))
    };
    Some(BoundControl {
        parameter: parameter.clone(),
        cell,
        token,
    })
}

fn make_control(parameter: &Parameter, host: &BindingHost) -> Option<Control> {
    let value = parameter.value();
    let label = parameter.name().to_string();
    let editable = parameter.is_editable();
    let control = match &*parameter.spec() {
        ParameterSpec::Text { format } => match value {
            Value::Bool(_) | Value::Image(_) => return None,
            _ => Control::Text(TextControl::new(label, format.as_str(), &value, editable)),
        },
        ParameterSpec::Date { .. } => match value {
            Value::Date(_) | Value::None => {
                let text = Value::Text(parameter.formatted_date().unwrap_or_default());
                Control::Text(TextControl::new(label, DEFAULT_TEXT_FORMAT, &text, false))
            }
            _ => return None,
        },
        ParameterSpec::Number(spec) => {
            Control::Number(NumberControl::new(label, value.as_f64()?, spec, editable))
        }
        ParameterSpec::Checkbox => Control::Checkbox(CheckboxControl {
            label,
            checked: value.as_bool()?,
            editable,
        }),
        ParameterSpec::Choice { choices } => {
            let labels = choices.iter().map(|c| c.label.clone()).collect();
            let current = parameter.selected_label();
            Control::Choice(ChoiceControl::new(label, labels, current.as_deref(), editable))
        }
        ParameterSpec::File { mode, pattern } => match value {
            Value::Text(_) | Value::None => Control::File(FileControl::new(
                label,
                &value,
                *mode,
                pattern.as_str(),
                editable,
            )),
            _ => return None,
        },
        ParameterSpec::Action => Control::Action(ActionControl { label }),
        ParameterSpec::Progress { min, max } => Control::Progress(ProgressControl {
            label,
            value: value.as_f64()?,
            min: *min,
            max: *max,
        }),
        ParameterSpec::Image { height } => match value {
            Value::Image(_) | Value::Text(_) | Value::None => {
                let mut control = ImageControl::new(label, *height, host.image_decoder.clone());
                control.load(&value);
                Control::Image(control)
            }
            _ => return None,
        },
    };
    Some(control)
}

impl BoundControl {
    pub fn parameter(&self) -> &ParamRef {
        &self.parameter
    }

    pub fn control(&self) -> Ref<'_, Control> {
        self.cell.0.borrow()
    }

    /// Direct access for purely visual state (viewer pan, for instance).
    pub fn control_mut(&self) -> RefMut<'_, Control> {
        self.cell.0.borrow_mut()
    }

    pub fn label(&self) -> String {
        self.control().label().to_string()
    }

    pub fn displayed_value(&self) -> Value {
        self.control().displayed_value()
    }

    /// Whether this binding still is the parameter's push-target.
    pub fn is_push_target(&self) -> bool {
        self.token.is_some_and(|token| self.parameter.is_view(token))
    }

    /// Applies a user interaction. Returns whether the parameter was
    /// written (or, for actions, triggered).
    pub fn apply(&self, edit: ControlEdit) -> bool {
        let parameter = &self.parameter;
        match edit {
            ControlEdit::Click => {
                let is_action = matches!(&*self.control(), Control::Action(_));
                if is_action {
                    parameter.trigger();
                }
                is_action
            }
            ControlEdit::OpenViewer => {
                if let Control::Image(image) = &mut *self.control_mut() {
                    image.open_viewer();
                }
                false
            }
            ControlEdit::CloseViewer => {
                if let Control::Image(image) = &mut *self.control_mut() {
                    image.close_viewer();
                }
                false
            }
            ControlEdit::Zoom { delta, pointer } => {
                if let Control::Image(image) = &mut *self.control_mut() {
                    if let Some(viewer) = image.viewer_mut() {
                        viewer.wheel(delta, pointer);
                    }
                }
                false
            }
            _ if !parameter.is_editable() => {
                log::debug!("ignoring edit of read-only parameter '{}'", parameter.name());
                false
            }
            edit => self.apply_edit(edit),
        }
    }

    fn apply_edit(&self, edit: ControlEdit) -> bool {
        let parameter = &self.parameter;
        // The control borrow must end before the parameter is written: its
        // callback may push back into this very control.
        let write = {
            let mut control = self.control_mut();
            match (&mut *control, edit) {
                (Control::Text(text), ControlEdit::Text(typed)) => {
                    text.edit(typed.clone());
                    Write::Stage(Value::Text(typed))
                }
                (Control::Text(text), ControlEdit::FinishText) => {
                    text.finish();
                    Write::Commit
                }
                (Control::File(file), ControlEdit::Text(typed)) => {
                    file.edit(typed.clone());
                    Write::FromView(Value::Text(typed))
                }
                (Control::File(file), ControlEdit::FileChosen(chosen)) => {
                    match file.apply_dialog_result(chosen) {
                        Some(path) => Write::FromView(Value::Text(path)),
                        None => Write::Nothing,
                    }
                }
                (Control::Number(number), ControlEdit::Number(n)) => {
                    Write::FromView(Value::Number(number.enter_number(n)))
                }
                (Control::Number(number), ControlEdit::Slider(position)) => {
                    if number.slider().is_some() {
                        Write::FromView(Value::Number(number.move_slider(position)))
                    } else {
                        Write::Nothing
                    }
                }
                (Control::Checkbox(checkbox), ControlEdit::Checked(checked)) => {
                    checkbox.checked = checked;
                    Write::FromView(Value::Bool(checked))
                }
                (Control::Choice(choice), ControlEdit::Choice(index)) => match choice.select(index) {
                    Some(ChoiceSelection::Choice(index)) => Write::Select(index),
                    Some(ChoiceSelection::Current) | None => Write::Nothing,
                },
                (control, edit) => {
                    log::debug!(
                        "edit {edit:?} does not apply to a {} control",
                        control.kind()
                    );
                    Write::Nothing
                }
            }
        };

        match write {
            Write::Nothing => false,
            Write::Stage(value) => {
                parameter.stage_from_view(value);
                true
            }
            Write::Commit => {
                parameter.commit();
                true
            }
            Write::FromView(value) => {
                parameter.commit_from_view(value);
                self.resync();
                true
            }
            Write::Select(index) => parameter.select_choice(index),
        }
    }

    /// The parameter may have normalised what the control sent; show what
    /// was actually stored.
    fn resync(&self) {
        let stored = self.parameter.value();
        let differs = match self.cell.0.try_borrow() {
            Ok(control) => match &*control {
                Control::Number(_) | Control::Checkbox(_) => control.displayed_value() != stored,
                _ => false,
            },
            Err(_) => false,
        };
        if differs {
            self.cell.refresh(&self.parameter);
        }
    }

    /// Clears the parameter's push-target if it is still this binding.
    pub fn detach(&mut self) {
        if let Some(token) = self.token.take() {
            self.parameter.detach_view(token);
        }
    }

    pub fn release(mut self) {
        self.detach();
    }
}

impl Drop for BoundControl {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for BoundControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundControl")
            .field("parameter", &self.parameter.name())
            .field("control", &*self.control())
            .field("token", &self.token)
            .finish()
    }
}

enum Write {
    Nothing,
    Stage(Value),
    Commit,
    FromView(Value),
    Select(usize),
}
