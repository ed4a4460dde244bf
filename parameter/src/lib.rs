use chrono::NaiveDateTime;
use std::cell::{Cell, Ref, RefCell};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::rc::{Rc, Weak};

pub mod format;
pub mod spec;
pub mod tree;
pub mod value;

pub use format::format_value;
pub use spec::{
    Choice, FileMode, NumberSpec, ParameterKind, ParameterSpec, DEFAULT_FILE_PATTERN,
    DEFAULT_IMAGE_HEIGHT, DEFAULT_TEXT_FORMAT,
};
pub use tree::{find_by_name, flatten, ParameterNode};
pub use value::{parse_date, ImageSource, PixelBuffer, Value, DATE_STORAGE_FORMAT};

pub type ParamRef = Rc<Parameter>;
pub type ParameterCallback = Rc<dyn Fn(&Parameter)>;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ParameterError {
    #[error("parameter '{name}' ({kind}) cannot take value {value}")]
    InvalidValue {
        name: String,
        kind: ParameterKind,
        value: String,
    },
    #[error("parameter '{name}' has no choice labelled '{label}'")]
    UnknownChoice { name: String, label: String },
}

/// Receiver of push updates: the view currently mirroring a parameter.
pub trait ViewRefresh {
    fn refresh(&self, parameter: &Parameter);
}

/// Identifies one registration in a parameter's view slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewToken(u64);

struct ViewSlot {
    token: ViewToken,
    target: Weak<dyn ViewRefresh>,
}

pub struct Parameter {
    name: String,
    editable: bool,
    spec: RefCell<ParameterSpec>,
    value: RefCell<Value>,
    active: Cell<bool>,
    callback: RefCell<Option<ParameterCallback>>,
    view: RefCell<Option<ViewSlot>>,
    next_token: Cell<u64>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, mut spec: ParameterSpec, value: Value) -> Self {
        let name = name.into();
        if let ParameterSpec::Number(number) = &mut spec {
            for note in number.repair() {
                log::warn!("parameter '{name}': {note}");
            }
        }
        Self {
            name,
            editable: true,
            spec: RefCell::new(spec),
            value: RefCell::new(value),
            active: Cell::new(true),
            callback: RefCell::new(None),
            view: RefCell::new(None),
            next_token: Cell::new(1),
        }
    }

    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::text_with_format(name, value, DEFAULT_TEXT_FORMAT)
    }

    pub fn text_with_format(
        name: impl Into<String>,
        value: impl Into<String>,
        format: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            ParameterSpec::Text {
                format: format.into(),
            },
            Value::Text(value.into()),
        )
    }

    pub fn number(name: impl Into<String>, value: f64, spec: NumberSpec) -> Self {
        Self::new(name, ParameterSpec::Number(spec), Value::Number(value))
    }

    pub fn checkbox(name: impl Into<String>, value: bool) -> Self {
        Self::new(name, ParameterSpec::Checkbox, Value::Bool(value))
    }

    pub fn choice(name: impl Into<String>, choices: Vec<Choice>, value: Option<Value>) -> Self {
        Self::new(
            name,
            ParameterSpec::Choice { choices },
            value.unwrap_or_default(),
        )
    }

    pub fn file(
        name: impl Into<String>,
        value: impl Into<String>,
        mode: FileMode,
        pattern: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            ParameterSpec::File {
                mode,
                pattern: pattern.into(),
            },
            Value::Text(value.into()),
        )
    }

    pub fn action(name: impl Into<String>, callback: impl Fn(&Parameter) + 'static) -> Self {
        Self::new(name, ParameterSpec::Action, Value::None).with_callback(callback)
    }

    pub fn progress(name: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        Self::new(
            name,
            ParameterSpec::Progress { min, max },
            Value::Number(value),
        )
    }

    pub fn image(name: impl Into<String>, image: Option<ImageSource>, height: f32) -> Self {
        Self::new(
            name,
            ParameterSpec::Image { height },
            image.map(Value::Image).unwrap_or_default(),
        )
    }

    /// A read-only date shown through a strftime `format` such as
    /// `"%d/%m/%Y"`.
    pub fn date(
        name: impl Into<String>,
        value: NaiveDateTime,
        format: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            ParameterSpec::Date {
                format: format.into(),
            },
            Value::Date(value),
        )
        .read_only()
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    pub fn inactive(self) -> Self {
        self.active.set(false);
        self
    }

    pub fn with_callback(self, callback: impl Fn(&Parameter) + 'static) -> Self {
        *self.callback.borrow_mut() = Some(Rc::new(callback));
        self
    }

    pub fn into_ref(self) -> ParamRef {
        Rc::new(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ParameterKind {
        self.spec.borrow().kind()
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn set_active(&self, active: bool) {
        if self.active.replace(active) != active {
            self.refresh_view();
        }
    }

    pub fn spec(&self) -> Ref<'_, ParameterSpec> {
        self.spec.borrow()
    }

    pub fn number_spec(&self) -> Option<NumberSpec> {
        match &*self.spec.borrow() {
            ParameterSpec::Number(spec) => Some(spec.clone()),
            _ => None,
        }
    }

    pub fn value(&self) -> Value {
        self.value.borrow().clone()
    }

    pub fn set_callback(&self, callback: Option<ParameterCallback>) {
        *self.callback.borrow_mut() = callback;
    }

    /// External write: stores the value, runs the callback and pushes the
    /// new state to the bound view.
    pub fn set_value(&self, value: impl Into<Value>) {
        self.store(value.into());
        self.run_callback();
        self.refresh_view();
    }

    /// Stores without any notification.
    pub fn set_value_silent(&self, value: impl Into<Value>) {
        self.store(value.into());
    }

    /// Write originating from the bound view: the view already shows the
    /// value, so only the callback runs.
    pub fn commit_from_view(&self, value: impl Into<Value>) {
        self.store(value.into());
        self.run_callback();
    }

    /// Stores a value typed into the view without notifying anyone; `commit`
    /// finishes the edit.
    pub fn stage_from_view(&self, value: impl Into<Value>) {
        self.store(value.into());
    }

    pub fn commit(&self) {
        self.run_callback();
        self.refresh_view();
    }

    /// Invokes the callback without touching the value (action trigger).
    pub fn trigger(&self) {
        self.run_callback();
    }

    pub fn update_progress(&self, value: f64, min: f64, max: f64) {
        if let ParameterSpec::Progress {
            min: spec_min,
            max: spec_max,
        } = &mut *self.spec.borrow_mut()
        {
            *spec_min = min;
            *spec_max = max;
        }
        self.store(Value::Number(value));
        self.refresh_view();
    }

    pub fn choices(&self) -> Vec<Choice> {
        match &*self.spec.borrow() {
            ParameterSpec::Choice { choices } => choices.clone(),
            _ => Vec::new(),
        }
    }

    pub fn choice_labels(&self) -> Vec<String> {
        match &*self.spec.borrow() {
            ParameterSpec::Choice { choices } => choices.iter().map(|c| c.label.clone()).collect(),
            _ => Vec::new(),
        }
    }

    /// Replaces the allowed choices and pushes them to the view.
    pub fn set_choices(&self, new_choices: Vec<Choice>) {
        if let ParameterSpec::Choice { choices } = &mut *self.spec.borrow_mut() {
            *choices = new_choices;
        }
        self.refresh_view();
    }

    pub fn selected_label(&self) -> Option<String> {
        let value = self.value.borrow();
        if value.is_none() {
            return None;
        }
        let found = match &*self.spec.borrow() {
            ParameterSpec::Choice { choices } => choices
                .iter()
                .find(|c| c.value == *value)
                .map(|c| c.label.clone()),
            _ => None,
        };
        Some(found.unwrap_or_else(|| value.to_string()))
    }

    /// Selects the choice at `index` from the view; out-of-range indices are
    /// ignored.
    pub fn select_choice(&self, index: usize) -> bool {
        let choice = match &*self.spec.borrow() {
            ParameterSpec::Choice { choices } => choices.get(index).cloned(),
            _ => None,
        };
        match choice {
            Some(choice) => {
                self.commit_from_view(choice.value);
                true
            }
            None => false,
        }
    }

    /// The date rendered through the parameter's format. An unusable format
    /// falls back to the storage form.
    pub fn formatted_date(&self) -> Option<String> {
        let Value::Date(date) = *self.value.borrow() else {
            return None;
        };
        let format = match &*self.spec.borrow() {
            ParameterSpec::Date { format } => format.clone(),
            _ => DATE_STORAGE_FORMAT.to_string(),
        };
        let mut text = String::new();
        if write!(text, "{}", date.format(&format)).is_err() {
            log::warn!("parameter '{}': invalid date format '{format}'", self.name);
            text = date.format(DATE_STORAGE_FORMAT).to_string();
        }
        Some(text)
    }

    pub fn value_string(&self) -> String {
        match self.kind() {
            ParameterKind::Choice => self.selected_label().unwrap_or_default(),
            ParameterKind::Date => self.formatted_date().unwrap_or_default(),
            _ => self.value.borrow().to_string(),
        }
    }

    /// Serialized form used by item records.
    pub fn to_json(&self) -> serde_json::Value {
        match self.kind() {
            ParameterKind::Action => serde_json::Value::Null,
            ParameterKind::Choice => self
                .selected_label()
                .map(serde_json::Value::String)
                .unwrap_or(serde_json::Value::Null),
            _ => self.value.borrow().to_json(),
        }
    }

    /// Restores a serialized value without running callbacks or refreshing
    /// the view.
    pub fn restore(&self, json: &serde_json::Value) -> Result<(), ParameterError> {
        let kind = self.kind();
        let restored = match kind {
            ParameterKind::Action => return Ok(()),
            ParameterKind::Number | ParameterKind::Progress => match json {
                serde_json::Value::Number(n) => n.as_f64().map(Value::Number),
                serde_json::Value::String(s) => s.trim().parse::<f64>().ok().map(Value::Number),
                _ => None,
            },
            ParameterKind::Checkbox => match json {
                serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
                serde_json::Value::Number(n) => n.as_f64().map(|n| Value::Bool(n != 0.0)),
                serde_json::Value::String(s) => parse_bool(s).map(Value::Bool),
                _ => None,
            },
            ParameterKind::Choice => return self.restore_choice(json),
            ParameterKind::Image => match json {
                serde_json::Value::String(s) => {
                    Some(Value::Image(ImageSource::Path(PathBuf::from(s))))
                }
                serde_json::Value::Null => Some(Value::None),
                _ => None,
            },
            ParameterKind::Date => match json {
                serde_json::Value::String(s) => parse_date(s).map(Value::Date),
                serde_json::Value::Null => Some(Value::None),
                _ => None,
            },
            ParameterKind::Text | ParameterKind::File => Some(Value::from_json(json)),
        };
        match restored {
            Some(value) => {
                self.set_value_silent(value);
                Ok(())
            }
            None => Err(ParameterError::InvalidValue {
                name: self.name.clone(),
                kind,
                value: json.to_string(),
            }),
        }
    }

    /// Only values matching a choice label or value restore; an ad-hoc
    /// value saved from outside the list is reported and not applied.
    fn restore_choice(&self, json: &serde_json::Value) -> Result<(), ParameterError> {
        if json.is_null() {
            self.set_value_silent(Value::None);
            return Ok(());
        }
        let wanted = Value::from_json(json);
        let label = match json {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let found = self
            .choices()
            .into_iter()
            .find(|c| c.label == label || c.value == wanted);
        match found {
            Some(choice) => {
                self.set_value_silent(choice.value);
                Ok(())
            }
            None => Err(ParameterError::UnknownChoice {
                name: self.name.clone(),
                label,
            }),
        }
    }

    /// Registers `target` as the single push-target; any earlier
    /// registration is replaced.
    pub fn attach_view(&self, target: Weak<dyn ViewRefresh>) -> ViewToken {
        let token = ViewToken(self.next_token.get());
        self.next_token.set(token.0 + 1);
        *self.view.borrow_mut() = Some(ViewSlot { token, target });
        token
    }

    /// Clears the push-target if it is still the registration named by
    /// `token`. Returns whether anything was cleared.
    pub fn detach_view(&self, token: ViewToken) -> bool {
        let mut slot = self.view.borrow_mut();
        if slot.as_ref().map(|s| s.token) == Some(token) {
            *slot = None;
            true
        } else {
            false
        }
    }

    pub fn has_view(&self) -> bool {
        self.view.borrow().is_some()
    }

    /// Whether the registration named by `token` is the current push-target.
    pub fn is_view(&self, token: ViewToken) -> bool {
        self.view.borrow().as_ref().map(|slot| slot.token) == Some(token)
    }

    pub fn refresh_view(&self) {
        let target = self
            .view
            .borrow()
            .as_ref()
            .and_then(|slot| slot.target.upgrade());
        if let Some(target) = target {
            target.refresh(self);
        }
    }

    fn run_callback(&self) {
        let callback = self.callback.borrow().clone();
        if let Some(callback) = callback {
            callback(self);
        }
    }

    fn store(&self, value: Value) {
        let value = self.coerce(value);
        *self.value.borrow_mut() = value;
    }

    fn coerce(&self, value: Value) -> Value {
        match &*self.spec.borrow() {
            ParameterSpec::Number(spec) => match value {
                Value::Number(n) => Value::Number(spec.normalize(n)),
                Value::Text(s) => match s.trim().parse::<f64>() {
                    Ok(n) => Value::Number(spec.normalize(n)),
                    Err(_) => Value::Text(s),
                },
                other => other,
            },
            ParameterSpec::Date { .. } => match value {
                Value::Text(s) => parse_date(&s).map(Value::Date).unwrap_or(Value::Text(s)),
                other => other,
            },
            ParameterSpec::Checkbox => match value {
                Value::Bool(b) => Value::Bool(b),
                Value::Number(n) => Value::Bool(n != 0.0),
                Value::Text(s) => Value::Bool(parse_bool(&s).unwrap_or(true)),
                _ => Value::Bool(true),
            },
            _ => value,
        }
    }
}

impl std::fmt::Debug for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("value", &*self.value.borrow())
            .field("editable", &self.editable)
            .finish()
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
