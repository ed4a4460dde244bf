use parameter::{FileMode, Value};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FileControl {
    label: String,
    path: String,
    mode: FileMode,
    pattern: String,
    editable: bool,
}

impl FileControl {
    pub fn new(
        label: impl Into<String>,
        value: &Value,
        mode: FileMode,
        pattern: impl Into<String>,
        editable: bool,
    ) -> Self {
        let mut control = Self {
            label: label.into(),
            path: String::new(),
            mode,
            pattern: pattern.into(),
            editable,
        };
        control.update_value(value);
        control
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn mode(&self) -> FileMode {
        self.mode
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn dialog_title(&self) -> String {
        match self.mode {
            FileMode::Open => format!("Open {}", self.label),
            FileMode::Save => format!("Save {}", self.label),
        }
    }

    /// Extensions named by the pattern, e.g. `Images (*.png *.jpg)` gives
    /// `["png", "jpg"]`. Wildcard-only patterns give nothing.
    pub fn filter_extensions(&self) -> Vec<String> {
        self.pattern
            .split(|c: char| c.is_whitespace() || c == '(' || c == ')' || c == ';')
            .filter_map(|token| token.strip_prefix("*."))
            .filter(|ext| !ext.is_empty() && *ext != "*")
            .map(str::to_string)
            .collect()
    }

    pub fn filter_name(&self) -> &str {
        self.pattern
            .split('(')
            .next()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("Files")
    }

    pub fn update_value(&mut self, value: &Value) {
        self.path = match value {
            Value::None => String::new(),
            other => other.to_string(),
        };
    }

    pub fn edit(&mut self, text: String) {
        self.path = text;
    }

    /// Takes the result of a file dialog. A cancelled dialog or an empty
    /// path changes nothing.
    pub fn apply_dialog_result(&mut self, chosen: Option<PathBuf>) -> Option<String> {
        let chosen = chosen?;
        let text = chosen.to_string_lossy().to_string();
        if text.is_empty() {
            return None;
        }
        self.path = text.clone();
        Some(text)
    }
}
