use parameter::{format_value, Value};

#[derive(Debug, Clone)]
pub struct TextControl {
    label: String,
    text: String,
    format: String,
    editable: bool,
    editing: bool,
}

impl TextControl {
    pub fn new(label: impl Into<String>, format: impl Into<String>, value: &Value, editable: bool) -> Self {
        let mut control = Self {
            label: label.into(),
            text: String::new(),
            format: format.into(),
            editable,
            editing: false,
        };
        control.update_value(value);
        control
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Renders `value` through the display format. An empty value leaves
    /// the current text alone.
    pub fn update_value(&mut self, value: &Value) {
        if value.is_none() {
            return;
        }
        self.text = format_value(&self.format, value);
        self.editing = false;
    }

    pub fn edit(&mut self, text: String) {
        self.text = text;
        self.editing = true;
    }

    pub fn finish(&mut self) {
        self.editing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequences_are_formatted_per_element() {
        let value = Value::List(vec![Value::Number(1.0), Value::Number(2.0)]);
        let control = TextControl::new("Ids", "{}, ", &value, false);
        assert_eq!(control.text(), "1, 2, ");
    }

    #[test]
    fn empty_value_keeps_text() {
        let mut control = TextControl::new("Name", "{}", &Value::from("cam"), true);
        control.update_value(&Value::None);
        assert_eq!(control.text(), "cam");
    }
}
