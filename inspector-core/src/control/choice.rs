/// What a selection in the drop-down resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceSelection {
    Choice(usize),
    /// The ad-hoc entry showing a value that is not among the choices.
    Current,
}

/// Drop-down over a choice parameter's labels. A value outside the list is
/// shown through an extra entry after the choices. That entry only mirrors
/// the parameter: it is not persisted as a choice, and restoring such a
/// value from a record fails with an unknown-choice error, so the item
/// keeps its constructor's selection.
#[derive(Debug, Clone)]
pub struct ChoiceControl {
    label: String,
    choices: Vec<String>,
    extra: Option<String>,
    current: Option<usize>,
    editable: bool,
    rebuilds: usize,
}

impl ChoiceControl {
    pub fn new(
        label: impl Into<String>,
        choices: Vec<String>,
        current: Option<&str>,
        editable: bool,
    ) -> Self {
        let mut control = Self {
            label: label.into(),
            choices,
            extra: None,
            current: None,
            editable,
            rebuilds: 0,
        };
        control.update_value(current);
        control
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    /// Entries as shown, including an ad-hoc entry for an unknown value.
    pub fn entries(&self) -> Vec<&str> {
        self.choices
            .iter()
            .chain(self.extra.iter())
            .map(String::as_str)
            .collect()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_label(&self) -> Option<&str> {
        let index = self.current?;
        self.choices
            .get(index)
            .or(self.extra.as_ref())
            .map(String::as_str)
    }

    /// Number of times the entry list was rebuilt after construction.
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }

    /// Rebuilds the entry list only when it differs position by position
    /// (a length change counts as a difference). Returns whether it did.
    pub fn update_choices(&mut self, choices: Vec<String>) -> bool {
        let differs = self.choices.len() != choices.len()
            || self.choices.iter().zip(&choices).any(|(a, b)| a != b);
        if !differs {
            return false;
        }
        let current = self.current_label().map(str::to_string);
        self.choices = choices;
        self.extra = None;
        self.rebuilds += 1;
        self.update_value(current.as_deref());
        true
    }

    /// Shows `label` as the selection, appending it as an ad-hoc entry when
    /// it is not one of the choices.
    pub fn update_value(&mut self, label: Option<&str>) {
        let Some(label) = label else {
            self.current = None;
            self.extra = None;
            return;
        };
        match self.choices.iter().position(|c| c == label) {
            Some(index) => {
                self.current = Some(index);
                self.extra = None;
            }
            None => {
                self.extra = Some(label.to_string());
                self.current = Some(self.choices.len());
            }
        }
    }

    /// User picked entry `index`.
    pub fn select(&mut self, index: usize) -> Option<ChoiceSelection> {
        if index < self.choices.len() {
            self.current = Some(index);
            Some(ChoiceSelection::Choice(index))
        } else if index == self.choices.len() && self.extra.is_some() {
            self.current = Some(index);
            Some(ChoiceSelection::Current)
        } else {
            None
        }
    }
}
