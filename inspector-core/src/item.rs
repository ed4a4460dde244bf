use parameter::{find_by_name, flatten, ParamRef, Parameter, ParameterError, ParameterNode};
use records::{ItemRecord, ParameterRecord};

pub const NAME_PARAMETER: &str = "Name";

/// A named collection element with its parameter tree.
#[derive(Debug)]
pub struct Item {
    type_name: String,
    name: ParamRef,
    parameters: Vec<ParameterNode>,
    checked: bool,
}

impl Item {
    pub fn new(name: impl Into<String>, parameters: Vec<ParameterNode>) -> Self {
        Self {
            type_name: String::new(),
            name: Parameter::text(NAME_PARAMETER, name).into_ref(),
            parameters,
            checked: false,
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub(crate) fn set_type_name(&mut self, type_name: &str) {
        self.type_name = type_name.to_string();
    }

    pub fn name(&self) -> String {
        self.name.value_string()
    }

    pub fn name_parameter(&self) -> &ParamRef {
        &self.name
    }

    /// Renames through the name parameter so a bound name field follows.
    pub fn rename(&self, name: &str) {
        self.name.set_value(name);
    }

    pub fn parameters(&self) -> &[ParameterNode] {
        &self.parameters
    }

    /// The tree shown in a property panel: the name first, then the
    /// item's own parameters.
    pub fn panel_nodes(&self) -> Vec<ParameterNode> {
        let mut nodes = Vec::with_capacity(self.parameters.len() + 1);
        nodes.push(ParameterNode::Param(self.name.clone()));
        nodes.extend(self.parameters.iter().cloned());
        nodes
    }

    pub fn parameter(&self, name: &str) -> Option<ParamRef> {
        find_by_name(&self.parameters, name)
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn to_record(&self) -> ItemRecord {
        ItemRecord {
            type_name: self.type_name.clone(),
            name: self.name(),
            parameters: flatten(&self.parameters)
                .iter()
                .map(|p| ParameterRecord {
                    kind: p.kind().as_str().to_string(),
                    name: p.name().to_string(),
                    value: p.to_json(),
                })
                .collect(),
        }
    }

    /// Restores saved parameter values by name without notifying anyone.
    /// Unknown names and unusable values are returned, the rest applied.
    pub fn restore_parameters(&self, saved: &[ParameterRecord]) -> Vec<RestoreIssue> {
        let mut issues = Vec::new();
        for record in saved {
            match self.parameter(&record.name) {
                Some(parameter) => {
                    if let Err(err) = parameter.restore(&record.value) {
                        issues.push(RestoreIssue::Invalid(err));
                    }
                }
                None => issues.push(RestoreIssue::Unknown(record.name.clone())),
            }
        }
        issues
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RestoreIssue {
    #[error("no parameter named '{0}'")]
    Unknown(String),
    #[error(transparent)]
    Invalid(ParameterError),
}
