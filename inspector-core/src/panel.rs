use crate::binding::{build, BindingHost, BoundControl};
use crate::control::ControlEdit;
use parameter::{ParamRef, ParameterNode};
use std::rc::Rc;

/// Layout of a property panel: one labelled control per line, or a row of
/// controls laid out side by side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelNode {
    Control(usize),
    Row(Vec<PanelNode>),
}

/// Controls for a parameter tree, bound for as long as the panel is open.
#[derive(Debug, Default)]
pub struct PropertyPanel {
    layout: Vec<PanelNode>,
    bindings: Vec<BoundControl>,
    omitted: usize,
}

impl PropertyPanel {
    pub fn build(nodes: &[ParameterNode], host: &BindingHost) -> Self {
        let mut panel = Self::default();
        panel.layout = panel.build_nodes(nodes, host);
        if panel.omitted > 0 {
            log::debug!("property panel omitted {} parameter(s)", panel.omitted);
        }
        panel
    }

    fn build_nodes(&mut self, nodes: &[ParameterNode], host: &BindingHost) -> Vec<PanelNode> {
        let mut layout = Vec::with_capacity(nodes.len());
        for node in nodes {
            match node {
                ParameterNode::Param(parameter) => match build(parameter, host) {
                    Some(binding) => {
                        self.bindings.push(binding);
                        layout.push(PanelNode::Control(self.bindings.len() - 1));
                    }
                    None => self.omitted += 1,
                },
                ParameterNode::Row(children) => {
                    let row = self.build_nodes(children, host);
                    if !row.is_empty() {
                        layout.push(PanelNode::Row(row));
                    }
                }
            }
        }
        layout
    }

    pub fn layout(&self) -> &[PanelNode] {
        &self.layout
    }

    pub fn bindings(&self) -> &[BoundControl] {
        &self.bindings
    }

    pub fn binding(&self, index: usize) -> Option<&BoundControl> {
        self.bindings.get(index)
    }

    pub fn binding_for(&self, parameter: &ParamRef) -> Option<&BoundControl> {
        self.bindings
            .iter()
            .find(|b| Rc::ptr_eq(b.parameter(), parameter))
    }

    pub fn binding_named(&self, name: &str) -> Option<&BoundControl> {
        self.bindings.iter().find(|b| b.parameter().name() == name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Parameters that got no control.
    pub fn omitted(&self) -> usize {
        self.omitted
    }

    pub fn apply(&self, index: usize, edit: ControlEdit) -> bool {
        match self.bindings.get(index) {
            Some(binding) => binding.apply(edit),
            None => false,
        }
    }

    /// Detaches every control from its parameter, then drops the controls.
    /// Parameters outlive the panel and may be modified afterwards.
    pub fn close(&mut self) {
        for binding in &mut self.bindings {
            binding.detach();
        }
        self.bindings.clear();
        self.layout.clear();
    }
}

impl Drop for PropertyPanel {
    fn drop(&mut self) {
        self.close();
    }
}
