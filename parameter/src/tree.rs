use crate::ParamRef;

/// A parameter layout: single parameters stack vertically, a `Row` groups its
/// children horizontally and may nest further rows.
#[derive(Debug, Clone)]
pub enum ParameterNode {
    Param(ParamRef),
    Row(Vec<ParameterNode>),
}

impl ParameterNode {
    pub fn row(children: impl IntoIterator<Item = ParameterNode>) -> Self {
        ParameterNode::Row(children.into_iter().collect())
    }
}

impl From<ParamRef> for ParameterNode {
    fn from(value: ParamRef) -> Self {
        ParameterNode::Param(value)
    }
}

/// All parameters of a tree in depth-first order.
pub fn flatten(nodes: &[ParameterNode]) -> Vec<ParamRef> {
    let mut out = Vec::new();
    collect(nodes, &mut out);
    out
}

fn collect(nodes: &[ParameterNode], out: &mut Vec<ParamRef>) {
    for node in nodes {
        match node {
            ParameterNode::Param(p) => out.push(p.clone()),
            ParameterNode::Row(children) => collect(children, out),
        }
    }
}

pub fn find_by_name(nodes: &[ParameterNode], name: &str) -> Option<ParamRef> {
    flatten(nodes).into_iter().find(|p| p.name() == name)
}
