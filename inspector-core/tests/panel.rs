use inspector_core::{BindingHost, ControlEdit, PanelNode, PropertyPanel};
use parameter::{NumberSpec, ParamRef, Parameter, ParameterNode, ParameterSpec, Value};

fn params() -> (ParamRef, ParamRef, ParamRef, ParamRef) {
    (
        Parameter::text("Label", "caption").into_ref(),
        Parameter::number("X", 1.0, NumberSpec::range(0.0, 5.0).with_step(0.5)).into_ref(),
        Parameter::number("Y", 2.0, NumberSpec::range(0.0, 5.0).with_step(0.5)).into_ref(),
        Parameter::new("Bad", ParameterSpec::Checkbox, Value::from("?")).into_ref(),
    )
}

#[test]
fn nested_rows_become_grouped_layout() {
    let (label, x, y, bad) = params();
    let tree = vec![
        ParameterNode::Param(label),
        ParameterNode::row([ParameterNode::Param(x), ParameterNode::Param(y)]),
        ParameterNode::row([ParameterNode::Param(bad)]),
    ];
    let panel = PropertyPanel::build(&tree, &BindingHost::default());

    assert_eq!(panel.len(), 3);
    assert_eq!(panel.omitted(), 1);
    assert_eq!(
        panel.layout(),
        [
            PanelNode::Control(0),
            PanelNode::Row(vec![PanelNode::Control(1), PanelNode::Control(2)]),
        ]
    );
    assert_eq!(panel.binding(2).map(|b| b.label()), Some("Y".to_string()));
}

#[test]
fn close_clears_every_push_target() {
    let (label, x, y, _) = params();
    let tree = vec![
        ParameterNode::Param(label.clone()),
        ParameterNode::row([ParameterNode::Param(x.clone()), ParameterNode::Param(y.clone())]),
    ];
    let mut panel = PropertyPanel::build(&tree, &BindingHost::default());
    assert!(label.has_view() && x.has_view() && y.has_view());

    panel.close();
    assert!(panel.is_empty());
    assert!(!label.has_view() && !x.has_view() && !y.has_view());

    x.set_value(4.0);
    assert_eq!(x.value(), Value::Number(4.0));
}

#[test]
fn dropping_panel_detaches() {
    let (label, ..) = params();
    {
        let _panel = PropertyPanel::build(&[ParameterNode::Param(label.clone())], &BindingHost::default());
        assert!(label.has_view());
    }
    assert!(!label.has_view());
    label.set_value("after");
}

#[test]
fn closing_old_panel_keeps_new_panel_bound() {
    let (label, ..) = params();
    let tree = [ParameterNode::Param(label.clone())];
    let mut old = PropertyPanel::build(&tree, &BindingHost::default());
    let new = PropertyPanel::build(&tree, &BindingHost::default());
    old.close();
    assert!(label.has_view());
    label.set_value("pushed");
    assert_eq!(
        new.binding_for(&label).map(|b| b.displayed_value()),
        Some(Value::from("pushed"))
    );
}

#[test]
fn edits_are_routed_by_index() {
    let (label, x, ..) = params();
    let tree = [ParameterNode::Param(label), ParameterNode::Param(x.clone())];
    let panel = PropertyPanel::build(&tree, &BindingHost::default());
    assert!(panel.apply(1, ControlEdit::Number(3.5)));
    assert_eq!(x.value(), Value::Number(3.5));
    assert!(!panel.apply(9, ControlEdit::Number(1.0)));
    assert!(panel.binding_named("X").is_some());
}
