use parameter::{
    flatten, Choice, NumberSpec, Parameter, ParameterError, ParameterNode, Value, ViewRefresh,
};
use chrono::NaiveDate;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
struct Recorder {
    seen: RefCell<Vec<Value>>,
}

impl ViewRefresh for Recorder {
    fn refresh(&self, parameter: &Parameter) {
        self.seen.borrow_mut().push(parameter.value());
    }
}

fn attach(parameter: &Parameter, recorder: &Rc<Recorder>) -> parameter::ViewToken {
    let weak = Rc::downgrade(recorder);
    parameter.attach_view(weak)
}

#[test]
fn external_set_pushes_to_view_and_runs_callback() {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let p = Parameter::text("Label", "a").with_callback(move |_| counter.set(counter.get() + 1));
    let recorder = Rc::new(Recorder::default());
    attach(&p, &recorder);

    p.set_value("b");
    assert_eq!(calls.get(), 1);
    assert_eq!(*recorder.seen.borrow(), vec![Value::from("b")]);

    p.commit_from_view("c");
    assert_eq!(calls.get(), 2);
    assert_eq!(recorder.seen.borrow().len(), 1);
}

#[test]
fn last_registration_wins_and_stale_tokens_do_not_clear() {
    let p = Parameter::checkbox("On", false);
    let first = Rc::new(Recorder::default());
    let second = Rc::new(Recorder::default());
    let stale = attach(&p, &first);
    let current = attach(&p, &second);

    p.set_value(true);
    assert!(first.seen.borrow().is_empty());
    assert_eq!(second.seen.borrow().len(), 1);

    assert!(!p.detach_view(stale));
    assert!(p.has_view());
    assert!(p.detach_view(current));
    assert!(!p.has_view());
}

#[test]
fn dropped_view_is_never_called() {
    let p = Parameter::text("Label", "a");
    let recorder = Rc::new(Recorder::default());
    attach(&p, &recorder);
    drop(recorder);
    p.set_value("b");
    assert_eq!(p.value(), Value::from("b"));
}

#[test]
fn number_normalisation() {
    let p = Parameter::number(
        "Gain",
        0.0,
        NumberSpec::range(0.0, 10.0)
            .with_step(0.5)
            .enforcing_range()
            .enforcing_step(),
    );
    p.set_value(12.0);
    assert_eq!(p.value(), Value::Number(10.0));
    p.set_value(3.7);
    assert_eq!(p.value(), Value::Number(3.5));
}

#[test]
fn slider_without_range_is_disabled() {
    let p = Parameter::number("Free", 1.0, NumberSpec::default().with_slider());
    assert!(!p.number_spec().map(|s| s.slider).unwrap_or(true));
}

#[test]
fn inverted_range_is_swapped_before_clamping() {
    let p = Parameter::number(
        "Gain",
        0.0,
        NumberSpec::range(10.0, 0.0).with_slider().enforcing_range(),
    );
    let spec = p.number_spec().expect("number spec");
    assert_eq!((spec.min, spec.max, spec.slider), (Some(0.0), Some(10.0), false));
    p.set_value(12.0);
    assert_eq!(p.value(), Value::Number(10.0));
}

#[test]
fn repair_drops_non_finite_bounds_and_step() {
    let mut spec = NumberSpec::range(f64::NEG_INFINITY, f64::NAN)
        .with_step(f64::NAN)
        .with_slider();
    let notes = spec.repair();
    assert_eq!((spec.min, spec.max, spec.step, spec.slider), (None, None, 0.0, false));
    assert_eq!(notes.len(), 4);

    let mut valid = NumberSpec::range(0.0, 1.0).with_step(0.1).with_slider();
    assert!(valid.repair().is_empty());
    assert!(valid.slider);
}

#[test]
fn date_renders_through_its_format_and_restores() {
    let installed = NaiveDate::from_ymd_opt(2024, 1, 15)
        .and_then(|d| d.and_hms_opt(9, 5, 0))
        .expect("valid date");
    let p = Parameter::date("Installed", installed, "%d.%m.%Y");
    assert!(!p.is_editable());
    assert_eq!(p.value_string(), "15.01.2024");
    assert_eq!(p.to_json(), serde_json::json!("2024-01-15T09:05:00"));

    p.restore(&serde_json::json!("2023-12-31")).expect("date only");
    assert_eq!(p.formatted_date().as_deref(), Some("31.12.2023"));
    let err = p.restore(&serde_json::json!("yesterday")).unwrap_err();
    assert!(matches!(err, ParameterError::InvalidValue { .. }));
}

#[test]
fn checkbox_coerces_numbers() {
    let p = Parameter::checkbox("On", false);
    p.set_value(2.0);
    assert_eq!(p.value(), Value::Bool(true));
    p.set_value(0.0);
    assert_eq!(p.value(), Value::Bool(false));
}

#[test]
fn choice_selection_and_labels() {
    let p = Parameter::choice(
        "Mode",
        vec![Choice::new("Fast", 1.0), Choice::new("Slow", 2.0)],
        Some(Value::Number(2.0)),
    );
    assert_eq!(p.selected_label().as_deref(), Some("Slow"));
    assert!(p.select_choice(0));
    assert_eq!(p.value(), Value::Number(1.0));
    assert!(!p.select_choice(5));
    assert_eq!(p.to_json(), serde_json::json!("Fast"));
}

#[test]
fn restore_is_silent_and_typed() {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let p = Parameter::number("Gain", 0.0, NumberSpec::default())
        .with_callback(move |_| counter.set(counter.get() + 1));
    p.restore(&serde_json::json!("4.5")).expect("numeric string");
    assert_eq!(p.value(), Value::Number(4.5));
    assert_eq!(calls.get(), 0);

    let err = p.restore(&serde_json::json!([1, 2])).unwrap_err();
    assert!(matches!(err, ParameterError::InvalidValue { .. }));

    let choice = Parameter::choice("Mode", vec![Choice::plain("A")], None);
    let err = choice.restore(&serde_json::json!("Z")).unwrap_err();
    assert!(matches!(err, ParameterError::UnknownChoice { .. }));
}

#[test]
fn ad_hoc_choice_value_does_not_survive_restore() {
    let saved = Parameter::choice(
        "Mode",
        vec![Choice::plain("A"), Choice::plain("B")],
        Some(Value::from("Custom")),
    );
    let json = saved.to_json();
    assert_eq!(json, serde_json::json!("Custom"));

    let fresh = Parameter::choice(
        "Mode",
        vec![Choice::plain("A"), Choice::plain("B")],
        Some(Value::from("B")),
    );
    let err = fresh.restore(&json).unwrap_err();
    assert!(matches!(err, ParameterError::UnknownChoice { .. }));
    assert_eq!(fresh.value(), Value::from("B"));
}

#[test]
fn tree_flattens_depth_first() {
    let a = Parameter::text("a", "").into_ref();
    let b = Parameter::text("b", "").into_ref();
    let c = Parameter::text("c", "").into_ref();
    let tree = vec![
        ParameterNode::Param(a),
        ParameterNode::row([ParameterNode::Param(b), ParameterNode::row([ParameterNode::Param(c)])]),
    ];
    let names: Vec<_> = flatten(&tree).iter().map(|p| p.name().to_string()).collect();
    assert_eq!(names, ["a", "b", "c"]);
}

#[test]
fn active_flag_refreshes_only_on_change() {
    let p = Parameter::text("Label", "a");
    let recorder = Rc::new(Recorder::default());
    attach(&p, &recorder);
    p.set_active(true);
    assert!(recorder.seen.borrow().is_empty());
    p.set_active(false);
    assert_eq!(recorder.seen.borrow().len(), 1);
}
