use inspector_core::{
    CollectionManager, ConstructionError, CreationArgs, Item, ItemRegistry, ManagerError,
    ManagerSettings, Outcome,
};
use parameter::{Choice, NumberSpec, Parameter, ParameterNode, Value};
use std::cell::RefCell;
use std::rc::Rc;

fn widget(args: &CreationArgs) -> Result<Item, ConstructionError> {
    Ok(Item::new(
        args.name_or("Widget"),
        vec![
            ParameterNode::Param(
                Parameter::number("Width", 10.0, NumberSpec::range(0.0, 100.0).with_step(0.5))
                    .into_ref(),
            ),
            ParameterNode::row([
                ParameterNode::Param(Parameter::checkbox("Visible", true).into_ref()),
                ParameterNode::Param(
                    Parameter::choice(
                        "Color",
                        vec![Choice::plain("red"), Choice::plain("blue")],
                        Some(Value::from("red")),
                    )
                    .into_ref(),
                ),
            ]),
        ],
    ))
}

fn camera(args: &CreationArgs) -> Result<Item, ConstructionError> {
    Ok(Item::new(
        args.name_or("Camera"),
        vec![ParameterNode::Param(
            Parameter::text("Address", "10.0.0.1").into_ref(),
        )],
    ))
}

fn registry() -> ItemRegistry {
    let mut registry = ItemRegistry::new();
    registry.register("Widget", "Widget", widget);
    registry
}

fn two_types() -> ItemRegistry {
    let mut registry = registry();
    registry.register("Camera", "Camera", camera);
    registry
}

fn manager() -> CollectionManager {
    CollectionManager::new(registry(), ManagerSettings::default())
}

#[test]
fn adding_same_default_name_twice_suffixes() {
    let mut manager = manager();
    manager.add(None, None).expect("first");
    manager.add(None, None).expect("second");
    manager.add(None, None).expect("third");
    assert_eq!(manager.names(), ["Widget", "Widget - 1", "Widget - 2"]);
    assert_eq!(manager.current_index(), Some(2));
}

#[test]
fn existing_item_is_reused_when_configured() {
    let settings = ManagerSettings {
        add_existing_items: false,
        ..ManagerSettings::default()
    };
    let mut manager = CollectionManager::new(registry(), settings);
    manager.add(None, None).expect("first");
    manager.add(None, Some("Other")).expect("other");
    let row = manager.add(None, None).expect("again");
    assert_eq!(row, 0);
    assert_eq!(manager.len(), 2);
    assert_eq!(manager.current_index(), Some(0));
}

#[test]
fn duplicate_names_allowed_without_forcing() {
    let settings = ManagerSettings {
        force_unique_names: false,
        ..ManagerSettings::default()
    };
    let mut manager = CollectionManager::new(registry(), settings);
    manager.add(None, None).expect("first");
    manager.add(None, None).expect("second");
    assert_eq!(manager.names(), ["Widget", "Widget"]);
}

#[test]
fn selection_rebuilds_panel_and_notifies() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    let mut manager = manager();
    manager.set_on_select(move |row, item| log.borrow_mut().push((row, item.name())));
    manager.add(None, Some("a")).expect("a");
    manager.add(None, Some("b")).expect("b");

    let width_a = manager
        .model()
        .get(0)
        .and_then(|item| item.parameter("Width"))
        .expect("width");
    assert!(!width_a.has_view());

    assert!(manager.select(0));
    assert!(width_a.has_view());
    let panel = manager.panel().expect("panel");
    assert_eq!(panel.bindings()[0].label(), "Name");
    assert_eq!(
        *seen.borrow(),
        [(0, "a".to_string()), (1, "b".to_string()), (0, "a".to_string())]
    );
    assert!(!manager.select(7));
}

#[test]
fn unknown_type_key_fails_without_partial_state() {
    let mut manager = manager();
    let err = manager.add(Some("Gadget"), None).unwrap_err();
    assert!(matches!(err, ManagerError::UnknownKey(_)));
    assert!(manager.is_empty());

    let mut failing = ItemRegistry::new();
    failing.register("Broken", "Broken", |_: &CreationArgs| {
        Err(ConstructionError::from("bad arguments"))
    });
    let mut manager = CollectionManager::new(failing, ManagerSettings::default());
    let err = manager.add(None, None).unwrap_err();
    assert!(matches!(err, ManagerError::Construction { .. }));
    assert!(manager.is_empty());

    let mut empty = CollectionManager::new(ItemRegistry::new(), ManagerSettings::default());
    assert!(matches!(empty.add(None, None), Err(ManagerError::NoItemTypes)));
}

#[test]
fn type_selector_picks_type_and_default_name() {
    let mut manager = CollectionManager::new(two_types(), ManagerSettings::default());
    assert!(manager.has_type_selector());
    assert!(manager.select_type("Camera"));
    let row = manager.add(None, None).expect("camera");
    let item = manager.model().get(row).expect("item");
    assert_eq!(item.type_name(), "Camera");
    assert_eq!(item.name(), "Camera");
    assert!(!manager.select_type("Gadget"));
}

#[test]
fn search_resolves_generated_name_then_creates() {
    let mut manager = CollectionManager::new(two_types(), ManagerSettings::default())
        .with_name_generator(|key, n| (key == "Camera").then(|| format!("Cam-{n:02}")));
    manager.select_type("Camera");

    let row = manager.search("7").expect("search").expect("row");
    assert_eq!(manager.names(), ["Cam-07"]);
    assert_eq!(manager.current_index(), Some(row));
    assert_eq!(manager.current_item().map(Item::type_name), Some("Camera"));

    let again = manager.search(" 7 ").expect("search").expect("row");
    assert_eq!(again, row);
    assert_eq!(manager.len(), 1);

    let literal = manager.search("Lobby").expect("search").expect("row");
    assert_eq!(manager.names(), ["Cam-07", "Lobby"]);
    assert_eq!(manager.current_index(), Some(literal));
    assert_eq!(manager.search("   ").expect("blank"), None);
}

#[test]
fn duplicate_copies_values_and_type() {
    let mut manager = manager();
    manager.add(None, Some("Base")).expect("base");
    let width = manager
        .model()
        .get(0)
        .and_then(|item| item.parameter("Width"))
        .expect("width");
    width.set_value(42.5);

    let row = manager.duplicate(0).expect("duplicate");
    let copy = manager.model().get(row).expect("copy");
    assert_eq!(copy.name(), "Base - 1");
    assert_eq!(copy.type_name(), "Widget");
    assert_eq!(copy.parameter("Width").map(|p| p.value()), Some(Value::Number(42.5)));
    assert!(!Rc::ptr_eq(&copy.parameter("Width").expect("width"), &width));
    assert_eq!(manager.current_index(), Some(row));
    assert!(matches!(manager.duplicate(9), Err(ManagerError::NoSuchRow(9))));
}

#[test]
fn remove_current_tears_down_panel() {
    let mut manager = manager();
    manager.add(None, Some("a")).expect("a");
    manager.add(None, Some("b")).expect("b");
    let name_b = manager.current_item().expect("b").name_parameter().clone();
    assert!(name_b.has_view());

    assert!(manager.remove());
    assert_eq!(manager.names(), ["a"]);
    assert_eq!(manager.current_index(), None);
    assert!(manager.panel().is_none());
    assert!(!name_b.has_view());
    assert!(!manager.remove());
}

#[test]
fn remove_row_before_current_shifts_selection() {
    let mut manager = manager();
    for name in ["a", "b", "c"] {
        manager.add(None, Some(name)).expect("add");
    }
    assert!(manager.remove_row(0));
    assert_eq!(manager.current_index(), Some(1));
    assert_eq!(manager.current_item().map(Item::name), Some("c".to_string()));
    assert!(!manager.remove_row(5));
}

#[test]
fn move_keeps_current_item() {
    let mut manager = manager();
    for name in ["a", "b", "c"] {
        manager.add(None, Some(name)).expect("add");
    }
    manager.select(0);
    assert!(manager.move_item(0, 2));
    assert_eq!(manager.names(), ["b", "c", "a"]);
    assert_eq!(manager.current_item().map(Item::name), Some("a".to_string()));

    assert!(manager.move_item(2, 0));
    assert_eq!(manager.current_index(), Some(0));
}

#[test]
fn checked_items_are_independent_of_selection() {
    let mut manager = manager();
    for name in ["a", "b", "c"] {
        manager.add(None, Some(name)).expect("add");
    }
    manager.model_mut().toggle_checked(0);
    manager.model_mut().toggle_checked(2);
    let checked: Vec<_> = manager.checked_items().iter().map(|i| i.name()).collect();
    assert_eq!(checked, ["a", "c"]);
    assert_eq!(manager.current_index(), Some(2));
}

#[test]
fn save_then_load_round_trips_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("items.json");

    let mut source = CollectionManager::new(two_types(), ManagerSettings::default());
    source.add(Some("Widget"), Some("first")).expect("first");
    source.add(Some("Camera"), Some("second")).expect("second");
    source.add(Some("Widget"), Some("third")).expect("third");
    let third = source.model().get(2).expect("third");
    third.parameter("Width").expect("width").set_value(7.5);
    third.parameter("Visible").expect("visible").set_value(false);
    third.parameter("Color").expect("color").set_value("blue");

    let saved = source.save(Some(&path)).expect("save");
    assert_eq!(saved, Outcome::Done(3));

    let mut target = CollectionManager::new(two_types(), ManagerSettings::default());
    let report = target.load(Some(&path)).expect("load").done().expect("report");
    assert_eq!(report.loaded, 3);
    assert!(report.skipped.is_empty());
    assert_eq!(target.records(), source.records());
    assert_eq!(target.names(), ["first", "second", "third"]);
    let loaded = target.model().get(2).expect("third");
    assert_eq!(loaded.parameter("Color").map(|p| p.value_string()), Some("blue".to_string()));
}

#[test]
fn load_skips_unknown_types_and_keeps_names_unique() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("items.json");
    std::fs::write(
        &path,
        r#"[
            {"type": "Widget", "name": "w", "parameters": [{"type": "number", "name": "Width", "value": 3}]},
            {"type": "Gadget", "name": "g"},
            {"name": "no type"},
            {"type": "Widget", "name": "w"}
        ]"#,
    )
    .expect("write");

    let mut manager = manager();
    let report = manager.load(Some(&path)).expect("load").done().expect("report");
    assert_eq!(report.loaded, 2);
    let skipped: Vec<_> = report.skipped.iter().map(|s| s.index).collect();
    assert_eq!(skipped, [1, 2]);
    assert_eq!(report.skipped[0].type_name.as_deref(), Some("Gadget"));
    assert_eq!(manager.names(), ["w", "w - 1"]);
    assert_eq!(
        manager.model().get(0).and_then(|i| i.parameter("Width")).map(|p| p.value()),
        Some(Value::Number(3.0))
    );
}

#[test]
fn cancelled_save_and_load_do_nothing() {
    let mut manager = manager();
    manager.add(None, None).expect("add");
    assert!(manager.save(None).expect("save").is_cancelled());
    assert!(manager
        .save(Some(std::path::Path::new("")))
        .expect("save")
        .is_cancelled());
    assert!(manager.load(None).expect("load").is_cancelled());
    assert_eq!(manager.len(), 1);
}

#[test]
fn load_of_missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut manager = manager();
    let err = manager
        .load(Some(&dir.path().join("missing.json")))
        .unwrap_err();
    assert!(matches!(err, ManagerError::Record(_)));
}

#[test]
fn renaming_through_panel_updates_list_name() {
    let mut manager = manager();
    manager.add(None, None).expect("add");
    let panel = manager.panel().expect("panel");
    panel.apply(0, inspector_core::ControlEdit::Text("Renamed".into()));
    panel.apply(0, inspector_core::ControlEdit::FinishText);
    assert_eq!(manager.names(), ["Renamed"]);
}
