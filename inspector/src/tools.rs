//! Demo tool types offered by the inspector.

use inspector_core::{
    CollectionManager, ConstructionError, CreationArgs, Item, ItemRegistry, ManagerError,
    ManagerSettings,
};
use parameter::{
    Choice, FileMode, ImageSource, NumberSpec, Parameter, ParameterNode, ParameterSpec, Value,
    DEFAULT_FILE_PATTERN, DEFAULT_IMAGE_HEIGHT,
};
use chrono::NaiveDate;
use std::path::PathBuf;

pub const WIDGET: &str = "Widget";
pub const CAMERA: &str = "Camera";

pub fn registry() -> ItemRegistry {
    let mut registry = ItemRegistry::new();
    registry
        .register(WIDGET, WIDGET, widget)
        .register(CAMERA, CAMERA, camera);
    registry
}

/// Cameras are addressed by number: `7` names `Cam-07`.
pub fn camera_name(key: &str, number: i64) -> Option<String> {
    (key == CAMERA && number >= 0).then(|| format!("Cam-{number:02}"))
}

pub fn manager(settings: ManagerSettings) -> CollectionManager {
    CollectionManager::new(registry(), settings).with_name_generator(camera_name)
}

pub fn populate_demo(manager: &mut CollectionManager) -> Result<(), ManagerError> {
    manager.add(Some(WIDGET), None)?;
    manager.add(Some(WIDGET), None)?;
    manager.add(Some(CAMERA), Some("Cam-01"))?;
    manager.select(0);
    Ok(())
}

fn widget(args: &CreationArgs) -> Result<Item, ConstructionError> {
    let width = Parameter::number(
        "Width",
        10.0,
        NumberSpec::range(0.0, 100.0)
            .with_step(0.5)
            .with_slider()
            .enforcing_range(),
    )
    .into_ref();
    let progress = Parameter::progress("Progress", 0.0, 0.0, 100.0).into_ref();

    let reset = {
        let width = width.clone();
        let progress = progress.clone();
        Parameter::action("Reset", move |_| {
            width.set_value(10.0);
            progress.update_progress(0.0, 0.0, 100.0);
        })
        .into_ref()
    };
    let advance = {
        let progress = progress.clone();
        Parameter::action("Advance", move |_| {
            let next = progress.value().as_f64().unwrap_or(0.0) + 10.0;
            progress.update_progress(next.min(100.0), 0.0, 100.0);
        })
        .into_ref()
    };

    Ok(Item::new(
        args.name_or(WIDGET),
        vec![
            width.into(),
            ParameterNode::row([
                ParameterNode::Param(
                    Parameter::number("X", 0.0, NumberSpec::default().with_step(1.0)).into_ref(),
                ),
                ParameterNode::Param(
                    Parameter::number("Y", 0.0, NumberSpec::default().with_step(1.0)).into_ref(),
                ),
            ]),
            Parameter::checkbox("Visible", true).into_ref().into(),
            Parameter::choice(
                "Color",
                vec![
                    Choice::plain("red"),
                    Choice::plain("green"),
                    Choice::plain("blue"),
                ],
                Some(Value::from("red")),
            )
            .into_ref()
            .into(),
            Parameter::new(
                "Tags",
                ParameterSpec::Text {
                    format: "#{} ".to_string(),
                },
                Value::List(vec![Value::from("demo"), Value::from("bench")]),
            )
            .read_only()
            .into_ref()
            .into(),
            Parameter::file("Log file", "", FileMode::Save, DEFAULT_FILE_PATTERN)
                .into_ref()
                .into(),
            progress.into(),
            ParameterNode::row([ParameterNode::Param(reset), ParameterNode::Param(advance)]),
        ],
    ))
}

fn camera(args: &CreationArgs) -> Result<Item, ConstructionError> {
    let address = args
        .options
        .get("address")
        .and_then(|v| v.as_str())
        .unwrap_or("192.168.0.10");
    if address.is_empty() {
        return Err(ConstructionError::from("camera address must not be empty"));
    }
    let installed = NaiveDate::from_ymd_opt(2024, 1, 15)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    let preview = Parameter::image("Preview", None, DEFAULT_IMAGE_HEIGHT).into_ref();
    let snapshot = {
        let preview = preview.clone();
        Parameter::file("Snapshot", "", FileMode::Open, "Images (*.png *.jpg *.jpeg)")
            .with_callback(move |p| {
                let path = p.value().to_string();
                if !path.is_empty() {
                    preview.set_value(Value::Image(ImageSource::Path(PathBuf::from(path))));
                }
            })
            .into_ref()
    };

    Ok(Item::new(
        args.name_or(CAMERA),
        vec![
            Parameter::text("Address", address).into_ref().into(),
            Parameter::number(
                "Exposure",
                0.01,
                NumberSpec::range(0.0, 1.0).with_step(0.001).with_slider(),
            )
            .into_ref()
            .into(),
            Parameter::choice(
                "Mode",
                vec![Choice::new("Auto", 0.0), Choice::new("Manual", 1.0)],
                Some(Value::Number(0.0)),
            )
            .into_ref()
            .into(),
            Parameter::date("Installed", installed, "%Y-%m-%d")
                .into_ref()
                .into(),
            snapshot.into(),
            preview.into(),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_names_are_zero_padded() {
        assert_eq!(camera_name(CAMERA, 7).as_deref(), Some("Cam-07"));
        assert_eq!(camera_name(CAMERA, 123).as_deref(), Some("Cam-123"));
        assert_eq!(camera_name(WIDGET, 7), None);
    }

    #[test]
    fn demo_collection_has_unique_names() {
        let mut manager = manager(ManagerSettings::default());
        populate_demo(&mut manager).expect("demo");
        assert_eq!(manager.names(), ["Widget", "Widget - 1", "Cam-01"]);
        assert_eq!(manager.current_index(), Some(0));
    }

    #[test]
    fn reset_action_pushes_defaults() {
        let item = widget(&CreationArgs::default()).expect("widget");
        let width = item.parameter("Width").expect("width");
        width.set_value(55.0);
        item.parameter("Reset").expect("reset").trigger();
        assert_eq!(width.value(), Value::Number(10.0));
    }

    #[test]
    fn empty_camera_address_fails() {
        let mut args = CreationArgs::default();
        args.options
            .insert("address".to_string(), serde_json::Value::String(String::new()));
        assert!(camera(&args).is_err());
    }
}
