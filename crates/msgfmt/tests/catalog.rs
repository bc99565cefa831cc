//! Integration tests for the resource catalog.

use std::fs;

use msgfmt::model::{Entry, PatternElement, Resource};
use msgfmt::{FormatError, FunctionKind, LoadError, Message, MessageFormat, Runtime, scope};
use tempfile::TempDir;

const FINNISH: &str = r#"{
    "id": "res",
    "locale": "fi",
    "entries": {
        "browser": {
            "entries": {
                "firefox": {
                    "entries": {
                        "nominative": { "value": ["Firefox"] },
                        "genitive": { "value": ["Firefoxin"] }
                    }
                }
            }
        },
        "settings": {
            "value": [
                { "msg_path": ["browser", { "var_path": ["browser-id"] }, "genitive"] },
                " asetukset"
            ]
        },
        "items": {
            "value": {
                "select": [{ "value": { "var_path": ["count"] } }],
                "cases": [
                    { "key": [0], "value": ["ei kohteita"] },
                    { "key": ["one"], "value": [{ "var_path": ["count"] }, " kohde"] },
                    { "key": ["other"], "value": [{ "var_path": ["count"] }, " kohdetta"] }
                ]
            }
        }
    }
}"#;

#[test]
fn load_from_string_and_format() {
    let mut mf = MessageFormat::builder()
        .locales(vec!["fi".to_string()])
        .build();
    let id = mf.load_resource_str(FINNISH).unwrap();
    assert_eq!(id, "res");
    assert_eq!(mf.resource_ids(), ["res"]);

    assert_eq!(
        mf.format("res", &["settings"], scope! { "browser-id" => "firefox" })
            .unwrap(),
        "Firefoxin asetukset"
    );
    assert_eq!(mf.format("res", &["items"], scope! { "count" => 0 }).unwrap(), "ei kohteita");
    assert_eq!(mf.format("res", &["items"], scope! { "count" => 1 }).unwrap(), "1 kohde");
    assert_eq!(mf.format("res", &["items"], scope! { "count" => 4 }).unwrap(), "4 kohdetta");
}

#[test]
fn load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fi.json");
    fs::write(&path, FINNISH).unwrap();

    let mut mf = MessageFormat::new();
    assert_eq!(mf.load_resource(&path).unwrap(), "res");
    assert_eq!(
        mf.resource("res").unwrap().message_paths(),
        [
            "browser.firefox.genitive",
            "browser.firefox.nominative",
            "items",
            "settings",
        ]
    );
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.json");
    let err = MessageFormat::new().load_resource(&path).unwrap_err();
    assert!(matches!(err, LoadError::Io { path: ref p, .. } if *p == path));
}

#[test]
fn syntax_error_reports_location() {
    let mut mf = MessageFormat::new();
    let err = mf
        .load_resource_str("{\n  \"id\": \"res\",\n  \"locale\": \"en\",\n  \"entries\": {,}\n}")
        .unwrap_err();
    let LoadError::Parse {
        path, line, column, ..
    } = &err
    else {
        panic!("expected parse error, got {err:?}");
    };
    assert_eq!(path.to_str(), Some("<string>"));
    assert_eq!(*line, 4);
    assert!(*column > 0);
    assert!(err.to_string().starts_with("<string>:4:"));
    assert!(mf.resource_ids().is_empty());
}

#[test]
fn shape_error_is_parse_error() {
    let mut mf = MessageFormat::new();
    let err = mf
        .load_resource_str(r#"{ "id": "res", "locale": "en", "entries": { "m": { "value": 5 } } }"#)
        .unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
}

#[test]
fn loading_same_id_replaces_resource() {
    let mut mf = MessageFormat::new();
    mf.load_resource_str(r#"{ "id": "res", "locale": "en", "entries": { "a": { "value": ["first"] } } }"#)
        .unwrap();
    mf.load_resource_str(r#"{ "id": "res", "locale": "en", "entries": { "b": { "value": ["second"] } } }"#)
        .unwrap();

    assert_eq!(mf.resource_ids(), ["res"]);
    assert!(mf.get_entry("res", &["a"]).is_none());
    assert_eq!(mf.format("res", &["b"], scope! {}).unwrap(), "second");
}

#[test]
fn add_resource_returns_replaced() {
    let mut mf = MessageFormat::new();
    assert!(mf.add_resource(Resource::new("res", "en")).is_none());
    let previous = mf.add_resource(Resource::new("res", "fi")).unwrap();
    assert_eq!(previous.locale, "en");
    assert_eq!(mf.resource("res").unwrap().locale, "fi");
}

#[test]
fn get_entry_distinguishes_groups_and_messages() {
    let mut mf = MessageFormat::new();
    mf.load_resource_str(FINNISH).unwrap();

    assert!(matches!(mf.get_entry("res", &["browser"]), Some(Entry::Group(_))));
    assert!(matches!(
        mf.get_entry("res", &["browser", "firefox", "genitive"]),
        Some(Entry::Message(_))
    ));
    assert!(mf.get_entry("res", &["browser", "opera"]).is_none());
    assert!(mf.get_entry("res", &["settings", "deeper"]).is_none());
    assert!(mf.get_entry("other", &["settings"]).is_none());
    assert!(mf.get_entry::<&str>("res", &[]).is_none());
}

#[test]
fn formatting_missing_message_is_an_error() {
    let mut mf = MessageFormat::new();
    mf.load_resource_str(FINNISH).unwrap();

    assert_eq!(
        mf.format("res", &["nope"], scope! {}).unwrap_err(),
        FormatError::MessageNotFound {
            resource: "res".to_string(),
            path: "nope".to_string(),
        }
    );
    // Groups are not messages
    assert!(mf.format("res", &["browser"], scope! {}).is_err());
    assert!(mf.format_to_parts("other", &["settings"], scope! {}).is_err());
}

#[test]
fn locales_and_runtime_are_configurable() {
    let mut mf = MessageFormat::builder()
        .runtime(Runtime::new().with_format("shout", |_, _, args| {
            Ok(args.first().map(|a| a.to_string().to_uppercase()).unwrap_or_default().into())
        }))
        .build();
    assert_eq!(mf.locales(), ["en".to_string()]);
    mf.set_locales(vec!["fi".to_string(), "en".to_string()]);
    assert_eq!(mf.locales().len(), 2);

    mf.add_resource(Resource::new("res", "en").with_entry(
        "m",
        Message::pattern([PatternElement::function("shout", [PatternElement::literal("hi")])]),
    ));
    assert_eq!(mf.format("res", &["m"], scope! {}).unwrap(), "HI");

    mf.runtime_mut()
        .register(FunctionKind::Format, "shout", |_, _, _| Ok("quiet".into()));
    assert_eq!(mf.format("res", &["m"], scope! {}).unwrap(), "quiet");
}

#[test]
fn resources_serialize_back_to_the_same_tree() {
    let mut mf = MessageFormat::new();
    mf.load_resource_str(FINNISH).unwrap();
    let resource = mf.resource("res").unwrap();
    let json = serde_json::to_string(resource).unwrap();
    let reparsed: Resource = serde_json::from_str(&json).unwrap();
    assert_eq!(&reparsed, resource);
}
