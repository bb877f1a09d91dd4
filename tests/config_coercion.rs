//! Integration tests for configuration reading and coercion.

mod common;

use common::{dict, write_fixture, HELIX_INI};
use helix_maps::config::{coerce_configuration_with, ConfigDocument, MapEnv};
use helix_maps::{
    coerce_configuration, ConfigError, ConfigLoader, ConfigSource, Dict, IniDocument, MapsError,
    Value,
};
use pretty_assertions::assert_eq;
use serial_test::serial;

fn test_env() -> MapEnv {
    MapEnv::new().with("HELIX_TEST_ROOT", "/srv/helix")
}

#[test]
fn sections_coerce_to_typed_values() {
    let doc = IniDocument::parse(HELIX_INI).unwrap();
    let result = coerce_configuration_with(ConfigSource::Sections(&doc), true, &test_env()).unwrap();
    let settings = result.as_maps().unwrap();

    assert_eq!(settings.get_path("window.title").unwrap(), Value::from("Helix"));
    assert_eq!(settings.get_path("window.width").unwrap(), Value::Int(1280));
    assert_eq!(settings.get_path("window.maximized").unwrap(), Value::Bool(true));
    assert_eq!(settings.get_path("window.scale").unwrap(), Value::Float(1.25));
    assert_eq!(settings.get_path("training.epochs").unwrap(), Value::Int(30));
    assert_eq!(
        settings.get_path("training.classes").unwrap(),
        Value::List(vec![Value::from("cell"), Value::from("nucleus")])
    );
    assert_eq!(
        settings.get_path("training.split").unwrap(),
        Value::Tuple(vec![Value::Float(0.8), Value::Float(0.2)])
    );
    assert_eq!(
        settings.get_path("training.augment.rotate").unwrap(),
        Value::Int(15)
    );
}

#[test]
fn environment_and_interpolation_combine() {
    let doc = IniDocument::parse(HELIX_INI).unwrap();
    let plain = coerce_configuration_with(ConfigSource::Sections(&doc), false, &test_env()).unwrap();
    let paths = plain
        .as_dict()
        .and_then(|d| d.get("paths"))
        .and_then(|p| p.as_dict().cloned())
        .unwrap();

    assert_eq!(paths.get("datasets"), Some(Value::from("/srv/helix/datasets")));
    assert_eq!(paths.get("models"), Some(Value::from("/srv/helix/models")));
    // DEFAULT options are visible in every section.
    assert_eq!(paths.get("workspace"), Some(Value::from("/srv/helix")));
}

#[test]
fn unset_variables_are_left_in_place() {
    let doc = IniDocument::parse(HELIX_INI).unwrap();
    let plain = coerce_configuration_with(ConfigSource::Sections(&doc), false, &MapEnv::new())
        .unwrap();
    let models = plain
        .as_dict()
        .and_then(|d| d.get("paths"))
        .and_then(|p| p.as_dict().and_then(|p| p.get("models")));
    assert_eq!(models, Some(Value::from("&HELIX_TEST_ROOT&/models")));
}

#[test]
#[serial]
fn process_environment_is_used_by_default() {
    std::env::set_var("HELIX_TEST_ROOT", "/from/process");
    let doc = IniDocument::parse("[paths]\nroot = &HELIX_TEST_ROOT&\n").unwrap();
    let result = coerce_configuration(ConfigSource::Sections(&doc), true);
    std::env::remove_var("HELIX_TEST_ROOT");

    let settings = result.unwrap();
    assert_eq!(
        settings.as_maps().unwrap().get_path("paths.root").unwrap(),
        Value::from("/from/process")
    );
}

#[test]
fn plain_dict_flag_and_count() {
    let source = dict(vec![(
        "s1",
        Value::Dict(dict(vec![("flag", "True"), ("count", "5")])),
    )]);
    let result = coerce_configuration(ConfigSource::Value(&Value::Dict(source)), true).unwrap();
    let settings = result.as_maps().unwrap();

    assert_eq!(settings.get_path("s1.flag").unwrap(), Value::Bool(true));
    assert_eq!(settings.get_path("s1.count").unwrap(), Value::Int(5));
}

#[test]
fn cyclic_plain_dict_is_coerced_once() {
    let source = dict(vec![("n", "1")]);
    source.insert("me", Value::Dict(source.clone()));

    let result = coerce_configuration(ConfigSource::Value(&Value::Dict(source.clone())), false)
        .unwrap();
    assert_eq!(source.get("n"), Some(Value::Int(1)));
    assert!(result.as_dict().unwrap().ptr_eq(&source));
}

#[test]
fn non_dict_source_is_rejected() {
    let err = coerce_configuration(ConfigSource::Value(&Value::from("x")), false).unwrap_err();
    assert!(matches!(err, ConfigError::Maps(MapsError::TypeMismatch(_))));
}

#[test]
fn ini_errors_surface() {
    assert!(matches!(
        IniDocument::parse("key = value\n"),
        Err(ConfigError::MissingSectionHeader { line: 1, .. })
    ));
    assert!(matches!(
        IniDocument::parse("[a]\nx = 1\n[a]\n"),
        Err(ConfigError::DuplicateSection { line: 3, .. })
    ));

    let doc = IniDocument::parse("[a]\nx = %(missing)s\n").unwrap();
    assert!(matches!(
        coerce_configuration(ConfigSource::Sections(&doc), false),
        Err(ConfigError::InterpolationMissingOption { .. })
    ));
}

#[test]
fn loader_reads_ini_file() {
    let (_dir, path) = write_fixture("helix.ini", "[run]\nepochs = 12\nname = demo\n");
    let loader = ConfigLoader::load_from(&path).unwrap();
    assert!(matches!(loader.document(), ConfigDocument::Ini(_)));

    let plain = loader.plain().unwrap();
    let expected: Dict = [(
        "run",
        dict(vec![("epochs", Value::Int(12)), ("name", Value::from("demo"))]),
    )]
    .into_iter()
    .collect();
    assert_eq!(plain, expected);
}
