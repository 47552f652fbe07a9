//! Preset persistence round-trips

mod common;

use common::TestWorkspace;
use packaroo::PresetStore;
use packaroo::packager::{ConfigurationBuilder, OutputFormat, PackageConfiguration, TargetPlatform};
use packaroo::presets::{default_configuration, load_from_file, save_to_file};

fn full_configuration() -> PackageConfiguration {
    ConfigurationBuilder::new()
        .archive("/apps/libs/shop-1.4.0.jar")
        .app_name("Acme Shop")
        .version("1.4.0")
        .main_class("com.acme.shop.Main")
        .icon("/apps/icons/shop.png")
        .output_directory("/apps/dist")
        .target_platform(TargetPlatform::Linux)
        .output_format(OutputFormat::Rpm)
        .minimize_runtime(true)
        .modules(["java.sql", "java.base", "javafx.controls"])
        .runtime_option("-Xmx1g")
        .runtime_option("-Dshop.mode=prod")
        .app_argument("--port")
        .app_argument("8080")
        .vendor("Acme Corp")
        .description("Point of sale")
        .copyright("(c) 2026 Acme Corp")
        .build()
}

#[tokio::test]
async fn test_save_then_load_is_lossless() {
    let ws = TestWorkspace::new();
    let store = PresetStore::new(ws.path.join("presets"));
    let config = full_configuration();

    store.save("release-linux", &config).await.unwrap();
    let loaded = store.load("release-linux").await.unwrap();

    assert_eq!(loaded, config);
    assert_eq!(store.list().await.unwrap(), ["release-linux"]);
}

#[tokio::test]
async fn test_preset_file_uses_camel_case_and_format_tags() {
    let ws = TestWorkspace::new();
    let store = PresetStore::new(ws.path.join("presets"));
    store.save("fmt", &full_configuration()).await.unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&ws.read_file("presets/fmt.json")).unwrap();
    assert_eq!(json["appName"], "Acme Shop");
    assert_eq!(json["mainClass"], "com.acme.shop.Main");
    assert_eq!(json["outputFormat"], "rpm");
    assert_eq!(json["targetPlatform"], "linux");
    assert_eq!(json["minimizeRuntime"], true);
    assert_eq!(json["runtimeOptions"][1], "-Dshop.mode=prod");
}

#[tokio::test]
async fn test_saving_again_overwrites() {
    let ws = TestWorkspace::new();
    let store = PresetStore::new(ws.path.join("presets"));

    store.save("p", &default_configuration()).await.unwrap();
    store.save("p", &full_configuration()).await.unwrap();

    assert_eq!(store.load("p").await.unwrap(), full_configuration());
    assert_eq!(store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_arbitrary_file_round_trip() {
    let ws = TestWorkspace::new();
    let path = ws.path.join("shop.json");

    save_to_file(&path, &full_configuration()).await.unwrap();
    assert_eq!(load_from_file(&path).await.unwrap(), full_configuration());
}

#[tokio::test]
async fn test_partial_file_fills_defaults() {
    let ws = TestWorkspace::new();
    let path = ws.path.join("partial.json");
    std::fs::write(&path, r#"{ "appName": "Tiny", "outputFormat": "app-image" }"#).unwrap();

    let loaded = load_from_file(&path).await.unwrap();
    assert_eq!(loaded.app_name, "Tiny");
    assert_eq!(loaded.output_format, OutputFormat::AppImage);
    assert!(loaded.archive.is_none());
    assert!(!loaded.minimize_runtime);
}

#[tokio::test]
async fn test_invalid_json_is_an_error() {
    let ws = TestWorkspace::new();
    let path = ws.path.join("bad.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = load_from_file(&path).await.unwrap_err();
    assert!(matches!(err, packaroo::packager::Error::Json(_)));
}

#[test]
fn test_default_configuration() {
    let config = default_configuration();
    assert_eq!(config.target_platform, TargetPlatform::Current);
    assert_eq!(config.output_format, OutputFormat::AppImage);
    assert!(!config.minimize_runtime);
}
