use rustc_hash::FxHashMap;
use std::path::PathBuf;
use super::*;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: FxHashMap<String, String> =
        vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name: &str| map.get(name).cloned()
}

#[test]
fn test_defaults_without_variables() {
    let settings = DemoSettings::from_lookup(lookup(&[]));
    assert_eq!(settings, DemoSettings::default());
    assert_eq!(settings.max_recursion, 16);
}

#[test]
fn test_overrides() {
    let settings = DemoSettings::from_lookup(lookup(&[
        (ENV_WIDTH, "640"),
        (ENV_HEIGHT, " 480 "),
        (ENV_FRAMES, "3"),
        (ENV_RECURSION, "300"),
        (ENV_SCREENSHOT, "out/frame.png"),
        (ENV_SEED, "42"),
    ]));

    assert_eq!((settings.width, settings.height), (640, 480));
    assert_eq!(settings.frames, 3);
    // Clamping happens in the engine config, not here
    assert_eq!(settings.max_recursion, 300);
    assert_eq!(settings.screenshot, Some(PathBuf::from("out/frame.png")));
    assert_eq!(settings.seed, 42);
    assert!((settings.aspect() - 4.0 / 3.0).abs() < 1e-6);
}

#[test]
fn test_invalid_values_keep_defaults() {
    let settings = DemoSettings::from_lookup(lookup(&[
        (ENV_WIDTH, "-5"),
        (ENV_FRAMES, "many"),
        (ENV_SCREENSHOT, "  "),
    ]));
    assert_eq!(settings.width, 320);
    assert_eq!(settings.frames, 120);
    assert_eq!(settings.screenshot, None);
}
