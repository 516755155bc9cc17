use std::io::Write;

use l4sim::{ConfigError, PhysicsParameters, PhysicsProfile};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

#[test]
fn test_load_profile_overrides_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "profile: headless\ndar_multipliers:\n  yaw: 1.00\ngains:\n  roll:\n    kp: 14.0\n"
    )
    .unwrap();

    let params = PhysicsParameters::from_yaml_file(file.path()).unwrap();
    let headless = PhysicsProfile::Headless.parameters();
    assert_eq!(params.dar_multipliers.yaw, 1.0);
    assert_eq!(params.dar_multipliers.roll, headless.dar_multipliers.roll);
    assert_eq!(params.gains.roll.kp, 14.0);
    assert_eq!(params.gains.roll.kd, headless.gains.roll.kd);
}

#[test]
fn test_saved_parameters_reload() {
    let params = PhysicsProfile::Reference.parameters();
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(params.to_yaml_string().unwrap().as_bytes())
        .unwrap();

    assert_eq!(PhysicsParameters::from_yaml_file(file.path()).unwrap(), params);
}

#[test]
fn test_invalid_file_fails_fast() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "damping:\n  dar: 0.0\n").unwrap();

    let err = PhysicsParameters::from_yaml_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidParameter { ref name, .. } if name == "damping.dar"));
}

#[test]
fn test_missing_file() {
    let result = PhysicsParameters::from_yaml_file("/nonexistent/l4sim/params.yaml");
    assert!(matches!(result, Err(ConfigError::FileError(_))));
}

#[test]
fn test_malformed_yaml() {
    let result = PhysicsParameters::from_yaml_str("profile: [headless");
    assert!(matches!(result, Err(ConfigError::YamlError(_))));
}
