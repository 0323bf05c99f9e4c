//! The shipped example configuration matches the built-in defaults

use std::path::PathBuf;

use translit_common::Config;

#[test]
fn example_config_equals_defaults() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../translit.toml.example");
    let config = Config::load(&path).unwrap();
    assert_eq!(config, Config::default());
}
