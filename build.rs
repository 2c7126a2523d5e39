use std::fs;

const CONFIG_PATH: &str = "src/default_config.toml";
const PATH_KEYS: [&str; 4] = ["static_dir", "content_dir", "template", "output_dir"];

fn main() {
    println!("cargo:rerun-if-changed={CONFIG_PATH}");

    let content = fs::read_to_string(CONFIG_PATH).expect("Failed to read default_config.toml");
    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {e}"),
    };

    // Every path must be spelled out in the bundled defaults.
    let paths = table
        .get("paths")
        .and_then(toml::Value::as_table)
        .expect("default_config.toml is missing the [paths] table");
    for key in PATH_KEYS {
        match paths.get(key) {
            Some(toml::Value::String(value)) if !value.is_empty() => {}
            _ => panic!("default_config.toml: paths.{key} must be a non-empty string"),
        }
    }
}
