//! Example flattening a local YAML, JSON or TOML file.
//!
//! ```text
//! cargo run --example flatten_file -- config/application.yaml
//! ```
//!
//! With no argument, a built-in YAML document is flattened instead.

use cloud_config_client::prelude::*;
use std::env;

const SAMPLE: &str = r#"
top: topvalue
second:
  a: firstval
  b:
    grandchild: [a, b]
  c: thirdval
third:
  child: [3, 4]
fourth: 7
"#;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let flat = match env::args().nth(1) {
        Some(path) => {
            println!("Flattening {}\n", path);
            flatten(&Document::from_path(&path)?)
        }
        None => {
            println!("Flattening the built-in sample\n");
            flatten_yaml(SAMPLE)?
        }
    };

    for (key, value) in &flat {
        println!("{}={}", key, value);
    }
    println!("\n{} entries", flat.len());

    Ok(())
}
