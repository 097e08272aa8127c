//! Example demonstrating configuration loading from a config server.
//!
//! Point it at a running server:
//!
//! ```text
//! CONFIG_SERVER_URL=http://localhost:8888 \
//! CONFIG_APPLICATION=inventory \
//! CONFIG_PROFILES=dev,local \
//! CONFIG_LABEL=master \
//! RUST_LOG=cloud_config_client=debug \
//!     cargo run --example remote_config
//! ```
//!
//! Without a server it falls back to a canned response so the merge can
//! still be seen.

use cloud_config_client::prelude::*;
use std::env;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const CANNED_RESPONSE: &str = r#"{
    "name": "inventory",
    "profiles": ["dev"],
    "label": "master",
    "propertySources": [
        {"name": "inventory-dev.yml", "source": {"server.port": 9090, "db.url": "postgres://dev/db"}},
        {"name": "inventory.yml", "source": {"server.port": 8080, "server.hosts": ["a", "b"]}},
        {"name": "application.yml", "source": {"logging.level": "info", "feature.enabled": true}}
    ]
}"#;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Remote Configuration Example ===\n");

    let config = match env::var("CONFIG_SERVER_URL") {
        Ok(url) => {
            let application = env::var("CONFIG_APPLICATION").unwrap_or_else(|_| "application".into());
            let profiles = env::var("CONFIG_PROFILES").unwrap_or_default();
            let label = env::var("CONFIG_LABEL").unwrap_or_default();

            let mut source = HttpSource::builder()
                .with_url(&url)
                .with_timeout(Duration::from_secs(5));
            if let (Ok(user), Ok(pass)) = (env::var("CONFIG_USER"), env::var("CONFIG_PASSWORD")) {
                source = source.with_basic_auth(user, pass);
            }

            let request = ConfigRequest::new(application)
                .with_profiles(profiles.split(',').filter(|p| !p.is_empty()))
                .with_label(label);

            println!("Fetching {}{}", url, request.path());
            ConfigClient::new(source.build()?, request).load().await?
        }
        Err(_) => {
            println!("CONFIG_SERVER_URL not set, using a canned response");
            parse_response(CANNED_RESPONSE.as_bytes())?
        }
    };

    if let Some(details) = config.details() {
        println!("\nProperty sources (highest priority first):");
        for source in &details.property_sources {
            println!("  - {}", source.name);
        }
    }

    println!("\nMerged properties:");
    for (key, value) in config.iter() {
        println!("  {} = {}", key, value);
    }

    println!();
    match config.get_parsed::<u16>("server.port")? {
        Some(port) => println!("server.port parsed as u16: {}", port),
        None => println!("server.port is not set"),
    }
    println!(
        "feature.enabled is {} (booleans are not carried into the flat map)",
        config.get("feature.enabled").unwrap_or("absent")
    );

    Ok(())
}
