//! `swasthya config show|set`.

use std::path::Path;

use anyhow::Result;
use swasthya_setu::ClientConfig;

pub fn show(config_path: &Path, json_output: bool) -> Result<()> {
    let config = ClientConfig::load_with_env(config_path)?;
    let secret = mask(&config.admin_secret);

    if json_output {
        let out = serde_json::json!({
            "path": config_path.display().to_string(),
            "graphql_endpoint": config.graphql_endpoint,
            "admin_secret": secret,
            "firebase_api_key": config.firebase_api_key,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Config: {}", config_path.display());
    println!("  graphql_endpoint  {}", or_unset(&config.graphql_endpoint));
    println!("  admin_secret      {}", or_unset(&secret));
    println!("  firebase_api_key  {}", or_unset(&config.firebase_api_key));
    Ok(())
}

pub fn set(config_path: &Path, key: &str, value: &str) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;
    if !config.set(key, value) {
        anyhow::bail!(
            "Unknown config key \"{}\". Use graphql_endpoint, admin_secret or firebase_api_key.",
            key
        );
    }
    config.save(config_path)?;
    println!("Set {} in {}.", key, config_path.display());
    Ok(())
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "********".to_string()
    }
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() { "(unset)" } else { value }
}
