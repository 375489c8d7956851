use serde::{Deserialize, Serialize};

use std::{collections::HashMap, env, fs, path::Path};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
    #[serde(default = "default_node_env")]
    pub node_env: String,
    pub email_user: String,
    pub email_app_password: String,
    #[serde(default = "default_smtp_relay")]
    pub smtp_relay: String,
    #[serde(flatten)]
    pub contact: ContactDetails,
}

/// Public contact details printed in the confirmation sent to submitters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactDetails {
    #[serde(default = "default_brand_name")]
    pub brand_name: String,
    #[serde(default = "default_support_email")]
    pub support_email: String,
    #[serde(default = "default_support_phone")]
    pub support_phone: String,
    #[serde(default = "default_support_hours")]
    pub support_hours: String,
}

impl Default for ContactDetails {
    fn default() -> Self {
        Self {
            brand_name: default_brand_name(),
            support_email: default_support_email(),
            support_phone: default_support_phone(),
            support_hours: default_support_hours(),
        }
    }
}

const fn default_port() -> u16 {
    3000
}

fn default_frontend_url() -> String {
    "http://localhost:4200".to_string()
}

fn default_node_env() -> String {
    "development".to_string()
}

fn default_smtp_relay() -> String {
    "smtp.gmail.com".to_string()
}

fn default_brand_name() -> String {
    "MADU_TECH".to_string()
}

fn default_support_email() -> String {
    "madutech0@gmail.com".to_string()
}

fn default_support_phone() -> String {
    "+221 76 823 08 03".to_string()
}

fn default_support_hours() -> String {
    "Lun - Sam: 8h - 20h".to_string()
}

fn load_from_vars<I>(vars: I) -> Result<Config, envy::Error>
where
    I: IntoIterator<Item = (String, String)>,
{
    envy::from_iter(vars)
}

fn load_from_file(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let contents = fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(Into::into)
}

/// Variables from the dotenv file at `path`, overridden by `process` vars.
/// A missing or unreadable file contributes nothing.
fn merge_dotenv<I>(path: &Path, process: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut vars = HashMap::new();

    match dotenvy::from_path_iter(path) {
        Ok(entries) => {
            for entry in entries {
                match entry {
                    Ok((key, value)) => {
                        vars.insert(key, value);
                    }
                    Err(e) => {
                        tracing::warn!("Skipping malformed line in '{}': {e}", path.display());
                    }
                }
            }
        }
        Err(e) => tracing::debug!("No dotenv file loaded from '{}': {e}", path.display()),
    }

    vars.extend(process);
    vars
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    let requested =
        env::var("CONTACT_SERVER_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    let candidates = [requested.as_str(), "config.yaml", "config.example.yaml"];
    let mut tried = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        if tried.contains(&candidate) {
            continue;
        }
        tried.push(candidate);

        let path = Path::new(candidate);
        if !path.exists() {
            continue;
        }

        if candidate == "config.example.yaml" {
            tracing::warn!(
                "Using 'config.example.yaml'; replace it with a real config before deploying"
            );
        } else if candidate != requested {
            tracing::warn!("Config file '{requested}' not found, using '{candidate}'");
        }
        return load_from_file(path);
    }

    tracing::info!("No config file found, reading configuration from .env and environment");
    load_from_vars(merge_dotenv(Path::new(".env"), env::vars())).map_err(|e| {
        format!(
            "No config file found (tried {}) and environment variables are incomplete: {e}",
            tried.join(", ")
        )
        .into()
    })
}
