//! Localized user-facing messages
//!
//! Messages are kept in a TOML catalogue compiled into the binary. A file at
//! `i18n/messages.toml` in the working directory overrides the embedded copy.

use actix_web::{http::header, HttpRequest};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub use tf_shared::types::Language;

const OVERRIDE_PATH: &str = "i18n/messages.toml";
const EMBEDDED_MESSAGES: &str = include_str!("../../i18n/messages.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalizedMessage {
    pub he: String,
    pub en: String,
}

impl LocalizedMessage {
    pub fn text(&self, lang: Language) -> &str {
        match lang {
            Language::Hebrew => &self.he,
            Language::English => &self.en,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageCatalog {
    pub verification: HashMap<String, LocalizedMessage>,
    pub validation: HashMap<String, LocalizedMessage>,
    pub general: HashMap<String, LocalizedMessage>,
}

pub static MESSAGES: Lazy<MessageCatalog> = Lazy::new(|| {
    load_messages().unwrap_or_else(|e| {
        tracing::warn!("Failed to load {}: {}, using embedded messages", OVERRIDE_PATH, e);
        embedded_messages()
    })
});

fn load_messages() -> Result<MessageCatalog, Box<dyn std::error::Error>> {
    let config_path = Path::new(OVERRIDE_PATH);

    if config_path.exists() {
        let content = fs::read_to_string(config_path)?;
        Ok(toml::from_str(&content)?)
    } else {
        Ok(embedded_messages())
    }
}

fn embedded_messages() -> MessageCatalog {
    toml::from_str(EMBEDDED_MESSAGES).expect("embedded message catalogue is valid TOML")
}

/// Look a message up by `category` and `key`
///
/// Unknown keys resolve to the key itself so a missing entry never breaks a
/// response.
pub fn get_message(category: &str, key: &str, lang: Language) -> String {
    let messages = &*MESSAGES;

    let category_map = match category {
        "verification" => &messages.verification,
        "validation" => &messages.validation,
        "general" => &messages.general,
        _ => return key.to_string(),
    };

    category_map
        .get(key)
        .map(|msg| msg.text(lang).to_string())
        .unwrap_or_else(|| key.to_string())
}

/// Replace `{name}` placeholders in a template
pub fn format_message(template: &str, params: &HashMap<&str, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in params {
        let placeholder = format!("{{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

/// Preferred language of a request, Hebrew unless the client asks for English
pub fn language_from_request(req: &HttpRequest) -> Language {
    req.headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(Language::from_accept_language)
        .unwrap_or_default()
}
