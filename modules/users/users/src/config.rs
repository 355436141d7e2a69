use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the `users` module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UsersConfig {
    /// Country codes accepted by the update and create workflows.
    /// Matching is case-insensitive; codes are stored upper-cased.
    #[serde(default = "default_country_codes")]
    pub country_codes: Vec<String>,
    /// `time` format description used to parse birthdays.
    #[serde(default = "default_birthday_format")]
    pub birthday_format: String,
    #[serde(default)]
    pub password_policy: PasswordPolicy,
    #[serde(default)]
    pub images: ImagesConfig,
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            country_codes: default_country_codes(),
            birthday_format: default_birthday_format(),
            password_policy: PasswordPolicy::default(),
            images: ImagesConfig::default(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

/// Rules applied to a password supplied in an update form.
///
/// Rejecting an unchanged password is off by default; with it on, a
/// repeated submission of the same form fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PasswordPolicy {
    /// Reject an update whose password equals the one already stored.
    #[serde(default)]
    pub reject_unchanged: bool,
    /// Passwords that are never accepted.
    #[serde(default)]
    pub denylist: Vec<String>,
}

/// Local image store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImagesConfig {
    #[serde(default = "default_images_root")]
    pub root_dir: PathBuf,
    #[serde(default = "default_max_image_bytes")]
    pub max_bytes: u64,
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            root_dir: default_images_root(),
            max_bytes: default_max_image_bytes(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

fn default_country_codes() -> Vec<String> {
    [
        "ARG", "AUS", "BRA", "CAN", "CHL", "CHN", "COL", "DEU", "ESP", "FRA", "GBR", "IND", "ITA",
        "JPN", "KOR", "MEX", "NLD", "PER", "PRT", "UK", "USA",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

fn default_birthday_format() -> String {
    "[month]/[day]/[year]".to_owned()
}

fn default_images_root() -> PathBuf {
    PathBuf::from("data/images")
}

fn default_max_image_bytes() -> u64 {
    5 * 1024 * 1024
}

fn default_allowed_extensions() -> Vec<String> {
    ["png", "jpg", "jpeg", "gif", "webp"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

fn default_page_size() -> u64 {
    50
}

fn default_max_page_size() -> u64 {
    500
}
