//! Client-side validation of the location form.
//!
//! Stricter than the server: codes are short upper-case identifiers and an
//! image is required. Passing these checks does not guarantee the server
//! accepts the input (uniqueness is only known server-side).

use std::collections::BTreeMap;
use std::sync::LazyLock;

use locatr_shared::{LocationData, LocationPayload};
use regex_lite::Regex;
use url::Url;

static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9_-]+$").expect("valid regex"));

const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg"];

/// First failing message per field.
pub type FormErrors = BTreeMap<&'static str, String>;

/// Raw form input as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationForm {
    pub code: String,
    pub name: String,
    pub image: String,
}

impl LocationForm {
    /// Prefill from an existing location (edit mode).
    pub fn from_location(location: &LocationData) -> Self {
        Self {
            code: location.code.clone(),
            name: location.name.clone(),
            image: location.image.clone().unwrap_or_default(),
        }
    }

    /// Check every field; on success return the request body to send.
    pub fn validate(&self) -> Result<LocationPayload, FormErrors> {
        let mut errors = FormErrors::new();

        if let Err(message) = check_code(&self.code) {
            errors.insert("code", message.to_string());
        }
        let name = self.name.trim();
        if let Err(message) = check_name(name) {
            errors.insert("name", message.to_string());
        }
        if let Err(message) = check_image(&self.image) {
            errors.insert("image", message.to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(LocationPayload::new(self.code.clone(), name).with_image(self.image.clone()))
    }
}

fn check_code(code: &str) -> Result<(), &'static str> {
    let len = code.chars().count();
    if len == 0 {
        return Err("The code is required.");
    }
    if len < 2 {
        return Err("The code must be at least 2 characters.");
    }
    if len > 10 {
        return Err("The code may not be greater than 10 characters.");
    }
    if !CODE_RE.is_match(code) {
        return Err(
            "The code may only contain uppercase letters, numbers, hyphens and underscores.",
        );
    }
    Ok(())
}

fn check_name(name: &str) -> Result<(), &'static str> {
    let len = name.chars().count();
    if len == 0 {
        return Err("The name is required.");
    }
    if len < 2 {
        return Err("The name must be at least 2 characters.");
    }
    if len > 100 {
        return Err("The name may not be greater than 100 characters.");
    }
    Ok(())
}

fn check_image(image: &str) -> Result<(), &'static str> {
    if image.is_empty() {
        return Err("The image is required.");
    }
    if Url::parse(image).is_err() {
        return Err("The image must be a valid URL.");
    }
    let lower = image.to_lowercase();
    if !IMAGE_EXTENSIONS.iter().any(|ext| lower.contains(ext)) {
        return Err("The image must point to an image file (jpg, jpeg, png, gif, webp, svg).");
    }
    Ok(())
}
