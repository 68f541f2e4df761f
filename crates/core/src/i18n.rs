//! Message translation.
//!
//! Messages are keyed by their English source text; a catalog maps source
//! text to a localized template and unknown messages fall back to the source
//! text itself, so an empty catalog serves English. Templates interpolate
//! `%name%`-style placeholders.

use std::collections::HashMap;

/// Translates source messages and interpolates placeholder parameters.
#[derive(Debug, Default)]
pub struct Translator {
    catalog: HashMap<String, String>,
}

impl Translator {
    /// A translator with an empty catalog (every message falls through).
    pub fn new() -> Self {
        Self::default()
    }

    /// A translator backed by a source-text to template catalog.
    pub fn with_catalog(catalog: HashMap<String, String>) -> Self {
        Self { catalog }
    }

    /// Translate `message` and substitute `%key%` placeholders.
    ///
    /// Parameter keys are given bare (`"name"`, not `"%name%"`). Placeholders
    /// with no matching parameter are left verbatim.
    pub fn translate(&self, message: &str, params: &[(&str, &str)]) -> String {
        let template = self
            .catalog
            .get(message)
            .map(String::as_str)
            .unwrap_or(message);

        let mut rendered = template.to_string();
        for (key, value) in params {
            rendered = rendered.replace(&format!("%{key}%"), value);
        }
        rendered
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
