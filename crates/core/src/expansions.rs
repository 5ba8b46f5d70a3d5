// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task-scoped template expansion

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;
use thiserror::Error;

/// Regex pattern for ${name} or ${name|default}
// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}|]*)(?:\|([^}]*))?\}").expect("constant regex pattern is valid")
});

#[allow(clippy::expect_used)]
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_.\-]*$").expect("constant regex pattern is valid")
});

/// Errors from expanding a template
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpansionError {
    #[error("unterminated expansion at byte {offset}")]
    Unterminated { offset: usize },

    #[error("invalid expansion name '{name}'")]
    InvalidName { name: String },
}

/// Key/value bindings available to a task's templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Expansions(HashMap<String, String>);

impl Expansions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Expand `${name}` and `${name|default}` references.
    ///
    /// Unknown names without a default expand to the empty string. A `${`
    /// without a closing brace or a reference with a malformed name is an
    /// error; the caller decides what to fall back to.
    pub fn expand_string(&self, template: &str) -> Result<String, ExpansionError> {
        let mut out = String::with_capacity(template.len());
        let mut last = 0;

        for caps in REFERENCE_PATTERN.captures_iter(template) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let literal = &template[last..whole.start()];
            reject_open_reference(literal, last)?;
            out.push_str(literal);

            let name = caps.get(1).map_or("", |m| m.as_str());
            if !NAME_PATTERN.is_match(name) {
                return Err(ExpansionError::InvalidName { name: name.to_string() });
            }
            match (self.0.get(name), caps.get(2)) {
                (Some(value), _) => out.push_str(value),
                (None, Some(default)) => out.push_str(default.as_str()),
                (None, None) => {}
            }
            last = whole.end();
        }

        let rest = &template[last..];
        reject_open_reference(rest, last)?;
        out.push_str(rest);
        Ok(out)
    }
}

fn reject_open_reference(literal: &str, base: usize) -> Result<(), ExpansionError> {
    match literal.find("${") {
        Some(i) => Err(ExpansionError::Unterminated { offset: base + i }),
        None => Ok(()),
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Expansions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
#[path = "expansions_tests.rs"]
mod tests;
