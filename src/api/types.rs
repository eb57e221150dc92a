//! Wire-format types for the catalog service
//!
//! These mirror the JSON shapes the service produces. `Creature` is
//! immutable once received; list membership only changes through a fresh
//! fetch, never by local mutation.

use serde::{Deserialize, Serialize};

/// One catalog record as returned by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    /// Unique, stable numeric identifier
    pub id: i64,
    /// Display name
    pub name: String,
    /// Binomial name
    pub scientific_name: String,
    /// Free-text description
    pub description: String,
    /// Fraction of the population that is female, 0.0..=1.0
    pub gender_ratio: f64,
    pub kingdom: String,
    pub classification: String,
    pub family: String,
    /// Body-shape tag; also the icon key for the shape picker
    pub body_shape: String,
    /// Height in metres
    pub height: f64,
    /// Weight in kilograms
    pub weight: f64,
    /// Opaque image path; resolve with [`Creature::image_url`]
    pub image_path: String,
}

impl Creature {
    /// Resolve this entry's image against the service base URL
    ///
    /// The service stores `image_path` as whatever path the uploader used,
    /// so everything up to the last `/` or `\` separator is stripped before
    /// joining against the static upload prefix.
    #[must_use]
    pub fn image_url(&self, base_url: &str) -> String {
        let basename = self
            .image_path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.image_path);
        format!("{}/static/uploads/{basename}", base_url.trim_end_matches('/'))
    }

    /// Zero-padded display number, e.g. `#007`
    #[must_use]
    pub fn display_number(&self) -> String {
        format!("#{:03}", self.id)
    }
}

/// The placeholder asset substituted when an entry image fails to load
pub const PLACEHOLDER_IMAGE: &str = "placeholder.png";

/// URL of the placeholder image for a given service base
#[must_use]
pub fn placeholder_url(base_url: &str) -> String {
    format!(
        "{}/static/uploads/{PLACEHOLDER_IMAGE}",
        base_url.trim_end_matches('/')
    )
}

/// Machine-readable failure body returned by the service
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason, e.g. "File must be an image"
    pub detail: String,
}

/// Built search parameters, ready for the wire
///
/// An ordered list of `(name, value)` pairs. Order follows the order the
/// user activated the fields in, which keeps the request URL stable while
/// editing. An empty set means "unfiltered".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a parameter
    pub fn push(&mut self, name: &'static str, value: String) {
        self.0.push((name, value));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Look up a parameter value by wire name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// The pairs in activation order
    #[must_use]
    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = &'a (&'static str, String);
    type IntoIter = std::slice::Iter<'a, (&'static str, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
