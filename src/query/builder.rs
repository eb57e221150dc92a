//! Accumulating search criteria into typed query parameters
//!
//! `QueryBuilder` is the live state behind the search panel. The user
//! toggles fields on and off and types raw text; the builder stores the
//! text verbatim and only parses it when a query is built. Values survive
//! deactivation, so toggling a field off and back on restores what was
//! typed.
//!
//! Build rules per field kind:
//!
//! - **Identifier**: integer parse, field omitted entirely on failure
//! - **Text**: trimmed pass-through, non-empty only
//! - **Range**: a plain value is used for both bounds; an explicit
//!   min/max pair parses each bound independently, so asymmetric ranges
//!   are legal and a bad bound never drags down its partner
//!
//! Unparseable values are dropped silently. A user halfway through typing
//! a range is not an error.

use crate::api::QueryParams;
use crate::query::fields::{FieldKind, SearchField};
use std::collections::HashMap;
use std::fmt;

/// Which end of a range a value applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Min,
    Max,
}

/// Raw text stored against a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A single value; for range fields it stands for both bounds
    Scalar(String),
    /// An explicit pair; either side may be empty
    Range { min: String, max: String },
}

/// Live search criteria state
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    /// Active fields in toggle order; the last one has editing focus
    active: Vec<SearchField>,
    /// Raw values, retained across deactivation
    values: HashMap<SearchField, FieldValue>,
}

impl QueryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate `field` (giving it focus) or deactivate it if active
    ///
    /// Deactivation removes the field from the active set but keeps its
    /// stored value; focus falls back to the most recently remaining
    /// active field. Returns true if the field is now active.
    pub fn toggle(&mut self, field: SearchField) -> bool {
        if let Some(pos) = self.active.iter().position(|f| *f == field) {
            self.active.remove(pos);
            false
        } else {
            self.active.push(field);
            true
        }
    }

    /// Store a single raw value against `field`
    ///
    /// For range fields this stands for both bounds.
    pub fn set_scalar(&mut self, field: SearchField, raw: impl Into<String>) {
        self.values.insert(field, FieldValue::Scalar(raw.into()));
    }

    /// Store one bound of a range field
    ///
    /// The other bound is preserved if one was already entered; a
    /// previously stored plain value is replaced by the pair.
    pub fn set_bound(&mut self, field: SearchField, bound: Bound, raw: impl Into<String>) {
        let (mut min, mut max) = match self.values.remove(&field) {
            Some(FieldValue::Range { min, max }) => (min, max),
            _ => (String::new(), String::new()),
        };

        match bound {
            Bound::Min => min = raw.into(),
            Bound::Max => max = raw.into(),
        }

        self.values.insert(field, FieldValue::Range { min, max });
    }

    /// The field currently focused for editing, if any
    #[must_use]
    pub fn focused(&self) -> Option<SearchField> {
        self.active.last().copied()
    }

    #[must_use]
    pub fn is_active(&self, field: SearchField) -> bool {
        self.active.contains(&field)
    }

    /// Active fields in toggle order
    #[must_use]
    pub fn active_fields(&self) -> &[SearchField] {
        &self.active
    }

    /// The stored raw value for `field`, active or not
    #[must_use]
    pub fn value(&self, field: SearchField) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Deactivate every field, keeping stored values
    pub fn clear_active(&mut self) {
        self.active.clear();
    }

    /// Build the query from the active fields
    ///
    /// Only active fields contribute. Fields whose value parses to
    /// nothing are dropped without error; an empty result is the
    /// unfiltered query.
    #[must_use]
    pub fn build(&self) -> QueryParams {
        let mut params = QueryParams::new();

        for &field in &self.active {
            let Some(value) = self.values.get(&field) else {
                continue;
            };

            match field.kind() {
                FieldKind::Identifier => {
                    if let FieldValue::Scalar(raw) = value
                        && let Ok(id) = raw.trim().parse::<i64>()
                    {
                        params.push(field.param(), id.to_string());
                    }
                }
                FieldKind::Text => {
                    if let FieldValue::Scalar(raw) = value {
                        let trimmed = raw.trim();
                        if !trimmed.is_empty() {
                            params.push(field.param(), trimmed.to_string());
                        }
                    }
                }
                FieldKind::Range => {
                    let (min_param, max_param) = field.range_params();
                    match value {
                        FieldValue::Scalar(raw) => {
                            // A single number filters for an exact value:
                            // it becomes both bounds.
                            if let Some(n) = parse_number(raw) {
                                params.push(min_param, n.clone());
                                params.push(max_param, n);
                            }
                        }
                        FieldValue::Range { min, max } => {
                            if let Some(n) = parse_number(min) {
                                params.push(min_param, n);
                            }
                            if let Some(n) = parse_number(max) {
                                params.push(max_param, n);
                            }
                        }
                    }
                }
            }
        }

        params
    }
}

/// Validate raw text as a floating point number
///
/// Returns the trimmed text as typed (so "1.0" stays "1.0"), or None if
/// it does not parse.
fn parse_number(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(|_| trimmed.to_string())
}

impl fmt::Display for QueryBuilder {
    /// CLI-style preview of the built query
    ///
    /// Example: `faunadex search --kingdom Animalia --height-min 1.0`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "faunadex search")?;

        for (name, value) in &self.build() {
            let flag = name.replace('_', "-");
            if needs_quoting(value) {
                write!(f, " --{flag} \"{value}\"")?;
            } else {
                write!(f, " --{flag} {value}")?;
            }
        }

        Ok(())
    }
}

/// Check if a string needs quoting in shell context
fn needs_quoting(s: &str) -> bool {
    s.chars().any(|c| {
        c.is_whitespace()
            || matches!(
                c,
                '$' | '"' | '\'' | '\\' | '&' | '|' | ';' | '(' | ')' | '<' | '>'
            )
    })
}
