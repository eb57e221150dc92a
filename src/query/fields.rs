//! The search field catalog
//!
//! One variant per filterable attribute of an entry. Fields carry their
//! wire parameter names so the builder never has to special-case them.

/// A filterable search field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Id,
    Name,
    ScientificName,
    Kingdom,
    Classification,
    Family,
    BodyShape,
    Height,
    Weight,
    GenderRatio,
}

/// How a field's value is matched by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Integer identifier, exact match
    Identifier,
    /// Free text, exact match
    Text,
    /// Numeric min/max pair
    Range,
}

impl SearchField {
    /// Every field, in the order the search panel lists them
    pub const ALL: [Self; 10] = [
        Self::Id,
        Self::Name,
        Self::ScientificName,
        Self::Kingdom,
        Self::Classification,
        Self::Family,
        Self::BodyShape,
        Self::Height,
        Self::Weight,
        Self::GenderRatio,
    ];

    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Id => FieldKind::Identifier,
            Self::Name
            | Self::ScientificName
            | Self::Kingdom
            | Self::Classification
            | Self::Family
            | Self::BodyShape => FieldKind::Text,
            Self::Height | Self::Weight | Self::GenderRatio => FieldKind::Range,
        }
    }

    /// Wire parameter name for identifier and text fields
    ///
    /// For range fields this is the stem the `_min`/`_max` names are
    /// derived from.
    #[must_use]
    pub const fn param(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::ScientificName => "scientific_name",
            Self::Kingdom => "kingdom",
            Self::Classification => "classification",
            Self::Family => "family",
            Self::BodyShape => "body_shape",
            Self::Height => "height",
            Self::Weight => "weight",
            Self::GenderRatio => "gender_ratio",
        }
    }

    /// Wire parameter names for the two bounds of a range field
    #[must_use]
    pub const fn range_params(self) -> (&'static str, &'static str) {
        match self {
            Self::Height => ("height_min", "height_max"),
            Self::Weight => ("weight_min", "weight_max"),
            Self::GenderRatio => ("gender_ratio_min", "gender_ratio_max"),
            // Not a range field; callers check kind() first
            _ => ("", ""),
        }
    }

    /// Human-readable label for the search panel
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "Number",
            Self::Name => "Name",
            Self::ScientificName => "Scientific name",
            Self::Kingdom => "Kingdom",
            Self::Classification => "Classification",
            Self::Family => "Family",
            Self::BodyShape => "Body shape",
            Self::Height => "Height",
            Self::Weight => "Weight",
            Self::GenderRatio => "Gender ratio",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_lists_every_field_once() {
        let mut seen = std::collections::HashSet::new();
        for field in SearchField::ALL {
            assert!(seen.insert(field), "duplicate field {field:?}");
        }
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn test_range_fields_have_min_max_params() {
        for field in SearchField::ALL {
            if field.kind() == FieldKind::Range {
                let (min, max) = field.range_params();
                assert!(min.ends_with("_min"), "{field:?} min param: {min}");
                assert!(max.ends_with("_max"), "{field:?} max param: {max}");
                assert!(min.starts_with(field.param()));
            }
        }
    }

    #[test]
    fn test_id_is_the_only_identifier() {
        for field in SearchField::ALL {
            let is_id = field == SearchField::Id;
            assert_eq!(field.kind() == FieldKind::Identifier, is_id);
        }
    }
}
