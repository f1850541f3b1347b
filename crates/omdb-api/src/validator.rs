//! Per-field validation rules and wire-name translation.

use std::fmt;

use serde_json::Value;

/// Accepted `category` values (`type` on the wire).
const CATEGORIES: [&str; 3] = ["movie", "series", "episode"];

/// Accepted response formats.
const FORMATS: [&str; 2] = ["json", "xml"];

/// Accepted plot lengths.
const PLOTS: [&str; 2] = ["short", "full"];

/// A logical query field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// IMDb identifier, e.g. `tt0396269`.
    Identifier,
    /// Exact title.
    Title,
    /// Free-text title search.
    Search,
    /// Result type: movie, series or episode.
    Category,
    /// Release year.
    Year,
    /// Response format: json or xml.
    Format,
    /// Plot length: short or full.
    Plot,
    /// Include Rotten Tomatoes ratings.
    IncludeRatings,
}

impl Field {
    /// Every field, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Identifier,
        Self::Title,
        Self::Search,
        Self::Category,
        Self::Year,
        Self::Format,
        Self::Plot,
        Self::IncludeRatings,
    ];

    /// Returns the query-parameter key sent to the API.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Identifier => "i",
            Self::Title => "t",
            Self::Search => "s",
            Self::Category => "type",
            Self::Year => "y",
            Self::Format => "r",
            Self::Plot => "plot",
            Self::IncludeRatings => "tomatoes",
        }
    }

    /// Returns the builder-facing name used in error messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Title => "title",
            Self::Search => "search",
            Self::Category => "category",
            Self::Year => "year",
            Self::Format => "format",
            Self::Plot => "plot",
            Self::IncludeRatings => "include_ratings",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of validating a candidate value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    /// The value may be stored.
    Accepted,
    /// The value was refused, with a human-readable reason.
    Rejected(String),
}

impl ValidationResult {
    /// Returns `true` for [`ValidationResult::Accepted`].
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Converts into a `Result`, attributing a rejection to `field`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the value was rejected.
    pub fn into_result(self, field: Field) -> Result<(), ValidationError> {
        match self {
            Self::Accepted => Ok(()),
            Self::Rejected(reason) => Err(ValidationError { field, reason }),
        }
    }
}

/// A field value refused by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    field: Field,
    reason: String,
}

impl ValidationError {
    /// The offending field.
    #[must_use]
    pub const fn field(&self) -> Field {
        self.field
    }

    /// The validator's reason, e.g. `expects a number. Got abc.`
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OMDb function {} {}", self.field, self.reason)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a candidate value for `field`.
///
/// Pure and total: the outcome depends only on the arguments.
/// `Value::Null` is rejected by every field.
#[must_use]
pub fn validate(field: Field, value: &Value) -> ValidationResult {
    match field {
        Field::Identifier | Field::Title | Field::Search => expect_string(value),
        Field::Year => expect_number(value),
        Field::Category => expect_one_of(&CATEGORIES, value),
        Field::Format => expect_one_of(&FORMATS, value),
        Field::Plot => expect_one_of(&PLOTS, value),
        Field::IncludeRatings => expect_bool(value),
    }
}

fn expect_string(value: &Value) -> ValidationResult {
    if value.is_string() {
        ValidationResult::Accepted
    } else {
        ValidationResult::Rejected(format!("expects a string. Got {}.", render(value)))
    }
}

fn expect_number(value: &Value) -> ValidationResult {
    if value.is_number() {
        ValidationResult::Accepted
    } else {
        ValidationResult::Rejected(format!("expects a number. Got {}.", render(value)))
    }
}

fn expect_one_of(allowed: &[&str], value: &Value) -> ValidationResult {
    if value.as_str().is_some_and(|s| allowed.contains(&s)) {
        ValidationResult::Accepted
    } else {
        ValidationResult::Rejected(format!(
            "expects one of {}. Got {}.",
            allowed.join(","),
            render(value)
        ))
    }
}

fn expect_bool(value: &Value) -> ValidationResult {
    if value.is_boolean() {
        ValidationResult::Accepted
    } else {
        ValidationResult::Rejected(format!("expects one of true,false. Got {}.", render(value)))
    }
}

/// Strings render bare; everything else uses its JSON text.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashSet;

    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_wire_names() {
        // Arrange
        let expected = [
            (Field::Identifier, "i"),
            (Field::Title, "t"),
            (Field::Search, "s"),
            (Field::Category, "type"),
            (Field::Year, "y"),
            (Field::Format, "r"),
            (Field::Plot, "plot"),
            (Field::IncludeRatings, "tomatoes"),
        ];

        // Act & Assert
        for (field, wire) in expected {
            assert_eq!(field.wire_name(), wire);
        }
    }

    #[test]
    fn test_wire_names_are_unique() {
        // Arrange & Act
        let names: HashSet<&str> = Field::ALL.iter().map(|f| f.wire_name()).collect();

        // Assert
        assert_eq!(names.len(), Field::ALL.len());
    }

    #[test]
    fn test_null_rejected_by_every_field() {
        // Arrange & Act & Assert
        for field in Field::ALL {
            assert!(
                !validate(field, &Value::Null).is_accepted(),
                "{field} accepted null"
            );
        }
    }

    #[test]
    fn test_string_field_rejects_number() {
        // Arrange & Act
        let result = validate(Field::Title, &json!(42));

        // Assert
        assert_eq!(
            result,
            ValidationResult::Rejected(String::from("expects a string. Got 42."))
        );
    }

    #[test]
    fn test_year_rejects_string() {
        // Arrange & Act
        let result = validate(Field::Year, &json!("notayear"));

        // Assert
        assert_eq!(
            result,
            ValidationResult::Rejected(String::from("expects a number. Got notayear."))
        );
    }

    #[test]
    fn test_category_reason_lists_members() {
        // Arrange & Act
        let result = validate(Field::Category, &json!("badString"));

        // Assert
        assert_eq!(
            result,
            ValidationResult::Rejected(String::from(
                "expects one of movie,series,episode. Got badString."
            ))
        );
    }

    #[test]
    fn test_format_and_plot_members() {
        // Arrange & Act & Assert
        for ok in ["json", "xml"] {
            assert!(validate(Field::Format, &json!(ok)).is_accepted());
        }
        for ok in ["short", "full"] {
            assert!(validate(Field::Plot, &json!(ok)).is_accepted());
        }
        assert!(!validate(Field::Format, &json!("JSON")).is_accepted());
        assert!(!validate(Field::Plot, &json!("long")).is_accepted());
    }

    #[test]
    fn test_include_ratings_accepts_only_booleans() {
        // Arrange & Act & Assert
        assert!(validate(Field::IncludeRatings, &json!(true)).is_accepted());
        assert!(validate(Field::IncludeRatings, &json!(false)).is_accepted());
        assert_eq!(
            validate(Field::IncludeRatings, &json!("true")),
            ValidationResult::Rejected(String::from("expects one of true,false. Got true."))
        );
        assert!(!validate(Field::IncludeRatings, &json!(1)).is_accepted());
    }

    #[test]
    fn test_into_result_formats_message() {
        // Arrange
        let result = validate(Field::Year, &json!("notayear"));

        // Act
        let err = result.into_result(Field::Year).unwrap_err();

        // Assert
        assert_eq!(err.field(), Field::Year);
        assert_eq!(err.reason(), "expects a number. Got notayear.");
        assert_eq!(
            err.to_string(),
            "OMDb function year expects a number. Got notayear."
        );
    }

    #[test]
    fn test_include_ratings_message_uses_method_name() {
        // Arrange & Act
        let err = validate(Field::IncludeRatings, &json!("yes"))
            .into_result(Field::IncludeRatings)
            .unwrap_err();

        // Assert
        assert!(err.to_string().starts_with("OMDb function include_ratings "));
    }

    proptest! {
        #[test]
        fn prop_string_fields_accept_any_string(s in ".*") {
            for field in [Field::Identifier, Field::Title, Field::Search] {
                prop_assert!(validate(field, &json!(s)).is_accepted());
            }
        }

        #[test]
        fn prop_string_fields_reject_numbers(n in any::<i64>()) {
            for field in [Field::Identifier, Field::Title, Field::Search] {
                prop_assert!(!validate(field, &json!(n)).is_accepted());
            }
        }

        #[test]
        fn prop_year_accepts_any_number(n in any::<i64>(), f in -1.0e9f64..1.0e9f64) {
            prop_assert!(validate(Field::Year, &json!(n)).is_accepted());
            prop_assert!(validate(Field::Year, &json!(f)).is_accepted());
        }

        #[test]
        fn prop_year_rejects_strings_and_booleans(s in ".*", b in any::<bool>()) {
            prop_assert!(!validate(Field::Year, &json!(s)).is_accepted());
            prop_assert!(!validate(Field::Year, &json!(b)).is_accepted());
        }

        #[test]
        fn prop_category_accepts_exactly_its_members(
            s in prop_oneof![
                prop::sample::select(CATEGORIES.to_vec()).prop_map(String::from),
                "[a-z]{0,10}",
            ]
        ) {
            let expected = CATEGORIES.contains(&s.as_str());
            prop_assert_eq!(validate(Field::Category, &json!(s)).is_accepted(), expected);
        }

        #[test]
        fn prop_enum_fields_reject_numbers(n in any::<i32>()) {
            for field in [Field::Category, Field::Format, Field::Plot, Field::IncludeRatings] {
                prop_assert!(!validate(field, &json!(n)).is_accepted());
            }
        }

        #[test]
        fn prop_include_ratings_rejects_strings(s in ".*") {
            prop_assert!(!validate(Field::IncludeRatings, &json!(s)).is_accepted());
        }
    }
}
