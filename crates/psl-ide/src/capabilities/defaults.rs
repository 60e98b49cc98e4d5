//! Default value generators for `@default(...)`.

use super::{Capabilities, Provider, ScalarType};

/// How a default candidate is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultValue {
    /// A generator function such as `uuid()`.
    Function(&'static str),
    /// A literal such as `true`.
    Literal(&'static str),
}

impl DefaultValue {
    /// The text offered to the user.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Function(label) | Self::Literal(label) => label,
        }
    }
}

/// Default generators valid for a scalar type, excluding schema-derived
/// enum values.
#[must_use]
pub fn default_values(scalar: Option<ScalarType>, caps: &Capabilities) -> Vec<DefaultValue> {
    let mut values = vec![if caps.is(Provider::Mongodb) {
        DefaultValue::Function("auto()")
    } else {
        DefaultValue::Function("dbgenerated(\"\")")
    }];

    let cockroach = caps.is(Provider::Cockroachdb);
    match scalar {
        Some(ScalarType::String) => values.extend(
            ["uuid()", "cuid()", "ulid()", "nanoid()"].map(DefaultValue::Function),
        ),
        Some(ScalarType::Int) if cockroach => values.push(DefaultValue::Function("sequence()")),
        Some(ScalarType::Int) => values.push(DefaultValue::Function("autoincrement()")),
        Some(ScalarType::BigInt) if cockroach => values.extend(
            ["sequence()", "autoincrement()"].map(DefaultValue::Function),
        ),
        Some(ScalarType::BigInt) => values.push(DefaultValue::Function("autoincrement()")),
        Some(ScalarType::DateTime) => values.push(DefaultValue::Function("now()")),
        Some(ScalarType::Boolean) => {
            values.extend(["true", "false"].map(DefaultValue::Literal));
        }
        _ => {}
    }
    values
}

/// Arguments of `sequence(...)`.
pub const SEQUENCE_ARGUMENTS: &[&str] = &[
    "virtual",
    "minValue",
    "maxValue",
    "cache",
    "increment",
    "start",
];

/// Named arguments of a default generator function still available after
/// `bound`. `virtual` cannot be combined with any other argument.
///
/// Words in `bound` that name no argument, such as a half-typed one, are
/// ignored.
#[must_use]
pub fn function_arguments(function: &str, bound: &[&str]) -> Vec<&'static str> {
    if function != "sequence" {
        return Vec::new();
    }
    let bound: Vec<&str> = bound
        .iter()
        .copied()
        .filter(|name| SEQUENCE_ARGUMENTS.contains(name))
        .collect();
    if bound.contains(&"virtual") {
        return Vec::new();
    }
    SEQUENCE_ARGUMENTS
        .iter()
        .copied()
        .filter(|argument| !bound.contains(argument))
        .filter(|argument| bound.is_empty() || *argument != "virtual")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::super::PreviewFeatures;
    use super::*;

    fn labels(scalar: ScalarType, provider: Option<Provider>) -> Vec<&'static str> {
        default_values(Some(scalar), &Capabilities::new(provider, PreviewFeatures::none()))
            .into_iter()
            .map(DefaultValue::label)
            .collect()
    }

    #[test]
    fn cockroach_big_int_offers_sequence_first() {
        assert_eq!(
            labels(ScalarType::BigInt, Some(Provider::Cockroachdb)),
            vec!["dbgenerated(\"\")", "sequence()", "autoincrement()"]
        );
    }

    #[test]
    fn mongodb_starts_with_auto() {
        assert_eq!(
            labels(ScalarType::String, Some(Provider::Mongodb))[0],
            "auto()"
        );
    }

    #[test]
    fn sequence_virtual_is_exclusive() {
        assert_eq!(function_arguments("sequence", &["virtual"]), Vec::<&str>::new());
        assert_eq!(
            function_arguments("sequence", &["cache"]),
            vec!["minValue", "maxValue", "increment", "start"]
        );
        assert_eq!(function_arguments("sequence", &[]), SEQUENCE_ARGUMENTS.to_vec());
    }

    #[test]
    fn partial_words_are_not_bindings() {
        assert_eq!(function_arguments("sequence", &["v"]), SEQUENCE_ARGUMENTS.to_vec());
        assert_eq!(
            function_arguments("sequence", &["min", "cache"]),
            vec!["minValue", "maxValue", "increment", "start"]
        );
    }

    #[test]
    fn other_functions_take_no_named_arguments() {
        assert!(function_arguments("uuid", &[]).is_empty());
    }
}
