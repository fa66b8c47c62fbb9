//! Dart identifiers from WIT names

use heck::{ToLowerCamelCase, ToUpperCamelCase};

/// Reserved words and members every Dart object already has
const RESERVED: &[&str] = &[
    "assert", "break", "case", "catch", "class", "const", "continue", "default", "do", "else",
    "enum", "extends", "false", "final", "finally", "for", "if", "in", "is", "new", "null",
    "rethrow", "return", "super", "switch", "this", "throw", "true", "try", "var", "void",
    "while", "with", "hashCode", "runtimeType", "toString", "noSuchMethod",
];

/// Additional names an enum value cannot take
const ENUM_RESERVED: &[&str] = &["values", "index"];

/// `record-test` -> `RecordTest`
pub(crate) fn type_name(name: &str) -> String {
    name.to_upper_camel_case()
}

/// `map-i` -> `mapI`, with a trailing `_` for reserved words
pub(crate) fn member_name(name: &str) -> String {
    escape(name.to_lower_camel_case(), RESERVED)
}

pub(crate) fn enum_value_name(name: &str) -> String {
    let name = member_name(name);
    escape(name, ENUM_RESERVED)
}

fn escape(name: String, reserved: &[&str]) -> String {
    if reserved.contains(&name.as_str()) {
        format!("{name}_")
    } else {
        name
    }
}

/// Single quoted Dart string literal
pub(crate) fn string_literal(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('$', "\\$");
    format!("'{escaped}'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("record-test", "RecordTest")]
    #[case("http-request2", "HttpRequest2")]
    #[case("a", "A")]
    fn test_type_name(#[case] wit: &str, #[case] dart: &str) {
        assert_eq!(type_name(wit), dart);
    }

    #[rstest]
    #[case("map-i", "mapI")]
    #[case("receive-i", "receiveI")]
    #[case("default", "default_")]
    #[case("to-string", "toString_")]
    #[case("value", "value")]
    fn test_member_name(#[case] wit: &str, #[case] dart: &str) {
        assert_eq!(member_name(wit), dart);
    }

    #[test]
    fn test_enum_value_name() {
        assert_eq!(enum_value_name("values"), "values_");
        assert_eq!(enum_value_name("red-ish"), "redIsh");
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(string_literal("my:pkg/api#run"), "'my:pkg/api#run'");
        assert_eq!(string_literal("it's $x"), "'it\\'s \\$x'");
    }
}
