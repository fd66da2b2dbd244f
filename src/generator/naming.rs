use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::generator::error::CodegenError;

/// Member name of the implicit enum sentinel. Schema-declared literals must
/// not collide with it; the sanitizer disambiguates by appending `_`.
pub const UNKNOWN_ENUM: &str = "UNKNOWN";

lazy_static! {
    static ref CPP_KEYWORDS: HashSet<&'static str> = [
        "alignas", "alignof", "and", "asm", "auto", "bitand", "bitor", "bool", "break", "case",
        "catch", "char", "class", "compl", "concept", "const", "constexpr", "continue", "decltype",
        "default", "delete", "do", "double", "else", "enum", "explicit", "export", "extern",
        "false", "float", "for", "friend", "goto", "if", "inline", "int", "long", "mutable",
        "namespace", "new", "noexcept", "not", "nullptr", "operator", "or", "private", "protected",
        "public", "register", "requires", "return", "short", "signed", "sizeof", "static",
        "struct", "switch", "template", "this", "throw", "true", "try", "typedef", "typeid",
        "typename", "union", "unsigned", "using", "virtual", "void", "volatile", "while", "xor",
    ]
    .into_iter()
    .collect();
}

/// Splits an XML name into words. Boundaries are non-alphanumeric
/// characters (dropped), lower-to-upper transitions, and the last capital
/// of an uppercase run followed by a lowercase letter ("FOOBar" is
/// FOO + Bar). Splitting is stable under the conversions below, which
/// makes them idempotent.
fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = name.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if !current.is_empty() {
            let prev = *chars[..i]
                .iter()
                .rev()
                .find(|p| p.is_ascii_alphanumeric())
                .unwrap();
            let camel_boundary = !prev.is_ascii_uppercase() && c.is_ascii_uppercase();
            let acronym_end = prev.is_ascii_uppercase()
                && c.is_ascii_uppercase()
                && chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if camel_boundary || acronym_end {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn guard(mut name: String, source: &str) -> Result<String, CodegenError> {
    if name.is_empty() {
        return Err(CodegenError::InvalidIdentifier(source.to_string()));
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    if CPP_KEYWORDS.contains(name.as_str()) {
        name.push('_');
    }
    Ok(name)
}

/// XML name to a generated class name: each word's first character
/// uppercased, the rest kept.
pub fn to_class_name(name: &str) -> Result<String, CodegenError> {
    let class_name = split_words(name)
        .iter()
        .map(|word| capitalize_word(word))
        .collect::<String>();
    guard(class_name, name)
}

/// XML name to a member variable / getter-stem name: class-cased with the
/// first character lowercased.
pub fn to_variable_name(name: &str) -> Result<String, CodegenError> {
    let mut variable = split_words(name)
        .iter()
        .map(|word| capitalize_word(word))
        .collect::<String>();
    if let Some(first) = variable.chars().next() {
        let lowered: String = first.to_lowercase().collect();
        variable.replace_range(..first.len_utf8(), &lowered);
    }
    guard(variable, name)
}

/// Enumeration literal to an enum member name: words uppercased and joined
/// with underscores, kept clear of the reserved sentinel.
pub fn to_enum_name(value: &str) -> Result<String, CodegenError> {
    let member = split_words(value)
        .iter()
        .map(|word| word.to_uppercase())
        .collect::<Vec<_>>()
        .join("_");
    let member = guard(member, value)?;
    if member == UNKNOWN_ENUM {
        return Ok(format!("{member}_"));
    }
    Ok(member)
}

/// Uppercases the first character; used to build accessor names from
/// variable names.
pub fn capitalize(name: &str) -> String {
    capitalize_word(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_are_camel_cased() {
        assert_eq!(to_class_name("audio-policy").unwrap(), "AudioPolicy");
        assert_eq!(to_class_name("halFormat").unwrap(), "HalFormat");
        assert_eq!(to_class_name("FOOBar").unwrap(), "FOOBar");
    }

    #[test]
    fn class_naming_is_idempotent() {
        for name in ["fooBar", "foo-bar", "2d", "a.b.c", "X", "FOOBar", "ABC"] {
            let once = to_class_name(name).unwrap();
            assert_eq!(to_class_name(&once).unwrap(), once, "for input {name:?}");
        }
    }

    #[test]
    fn variable_naming_is_idempotent() {
        for name in ["fooBar", "foo-bar", "simple", "HTTPHeader"] {
            let once = to_variable_name(name).unwrap();
            assert_eq!(to_variable_name(&once).unwrap(), once, "for input {name:?}");
        }
    }

    #[test]
    fn leading_digits_are_prefixed() {
        assert_eq!(to_class_name("2dSurface").unwrap(), "_2dSurface");
        assert_eq!(to_variable_name("3d").unwrap(), "_3d");
        assert_eq!(to_enum_name("4k").unwrap(), "_4K");
    }

    #[test]
    fn keywords_are_suffixed() {
        assert_eq!(to_variable_name("default").unwrap(), "default_");
        assert_eq!(to_variable_name("class").unwrap(), "class_");
    }

    #[test]
    fn enum_names_shout() {
        assert_eq!(to_enum_name("green").unwrap(), "GREEN");
        assert_eq!(to_enum_name("dash-case").unwrap(), "DASH_CASE");
        assert_eq!(to_enum_name("camelCase").unwrap(), "CAMEL_CASE");
    }

    #[test]
    fn enum_sentinel_is_kept_free() {
        assert_eq!(to_enum_name("unknown").unwrap(), "UNKNOWN_");
        assert_eq!(to_enum_name("UNKNOWN").unwrap(), "UNKNOWN_");
    }

    #[test]
    fn empty_after_sanitizing_is_an_error() {
        assert!(to_class_name("--").is_err());
        assert!(to_variable_name("").is_err());
    }

    #[test]
    fn capitalize_only_touches_the_first_character() {
        assert_eq!(capitalize("fooBar"), "FooBar");
        assert_eq!(capitalize(""), "");
    }
}
