//! Identifier transformations for generated Java sources

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Component, Path};

static PACKAGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("package pattern is a valid regex")
});

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this", "throw",
    "throws", "transient", "true", "try", "void", "volatile", "while",
];

/// Converts `post`, `api-gateway`, `config_server` or `eurekaServer` to PascalCase.
///
/// # Examples
/// ```
/// use cloudgen::generation::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("post"), "Post");
/// assert_eq!(to_pascal_case("api-gateway"), "ApiGateway");
/// assert_eq!(to_pascal_case("eurekaServer"), "EurekaServer");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
            }
        })
        .collect()
}

/// Turns an arbitrary name into a single valid Java package segment.
///
/// ```
/// use cloudgen::generation::naming::to_package_segment;
///
/// assert_eq!(to_package_segment("My-Shop"), "myshop");
/// assert_eq!(to_package_segment("2fa"), "_2fa");
/// assert_eq!(to_package_segment("new"), "new_");
/// ```
pub fn to_package_segment(s: &str) -> String {
    let mut segment: String = s
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if segment.is_empty() {
        return "app".to_string();
    }
    if segment.starts_with(|c: char| c.is_ascii_digit()) {
        segment.insert(0, '_');
    }
    if JAVA_KEYWORDS.contains(&segment.as_str()) {
        segment.push('_');
    }
    segment
}

/// Whether `package` is a dotted Java package name without reserved words
pub fn is_valid_package(package: &str) -> bool {
    PACKAGE_RE.is_match(package)
        && package
            .split('.')
            .all(|segment| !JAVA_KEYWORDS.contains(&segment))
}

/// Whether `value` names exactly one directory: no separators, no `.` or `..`,
/// not absolute
pub fn is_directory_name(value: &str) -> bool {
    let mut components = Path::new(value).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !value.contains(['/', '\\'])
}

fn split_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_is_lowercase = false;

    for ch in s.chars() {
        if ch == '-' || ch == '_' || ch.is_whitespace() || ch == '.' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_is_lowercase = false;
        } else if ch.is_alphanumeric() {
            if ch.is_uppercase() && prev_is_lowercase && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            current.push(ch);
            prev_is_lowercase = ch.is_lowercase() || ch.is_ascii_digit();
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
