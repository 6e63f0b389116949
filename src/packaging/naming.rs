//! Download name of a packaged archive

use crate::properties::{PROJECT_NAME, Properties};

const ARCHIVE_EXTENSION: &str = ".zip";

/// Externally visible archive name.
///
/// `<projectName>-<baseName>.zip`, or `<baseName>.zip` without a project name.
/// Characters outside `[A-Za-z0-9._-]` become `-`, so the result is safe in a
/// `Content-Disposition` header and as a single path component.
pub fn canonical_file_name(base_name: &str, properties: &Properties) -> String {
    let base = strip_extension(base_name.trim());
    let stem = match properties.get(PROJECT_NAME).map(str::trim) {
        Some(project) if !project.is_empty() && !base.is_empty() => format!("{project}-{base}"),
        Some(project) if !project.is_empty() => project.to_string(),
        _ => base.to_string(),
    };

    let mut sanitized: String = stem
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect();
    sanitized = sanitized.trim_matches(|c| c == '.' || c == '-').to_string();
    if sanitized.is_empty() {
        sanitized.push_str("archive");
    }

    format!("{sanitized}{ARCHIVE_EXTENSION}")
}

fn strip_extension(name: &str) -> &str {
    let split = name.len().saturating_sub(ARCHIVE_EXTENSION.len());
    match name.get(split..) {
        Some(ext) if ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION) => &name[..split],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn properties(pairs: &[(&str, &str)]) -> Properties {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_project_name_prefix() {
        let props = properties(&[("projectName", "orders")]);
        assert_eq!(canonical_file_name("skeleton", &props), "orders-skeleton.zip");
    }

    #[test]
    fn test_without_project_name() {
        assert_eq!(canonical_file_name("skeleton", &Properties::new()), "skeleton.zip");
        assert_eq!(
            canonical_file_name("skeleton", &properties(&[("projectName", "  ")])),
            "skeleton.zip"
        );
    }

    #[test]
    fn test_extension_not_doubled() {
        let props = properties(&[("projectName", "orders")]);
        assert_eq!(canonical_file_name("skeleton.zip", &props), "orders-skeleton.zip");
        assert_eq!(canonical_file_name("SKELETON.ZIP", &Properties::new()), "SKELETON.zip");
    }

    #[test]
    fn test_unsafe_characters_replaced() {
        let props = properties(&[("projectName", "my shop/\"x\"")]);
        assert_eq!(canonical_file_name("skeleton", &props), "my-shop--x--skeleton.zip");
        assert_eq!(canonical_file_name("", &Properties::new()), "archive.zip");
        assert_eq!(canonical_file_name("..", &Properties::new()), "archive.zip");
    }

    #[test]
    fn test_stable_for_identical_input() {
        let props = properties(&[("projectName", "orders"), ("applicationType", "zuul")]);
        assert_eq!(
            canonical_file_name("skeleton", &props),
            canonical_file_name("skeleton", &props.clone())
        );
    }
}
