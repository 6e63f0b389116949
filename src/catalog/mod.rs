//! Metadata catalog - read-only description of the properties a request accepts
//!
//! Clients use the catalog to build a form; `cloudgen init` uses it to write a
//! starter property file.

pub mod errors;
pub mod types;

pub use errors::*;
pub use types::*;

use std::collections::HashSet;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("default.yml");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataCatalog {
    groups: Vec<ConfigGroup>,
}

impl MetadataCatalog {
    /// The catalog compiled into the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, CatalogError> {
        let groups: Vec<ConfigGroup> = serde_yaml::from_str(content)?;
        let catalog = Self { groups };
        catalog.validate()?;
        Ok(catalog)
    }

    pub async fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_yaml_str(&content)
    }

    pub fn groups(&self) -> &[ConfigGroup] {
        &self.groups
    }

    pub fn field(&self, key: &str) -> Option<&ConfigField> {
        self.groups
            .iter()
            .flat_map(|g| g.fields.iter())
            .find(|f| f.key == key)
    }

    pub fn to_yaml(&self) -> Result<String, CatalogError> {
        Ok(serde_yaml::to_string(&self.groups)?)
    }

    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(&self.groups)?)
    }

    /// Property text with every field at its default, grouped and commented.
    ///
    /// Fields without a default are written commented out unless required.
    pub fn default_properties(&self) -> String {
        let mut out = String::new();
        for (index, group) in self.groups.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&format!("# {}\n", group.label));
            if let Some(description) = &group.description {
                out.push_str(&format!("# {description}\n"));
            }
            for field in &group.fields {
                if !field.options.is_empty() {
                    out.push_str(&format!("# {}: {}\n", field.label, field.options.join(" | ")));
                }
                let value = field.default.as_deref().map(escape_value);
                match value {
                    Some(value) => out.push_str(&format!("{}={value}\n", field.key)),
                    None if field.required => out.push_str(&format!("{}=\n", field.key)),
                    None => out.push_str(&format!("#{}=\n", field.key)),
                }
            }
        }
        out
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for field in self.groups.iter().flat_map(|g| g.fields.iter()) {
            if !seen.insert(field.key.as_str()) {
                return Err(CatalogError::InvalidCatalog(format!(
                    "duplicate field '{}'",
                    field.key
                )));
            }
            if field.field_type.has_options() && field.options.is_empty() {
                return Err(CatalogError::InvalidCatalog(format!(
                    "field '{}' needs options",
                    field.key
                )));
            }
            if let Some(default) = &field.default {
                if field.field_type.has_options() && !field.options.contains(default) {
                    return Err(CatalogError::InvalidCatalog(format!(
                        "default '{default}' of field '{}' is not one of its options",
                        field.key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn escape_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::Properties;
    use crate::services::{SERVER_TYPE_KEY, ServerKind};

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = MetadataCatalog::builtin().unwrap();
        assert!(!catalog.groups().is_empty());

        let server = catalog.field(SERVER_TYPE_KEY).unwrap();
        assert_eq!(server.field_type, FieldType::Radio);
        assert!(server.required);
        assert_eq!(server.options, ["registry-server", "gateway-server", "config-server"]);
    }

    #[test]
    fn test_builtin_server_options_match_kinds() {
        let catalog = MetadataCatalog::builtin().unwrap();
        let options = &catalog.field(SERVER_TYPE_KEY).unwrap().options;
        let kinds: Vec<_> = ServerKind::all().iter().map(|k| k.as_str().to_string()).collect();
        assert_eq!(options, &kinds);
    }

    #[test]
    fn test_default_properties_parse() {
        let catalog = MetadataCatalog::builtin().unwrap();
        let properties = Properties::parse(&catalog.default_properties()).unwrap();

        assert_eq!(properties.get(SERVER_TYPE_KEY), Some("gateway-server"));
        assert_eq!(properties.get("projectName"), Some("demo"));
        assert_eq!(properties.get("eurekaUrl"), Some("http://localhost:8761/eureka/"));
        assert!(!properties.contains_key("basePackage"));
        assert!(!properties.contains_key("serverPort"));
    }

    #[test]
    fn test_json_export() {
        let json = MetadataCatalog::builtin().unwrap().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["fields"][0]["type"], "radio");
    }

    #[test]
    fn test_validation() {
        let duplicate = "
- key: a
  label: A
  fields:
    - {key: x, label: X, type: text}
    - {key: x, label: X, type: text}
";
        assert!(matches!(
            MetadataCatalog::from_yaml_str(duplicate),
            Err(CatalogError::InvalidCatalog(_))
        ));

        let bad_default = "
- key: a
  label: A
  fields:
    - {key: x, label: X, type: radio, default: c, options: [a, b]}
";
        assert!(matches!(
            MetadataCatalog::from_yaml_str(bad_default),
            Err(CatalogError::InvalidCatalog(_))
        ));

        let no_options = "
- key: a
  label: A
  fields:
    - {key: x, label: X, type: select}
";
        assert!(matches!(
            MetadataCatalog::from_yaml_str(no_options),
            Err(CatalogError::InvalidCatalog(_))
        ));
    }
}
