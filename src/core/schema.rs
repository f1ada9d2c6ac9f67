use crate::domain::model::SiteRecord;
use crate::utils::error::{NetboxError, Result};
use crate::utils::validation::{slug_regex, validate_pattern, Validate};
use regex::Regex;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
}

#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
    pub default: Option<&'static str>,
    pub pattern: Option<Regex>,
}

impl FieldSchema {
    pub fn required(name: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::String,
            required: true,
            default: None,
            pattern: None,
        }
    }

    pub fn optional(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::String,
            required: false,
            default: Some(default),
            pattern: None,
        }
    }

    pub fn matching(mut self, pattern: &Regex) -> Self {
        self.pattern = Some(pattern.clone());
        self
    }

    fn check(&self, value: Option<&Value>) -> Result<()> {
        let value = match value {
            Some(Value::Null) | None if self.required => {
                return Err(NetboxError::validation(self.name, "field is required"));
            }
            Some(Value::Null) | None => return Ok(()),
            Some(value) => value,
        };

        let text = match (self.field_type, value) {
            (FieldType::String, Value::String(text)) => text,
            (FieldType::String, other) => {
                return Err(NetboxError::validation(
                    self.name,
                    format!("expected a string, got {}", other),
                ));
            }
        };

        if self.required && text.is_empty() {
            return Err(NetboxError::validation(self.name, "field is required"));
        }

        if let Some(pattern) = &self.pattern {
            validate_pattern(self.name, text, pattern)?;
        }
        Ok(())
    }
}

/// 提供給設定引擎的資源欄位宣告
#[derive(Debug, Clone)]
pub struct ResourceSchema {
    pub fields: Vec<FieldSchema>,
}

impl ResourceSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// 在呼叫 create / update 之前檢查欄位
    pub fn validate(&self, attributes: &Map<String, Value>) -> Result<()> {
        for field in &self.fields {
            field.check(attributes.get(field.name))?;
        }
        Ok(())
    }

    pub fn apply_defaults(&self, mut attributes: Map<String, Value>) -> Map<String, Value> {
        for field in &self.fields {
            if let Some(default) = field.default {
                let missing = matches!(attributes.get(field.name), None | Some(Value::Null));
                if missing {
                    attributes.insert(field.name.to_string(), Value::String(default.to_string()));
                }
            }
        }
        attributes
    }
}

pub fn site_schema() -> ResourceSchema {
    ResourceSchema {
        fields: vec![
            FieldSchema::optional("description", ""),
            FieldSchema::required("name"),
            FieldSchema::required("slug").matching(slug_regex()),
        ],
    }
}

impl SiteRecord {
    /// 從引擎的未型別化欄位解出站點記錄
    pub fn from_attributes(attributes: Map<String, Value>) -> Result<Self> {
        let schema = site_schema();
        schema.validate(&attributes)?;
        let attributes = schema.apply_defaults(attributes);
        Ok(serde_json::from_value(Value::Object(attributes))?)
    }

    pub fn to_attributes(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(NetboxError::validation(
                "site",
                format!("expected an object, got {}", other),
            )),
        }
    }
}

impl Validate for SiteRecord {
    fn validate(&self) -> Result<()> {
        site_schema().validate(&self.to_attributes()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_site_schema_declaration() {
        let schema = site_schema();
        assert_eq!(schema.fields.len(), 3);

        let description = schema.field("description").unwrap();
        assert!(!description.required);
        assert_eq!(description.default, Some(""));

        assert!(schema.field("name").unwrap().required);

        let slug = schema.field("slug").unwrap();
        assert!(slug.required);
        assert_eq!(
            slug.pattern.as_ref().map(|p| p.as_str()),
            Some("^[-a-zA-Z0-9_]{1,50}$")
        );
    }

    #[test]
    fn test_from_attributes_applies_description_default() {
        let record = SiteRecord::from_attributes(attrs(json!({"name": "DC1", "slug": "dc1"})))
            .unwrap();
        assert_eq!(record, SiteRecord::new("DC1", "dc1"));
        assert_eq!(record.description, "");
    }

    #[test]
    fn test_null_description_gets_default() {
        let record = SiteRecord::from_attributes(attrs(
            json!({"name": "DC1", "slug": "dc1", "description": null}),
        ))
        .unwrap();
        assert_eq!(record.description, "");
    }

    #[test]
    fn test_bad_slug_is_rejected() {
        let err = SiteRecord::from_attributes(attrs(json!({"name": "DC1", "slug": "bad slug!"})))
            .unwrap_err();
        match err {
            NetboxError::ValidationError { field, message } => {
                assert_eq!(field, "slug");
                assert_eq!(message, "Must be like ^[-a-zA-Z0-9_]{1,50}$");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_fields() {
        let err = site_schema()
            .validate(&attrs(json!({"slug": "dc1"})))
            .unwrap_err();
        assert!(matches!(err, NetboxError::ValidationError { ref field, .. } if field == "name"));

        let err = site_schema()
            .validate(&attrs(json!({"name": "DC1", "slug": null})))
            .unwrap_err();
        assert!(matches!(err, NetboxError::ValidationError { ref field, .. } if field == "slug"));
    }

    #[test]
    fn test_typed_record_validation() {
        assert!(SiteRecord::new("DC1", "dc1").validate().is_ok());
        assert!(SiteRecord::new("DC1", "dc1")
            .with_description("anything goes here!")
            .validate()
            .is_ok());
        assert!(SiteRecord::new("DC1", "bad slug!").validate().is_err());
        assert!(SiteRecord::new("", "dc1").validate().is_err());
    }

    #[test]
    fn test_non_string_value_is_rejected() {
        let err = site_schema()
            .validate(&attrs(json!({"name": 5, "slug": "dc1"})))
            .unwrap_err();
        assert!(err.to_string().contains("expected a string"));
    }
}
