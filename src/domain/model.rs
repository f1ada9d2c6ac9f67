use crate::utils::error::{NetboxError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// 使用者宣告的站點期望狀態
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

impl SiteRecord {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// NetBox 回傳的站點資料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteSite {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl RemoteSite {
    pub fn to_record(&self) -> SiteRecord {
        SiteRecord {
            name: self.name.clone().unwrap_or_default(),
            slug: self.slug.clone().unwrap_or_default(),
            description: self.description.clone(),
        }
    }
}

// NetBox 對空白欄位可能回傳 null
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// create / partial update 的請求內容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WritableSite {
    pub name: String,
    pub slug: String,
    pub description: String,
}

impl From<&SiteRecord> for WritableSite {
    fn from(record: &SiteRecord) -> Self {
        Self {
            name: record.name.clone(),
            slug: record.slug.clone(),
            description: record.description.clone(),
        }
    }
}

/// NetBox 的分頁列表回應
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

/// 設定引擎保存的不透明識別碼，空字串表示遠端尚無對應資料。
///
/// 與遠端 `i64` 之間的轉換只在這裡發生：儲存時格式化為十進位字串，
/// 使用時再解析，解析失敗一律回報錯誤，不會預設為 0。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_remote(id: i64) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn parse(&self) -> Result<i64> {
        Ok(self.0.parse::<i64>()?)
    }

    /// 與 `parse` 相同，但失敗時回傳固定訊息
    pub fn to_remote(&self) -> Result<i64> {
        self.0
            .parse::<i64>()
            .map_err(|_| NetboxError::IdConversionError { id: self.0.clone() })
    }

    pub fn matches(&self, remote_id: i64) -> bool {
        !self.0.is_empty() && remote_id.to_string() == self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// 設定引擎與轉接器之間傳遞的記錄
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteState {
    #[serde(default)]
    pub id: ResourceId,
    #[serde(flatten)]
    pub record: SiteRecord,
}

impl SiteState {
    pub fn new(record: SiteRecord) -> Self {
        Self {
            id: ResourceId::default(),
            record,
        }
    }

    pub fn with_id(id: impl Into<ResourceId>, record: SiteRecord) -> Self {
        Self {
            id: id.into(),
            record,
        }
    }

    pub fn is_tracked(&self) -> bool {
        !self.id.is_empty()
    }
}

/// 在列表結果中尋找單筆資料的結果
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// 依識別碼從列表中挑出對應的站點
pub fn find_site(id: &ResourceId, sites: Vec<RemoteSite>) -> Lookup<RemoteSite> {
    sites
        .into_iter()
        .find(|site| id.matches(site.id))
        .map_or(Lookup::NotFound, Lookup::Found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(id: i64, name: &str) -> RemoteSite {
        RemoteSite {
            id,
            name: Some(name.to_string()),
            slug: Some(name.to_lowercase()),
            description: String::new(),
            url: None,
            display: None,
            last_updated: None,
        }
    }

    #[test]
    fn test_resource_id_conversions() {
        let id = ResourceId::from_remote(42);
        assert_eq!(id.as_str(), "42");
        assert_eq!(id.parse().unwrap(), 42);
        assert!(id.matches(42));
        assert!(!id.matches(420));

        let negative = ResourceId::from_remote(-7);
        assert_eq!(negative.parse().unwrap(), -7);
    }

    #[test]
    fn test_resource_id_rejects_malformed_values() {
        assert!(matches!(
            ResourceId::new("abc").parse(),
            Err(NetboxError::InvalidIdError(_))
        ));
        assert!(matches!(
            ResourceId::new("").parse(),
            Err(NetboxError::InvalidIdError(_))
        ));
        assert!(matches!(
            ResourceId::new("99999999999999999999").to_remote(),
            Err(NetboxError::IdConversionError { .. })
        ));
    }

    #[test]
    fn test_empty_id_matches_nothing() {
        let mut id = ResourceId::from_remote(0);
        id.clear();
        assert!(id.is_empty());
        assert!(!id.matches(0));
    }

    #[test]
    fn test_find_site_scans_results() {
        let sites = vec![remote(1, "DC1"), remote(42, "DC42")];

        match find_site(&ResourceId::new("42"), sites.clone()) {
            Lookup::Found(site) => assert_eq!(site.id, 42),
            Lookup::NotFound => panic!("site 42 should be found"),
        }

        assert_eq!(find_site(&ResourceId::new("7"), sites.clone()), Lookup::NotFound);
        assert_eq!(find_site(&ResourceId::default(), sites), Lookup::NotFound);
        assert_eq!(find_site(&ResourceId::new("1"), vec![]), Lookup::NotFound);
    }

    #[test]
    fn test_remote_site_decodes_netbox_payload() {
        let payload = serde_json::json!({
            "id": 42,
            "url": "http://netbox.local/api/dcim/sites/42/",
            "display": "DC1",
            "name": "DC1",
            "slug": "dc1",
            "status": {"value": "active", "label": "Active"},
            "description": "",
            "last_updated": "2024-03-01T10:00:00.123456Z"
        });

        let site: RemoteSite = serde_json::from_value(payload).unwrap();
        assert_eq!(site.id, 42);
        assert_eq!(site.to_record(), SiteRecord::new("DC1", "dc1"));
        assert!(site.last_updated.is_some());
    }

    #[test]
    fn test_remote_site_with_missing_fields() {
        let site: RemoteSite = serde_json::from_value(serde_json::json!({"id": 3})).unwrap();
        assert_eq!(site.to_record(), SiteRecord::default());
    }

    #[test]
    fn test_remote_site_null_description() {
        let site: RemoteSite = serde_json::from_value(serde_json::json!({
            "id": 4,
            "name": "DC4",
            "slug": "dc4",
            "description": null
        }))
        .unwrap();
        assert_eq!(site.description, "");
        assert_eq!(site.to_record(), SiteRecord::new("DC4", "dc4"));
    }

    #[test]
    fn test_site_state_serializes_flat() {
        let state = SiteState::with_id(
            "42",
            SiteRecord::new("DC1", "dc1").with_description("primary"),
        );
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": "42", "name": "DC1", "slug": "dc1", "description": "primary"})
        );

        let back: SiteState = serde_json::from_value(value).unwrap();
        assert_eq!(back, state);
    }
}
