use crate::domain::model::{ResourceId, SiteRecord, SiteState};
use crate::utils::error::{NetboxError, Result};
use crate::utils::validation::{validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// 宣告式的站點 manifest
///
/// ```toml
/// id = "42"
///
/// [netbox]
/// url = "https://netbox.example.com"
/// token = "${NETBOX_TOKEN}"
///
/// [site]
/// name = "DC1"
/// slug = "dc1"
/// description = "Primary datacenter"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteManifest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub netbox: Option<NetboxSection>,
    pub site: SiteRecord,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetboxSection {
    pub url: Option<String>,
    pub token: Option<String>,
}

impl SiteManifest {
    /// 從 TOML 檔案載入
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${NETBOX_TOKEN})，找不到的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR
            .get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// 命令列給的 id 優先於 manifest 內的 id
    pub fn into_state(self, id_override: Option<&str>) -> SiteState {
        let id = id_override
            .map(str::to_string)
            .or(self.id)
            .map(ResourceId::new)
            .unwrap_or_default();
        SiteState {
            id,
            record: self.site,
        }
    }
}

impl Validate for SiteManifest {
    fn validate(&self) -> Result<()> {
        if let Some(netbox) = &self.netbox {
            if let Some(url) = &netbox.url {
                validate_url("netbox.url", url)?;
            }
        }

        if let Some(id) = &self.id {
            if id.parse::<i64>().is_err() {
                return Err(NetboxError::ConfigValidationError {
                    field: "id".to_string(),
                    message: format!("'{}' is not a NetBox site id", id),
                });
            }
        }

        self.site.validate()
    }
}
