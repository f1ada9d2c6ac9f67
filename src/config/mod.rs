#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConnectionProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_required_field, validate_url, Validate,
};
use std::fmt;

pub use toml_config::{NetboxSection, SiteManifest};

/// NetBox 連線設定
#[derive(Clone, PartialEq, Eq)]
pub struct NetboxConfig {
    pub url: String,
    pub token: String,
}

impl NetboxConfig {
    /// 合併命令列 / 環境變數與 manifest 的連線設定，前者優先
    pub fn resolve(
        url: Option<&str>,
        token: Option<&str>,
        fallback: Option<&NetboxSection>,
    ) -> Result<Self> {
        let url = url
            .map(str::to_string)
            .or_else(|| fallback.and_then(|section| section.url.clone()));
        let token = token
            .map(str::to_string)
            .or_else(|| fallback.and_then(|section| section.token.clone()));

        let config = Self {
            url: validate_required_field("netbox.url", &url)?.clone(),
            token: validate_required_field("netbox.token", &token)?.clone(),
        };
        config.validate()?;
        Ok(config)
    }
}

impl fmt::Debug for NetboxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetboxConfig")
            .field("url", &self.url)
            .field("token", &"***")
            .finish()
    }
}

impl ConnectionProvider for NetboxConfig {
    fn base_url(&self) -> &str {
        &self.url
    }

    fn token(&self) -> &str {
        &self.token
    }
}

impl Validate for NetboxConfig {
    fn validate(&self) -> Result<()> {
        validate_url("netbox.url", &self.url)?;
        validate_non_empty_string("netbox.token", &self.token)?;
        Ok(())
    }
}
