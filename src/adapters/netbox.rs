use crate::domain::model::{Page, RemoteSite, WritableSite};
use crate::domain::ports::{ConnectionProvider, SiteClient};
use crate::utils::error::{NetboxError, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response};
use url::Url;

const SITES_PATH: &str = "api/dcim/sites/";

/// NetBox REST API 的 `SiteClient` 實作
#[derive(Clone)]
pub struct NetboxClient {
    client: Client,
    sites_url: Url,
    token: String,
}

impl NetboxClient {
    pub fn new<C: ConnectionProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("netbox-sites/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(client, config)
    }

    pub fn with_client<C: ConnectionProvider>(client: Client, config: &C) -> Result<Self> {
        let mut base = Url::parse(config.base_url()).map_err(|e| {
            NetboxError::InvalidConfigValueError {
                field: "netbox.url".to_string(),
                value: config.base_url().to_string(),
                reason: format!("Invalid URL format: {}", e),
            }
        })?;

        // 確保以 / 結尾，否則 join 會吃掉最後一段路徑
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let sites_url = base
            .join(SITES_PATH)
            .map_err(|e| NetboxError::ConfigError {
                message: format!("Cannot build sites endpoint: {}", e),
            })?;

        Ok(Self {
            client,
            sites_url,
            token: config.token().to_string(),
        })
    }

    pub fn sites_url(&self) -> &Url {
        &self.sites_url
    }

    fn site_url(&self, id: i64) -> Result<Url> {
        self.sites_url
            .join(&format!("{}/", id))
            .map_err(|e| NetboxError::ConfigError {
                message: format!("Cannot build site endpoint for {}: {}", id, e),
            })
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header(AUTHORIZATION, format!("Token {}", self.token))
            .header(ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.authorized(request).send().await?;
        let status = response.status();
        tracing::debug!("📡 NetBox response status: {}", status);

        if status.is_success() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("Failed to read NetBox error body: {}", e);
                String::new()
            }
        };
        tracing::debug!("NetBox error body: {}", body);
        Err(NetboxError::HttpStatusError {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl SiteClient for NetboxClient {
    async fn list_sites(&self, id: &str) -> Result<Vec<RemoteSite>> {
        tracing::debug!("GET {} ?id={}", self.sites_url, id);
        let request = self.client.get(self.sites_url.clone()).query(&[("id", id)]);
        let page: Page<RemoteSite> = self.send(request).await?.json().await?;
        Ok(page.results)
    }

    async fn create_site(&self, site: &WritableSite) -> Result<RemoteSite> {
        tracing::debug!("POST {}", self.sites_url);
        let request = self.client.post(self.sites_url.clone()).json(site);
        Ok(self.send(request).await?.json().await?)
    }

    async fn partial_update_site(&self, id: i64, site: &WritableSite) -> Result<RemoteSite> {
        let url = self.site_url(id)?;
        tracing::debug!("PATCH {}", url);
        let request = self.client.patch(url).json(site);
        Ok(self.send(request).await?.json().await?)
    }

    async fn delete_site(&self, id: i64) -> Result<()> {
        let url = self.site_url(id)?;
        tracing::debug!("DELETE {}", url);
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}
