use crate::domain::model::{RemoteSite, WritableSite};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConnectionProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn token(&self) -> &str;
}

/// NetBox `dcim/sites` 端點
#[async_trait]
pub trait SiteClient: Send + Sync {
    /// 以 id 過濾列出站點，結果可能為空
    async fn list_sites(&self, id: &str) -> Result<Vec<RemoteSite>>;
    async fn create_site(&self, site: &WritableSite) -> Result<RemoteSite>;
    async fn partial_update_site(&self, id: i64, site: &WritableSite) -> Result<RemoteSite>;
    async fn delete_site(&self, id: i64) -> Result<()>;
}

/// 設定引擎呼叫的資源生命週期
#[async_trait]
pub trait Resource: Send + Sync {
    type State: Send + Sync;
    type Client: ?Sized + Sync;

    async fn create(&self, state: &mut Self::State, client: &Self::Client) -> Result<()>;
    async fn read(&self, state: &mut Self::State, client: &Self::Client) -> Result<()>;
    async fn update(&self, state: &mut Self::State, client: &Self::Client) -> Result<()>;
    async fn delete(&self, state: &mut Self::State, client: &Self::Client) -> Result<()>;
    async fn exists(&self, state: &Self::State, client: &Self::Client) -> Result<bool>;
}
