use crate::domain::model::{find_site, Lookup, RemoteSite, ResourceId, SiteState, WritableSite};
use crate::domain::ports::{Resource, SiteClient};
use crate::utils::error::Result;
use async_trait::async_trait;

/// NetBox 站點 (dcim/sites) 的 CRUD 轉接器。
///
/// 本身不保存任何狀態，每次操作都由引擎傳入記錄與 client。
/// 遠端資料是否存在只透過 `read` / `exists` 觀察。
#[derive(Debug, Clone, Copy, Default)]
pub struct SiteResource;

impl SiteResource {
    pub fn new() -> Self {
        Self
    }

    async fn lookup(
        &self,
        id: &ResourceId,
        client: &dyn SiteClient,
    ) -> Result<Lookup<RemoteSite>> {
        if id.is_empty() {
            return Ok(Lookup::NotFound);
        }

        let sites = client.list_sites(id.as_str()).await?;
        tracing::debug!("Listed {} site(s) for id {}", sites.len(), id);
        Ok(find_site(id, sites))
    }
}

#[async_trait]
impl Resource for SiteResource {
    type State = SiteState;
    type Client = dyn SiteClient;

    async fn create(&self, state: &mut SiteState, client: &Self::Client) -> Result<()> {
        let payload = WritableSite::from(&state.record);
        tracing::debug!("Creating site '{}' ({})", payload.name, payload.slug);

        let created = client.create_site(&payload).await?;
        state.id = ResourceId::from_remote(created.id);
        tracing::info!("✅ Created site '{}' with id {}", payload.slug, state.id);

        self.read(state, client).await
    }

    async fn read(&self, state: &mut SiteState, client: &Self::Client) -> Result<()> {
        match self.lookup(&state.id, client).await? {
            Lookup::Found(site) => {
                tracing::debug!("Refreshed site {} from NetBox", site.id);
                state.record = site.to_record();
            }
            Lookup::NotFound => {
                if state.is_tracked() {
                    tracing::warn!("Site {} no longer exists in NetBox", state.id);
                }
                state.id.clear();
            }
        }
        Ok(())
    }

    async fn update(&self, state: &mut SiteState, client: &Self::Client) -> Result<()> {
        let id = state.id.parse()?;
        let payload = WritableSite::from(&state.record);
        tracing::debug!("Updating site {} to '{}' ({})", id, payload.name, payload.slug);

        client.partial_update_site(id, &payload).await?;
        tracing::info!("✅ Updated site {}", id);

        self.read(state, client).await
    }

    async fn delete(&self, state: &mut SiteState, client: &Self::Client) -> Result<()> {
        if !self.exists(state, client).await? {
            tracing::debug!("Site {} already absent, nothing to delete", state.id);
            return Ok(());
        }

        let id = state.id.to_remote()?;
        client.delete_site(id).await?;
        tracing::info!("🗑️ Deleted site {}", id);
        Ok(())
    }

    async fn exists(&self, state: &SiteState, client: &Self::Client) -> Result<bool> {
        Ok(self.lookup(&state.id, client).await?.is_found())
    }
}
