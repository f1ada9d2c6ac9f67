pub mod schema;
pub mod site_resource;

pub use crate::domain::model::{Lookup, RemoteSite, ResourceId, SiteRecord, SiteState};
pub use crate::domain::ports::{ConnectionProvider, Resource, SiteClient};
pub use crate::utils::error::Result;
