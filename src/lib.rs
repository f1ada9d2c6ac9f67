pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::netbox::NetboxClient;
pub use config::{NetboxConfig, SiteManifest};
pub use crate::core::{schema::site_schema, site_resource::SiteResource};
pub use domain::model::{Lookup, RemoteSite, ResourceId, SiteRecord, SiteState};
pub use domain::ports::{Resource, SiteClient};
pub use utils::error::{NetboxError, Result};
