use crate::config::{NetboxConfig, NetboxSection};
use crate::domain::model::{SiteRecord, SiteState};
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "netbox-site")]
#[command(about = "Reconcile a NetBox site with a declared record", version)]
pub struct CliConfig {
    #[arg(long, env = "NETBOX_URL", global = true)]
    pub netbox_url: Option<String>,

    #[arg(long, env = "NETBOX_TOKEN", global = true, hide_env_values = true)]
    pub netbox_token: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Write logs as JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create the site and print its state
    Create(SiteArgs),
    /// Refresh state from NetBox, the id is cleared when the site is gone
    Read(IdArgs),
    /// Overwrite name, slug and description of an existing site
    Update {
        #[command(flatten)]
        target: IdArgs,
        #[command(flatten)]
        site: SiteArgs,
    },
    /// Delete the site, succeeding if it is already gone
    Delete(IdArgs),
    /// Report whether the site exists
    Exists(IdArgs),
    /// Create or update the site declared in a TOML manifest
    Apply {
        manifest: PathBuf,
        #[arg(long)]
        id: Option<String>,
    },
}

#[derive(Debug, Clone, Args)]
pub struct IdArgs {
    #[arg(long)]
    pub id: String,
}

#[derive(Debug, Clone, Args)]
pub struct SiteArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub slug: String,

    #[arg(long, default_value = "")]
    pub description: String,
}

impl SiteArgs {
    pub fn to_record(&self) -> SiteRecord {
        SiteRecord::new(&self.name, &self.slug).with_description(&self.description)
    }
}

impl IdArgs {
    pub fn to_state(&self) -> SiteState {
        SiteState::with_id(self.id.as_str(), SiteRecord::default())
    }
}

impl CliConfig {
    pub fn connection(&self, manifest: Option<&NetboxSection>) -> Result<NetboxConfig> {
        NetboxConfig::resolve(
            self.netbox_url.as_deref(),
            self.netbox_token.as_deref(),
            manifest,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create() {
        let config = CliConfig::try_parse_from([
            "netbox-site",
            "--netbox-url",
            "https://netbox.example.com",
            "--netbox-token",
            "abc",
            "create",
            "--name",
            "DC1",
            "--slug",
            "dc1",
        ])
        .unwrap();

        match &config.command {
            Command::Create(site) => assert_eq!(site.to_record(), SiteRecord::new("DC1", "dc1")),
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(config.connection(None).unwrap().token, "abc");
    }

    #[test]
    fn test_parse_update_with_global_flags_after_subcommand() {
        let config = CliConfig::try_parse_from([
            "netbox-site",
            "update",
            "--id",
            "42",
            "--name",
            "DC1",
            "--slug",
            "dc1",
            "--description",
            "primary",
            "--verbose",
        ])
        .unwrap();

        assert!(config.verbose);
        match config.command {
            Command::Update { target, site } => {
                assert_eq!(target.id, "42");
                assert_eq!(site.description, "primary");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_read_requires_id() {
        assert!(CliConfig::try_parse_from(["netbox-site", "read"]).is_err());
    }

    #[test]
    fn test_id_args_to_state() {
        let state = IdArgs {
            id: "99".to_string(),
        }
        .to_state();
        assert_eq!(state.id.as_str(), "99");
    }
}
