use anyhow::Context;
use clap::Parser;
use netbox_sites::config::cli::{CliConfig, Command};
use netbox_sites::utils::error::ErrorCategory;
use netbox_sites::utils::{logger, validation::Validate};
use netbox_sites::{NetboxClient, NetboxError, Resource, SiteManifest, SiteResource, SiteState};

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose, config.log_json);
    tracing::info!("Starting netbox-site {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(config).await {
        let exit_code = match e.downcast_ref::<NetboxError>() {
            Some(err) => {
                tracing::error!("❌ {:#} (Category: {:?})", e, err.category());
                eprintln!("❌ {}", err.user_friendly_message());
                exit_code(err.category())
            }
            None => {
                tracing::error!("❌ {:#}", e);
                eprintln!("❌ {:#}", e);
                1
            }
        };
        std::process::exit(exit_code);
    }
}

fn exit_code(category: ErrorCategory) -> i32 {
    match category {
        ErrorCategory::Validation | ErrorCategory::Configuration | ErrorCategory::Identifier => 1,
        ErrorCategory::Network | ErrorCategory::Remote => 2,
        ErrorCategory::Data => 3,
    }
}

async fn run(config: CliConfig) -> anyhow::Result<()> {
    let manifest = match &config.command {
        Command::Apply { manifest, .. } => {
            let loaded = SiteManifest::from_file(manifest)
                .with_context(|| format!("Failed to load manifest {}", manifest.display()))?;
            loaded.validate()?;
            Some(loaded)
        }
        _ => None,
    };

    let connection = config.connection(manifest.as_ref().and_then(|m| m.netbox.as_ref()))?;
    tracing::debug!("Using {:?}", connection);
    let client = NetboxClient::new(&connection)?;
    let resource = SiteResource::new();

    match config.command {
        Command::Create(site) => {
            let record = site.to_record();
            record.validate()?;
            let mut state = SiteState::new(record);
            resource.create(&mut state, &client).await?;
            print_json(&state)?;
        }
        Command::Read(target) => {
            let mut state = target.to_state();
            resource.read(&mut state, &client).await?;
            print_json(&state)?;
        }
        Command::Update { target, site } => {
            let record = site.to_record();
            record.validate()?;
            let mut state = SiteState::with_id(target.id.as_str(), record);
            resource.update(&mut state, &client).await?;
            print_json(&state)?;
        }
        Command::Delete(target) => {
            let mut state = target.to_state();
            resource.delete(&mut state, &client).await?;
            print_json(&serde_json::json!({ "id": target.id, "deleted": true }))?;
        }
        Command::Exists(target) => {
            let exists = resource.exists(&target.to_state(), &client).await?;
            print_json(&serde_json::json!({ "id": target.id, "exists": exists }))?;
        }
        Command::Apply { id, .. } => {
            let manifest = manifest.context("manifest was not loaded")?;
            let mut state = manifest.into_state(id.as_deref());
            apply(&resource, &mut state, &client).await?;
            print_json(&state)?;
        }
    }

    Ok(())
}

/// 有 id 且遠端仍存在就更新，否則建立新的站點
async fn apply(
    resource: &SiteResource,
    state: &mut SiteState,
    client: &NetboxClient,
) -> netbox_sites::Result<()> {
    if state.is_tracked() && resource.exists(state, client).await? {
        tracing::info!("🔄 Site {} exists, updating", state.id);
        resource.update(state, client).await
    } else {
        tracing::info!("🆕 Creating site '{}'", state.record.slug);
        resource.create(state, client).await
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
