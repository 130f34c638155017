use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{debug, error, info, warn};

use makemcserver::core::catalog::VersionManifest;
use makemcserver::core::config::{store::load_file, ConfigStore, Configuration};
use makemcserver::core::events::LogSink;
use makemcserver::core::http::build_http_client;
use makemcserver::core::loaders::LoaderKind;
use makemcserver::core::mods::ModStatus;
use makemcserver::core::server::{ServerOption, DEFAULT_PORT};
use makemcserver::{Pipeline, ProvisionError, ProvisionResult, RunOutcome, Selections};

/// Create a ready-to-run Minecraft server directory
#[derive(Parser, Debug)]
#[command(
    name = "makemcserver",
    version,
    about = "Create a ready-to-run Minecraft server directory",
    long_about = "Downloads the server for the chosen software and game version, installs \
                  the configured mods and writes server.properties, a start script and \
                  the EULA marker.\n\n\
                  Examples:\n  \
                  makemcserver --dir survival --software fabric --accept-eula\n  \
                  makemcserver --software paper --game-version 1.21.1 --preset WorldEdit\n  \
                  makemcserver --software vanilla --game-version snapshot --option offline-mode"
)]
struct Args {
    #[arg(long, default_value = ".", value_name = "DIR", help = "Directory to create the server in")]
    dir: PathBuf,

    #[arg(
        long,
        value_name = "VERSION",
        default_value = "latest",
        help = "Game version id, 'latest' or 'snapshot'"
    )]
    game_version: String,

    #[arg(long, default_value = "fabric", help = "fabric, paper, neoforge, forge or vanilla")]
    software: LoaderKind,

    #[arg(
        long = "preset",
        value_name = "NAME",
        help = "Mod preset to install (repeatable; defaults to the presets marked default)"
    )]
    presets: Vec<String>,

    #[arg(long, conflicts_with = "presets", help = "Install no presets, only default mods")]
    no_presets: bool,

    #[arg(
        long = "option",
        value_name = "OPTION",
        default_values_t = [ServerOption::Whitelist],
        help = "server.properties option (repeatable; replaces the default)"
    )]
    options: Vec<ServerOption>,

    #[arg(
        long,
        default_value_t = DEFAULT_PORT,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    port: u16,

    #[arg(long, help = "Accept the Minecraft EULA (https://aka.ms/MinecraftEULA)")]
    accept_eula: bool,

    #[arg(long, help = "Install vanilla when the software does not support the version")]
    vanilla_fallback: bool,

    #[arg(long, value_name = "FILE", help = "Configuration file; skips the default search")]
    config: Option<PathBuf>,
}

const EXIT_UNSUPPORTED: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    makemcserver::init_tracing();
    let args = Args::parse();
    debug!("Arguments: {:?}", args);

    match run(args).await {
        Ok(RunOutcome::Created {
            directory, mods, ..
        }) => {
            let missing: Vec<_> = mods
                .iter()
                .filter(|m| !matches!(m, ModStatus::Downloaded(_)))
                .map(ModStatus::id)
                .collect();
            if !missing.is_empty() {
                warn!("Mods not installed: {}", missing.join(", "));
            }
            info!("Server ready in {:?}", directory);
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Unsupported { reason }) => {
            warn!("{}; no server was created", reason);
            ExitCode::from(EXIT_UNSUPPORTED)
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config(args: &Args) -> ProvisionResult<Configuration> {
    match &args.config {
        Some(path) => {
            info!("Using configuration from {:?}", path);
            load_file(path)
        }
        None => ConfigStore::with_default_locations()
            .load()
            .map(|(config, _)| config),
    }
}

fn pick_version(manifest: &VersionManifest, requested: &str) -> ProvisionResult<String> {
    match requested {
        "latest" => Ok(manifest.latest.release.clone()),
        "snapshot" => manifest
            .latest
            .snapshot
            .clone()
            .ok_or_else(|| ProvisionError::UnknownVersion("snapshot".into())),
        id => Ok(id.to_string()),
    }
}

async fn run(args: Args) -> ProvisionResult<RunOutcome> {
    let config = load_config(&args)?;
    let client = build_http_client()?;
    let pipeline = Pipeline::new(config, Arc::new(client));
    let sink = LogSink;

    let manifest = pipeline.manifest(&sink).await?;
    let minecraft_version = pick_version(&manifest, &args.game_version)?;

    let presets = if args.no_presets || !args.software.supports_mods() {
        Vec::new()
    } else if args.presets.is_empty() {
        pipeline.config().default_presets(args.software)
    } else {
        args.presets
    };
    info!(
        "Creating {} {} server in {:?}",
        args.software.display_name(),
        minecraft_version,
        args.dir
    );

    let selections = Selections {
        directory: args.dir,
        minecraft_version,
        loader: args.software,
        presets,
        options: args.options.into_iter().collect::<BTreeSet<_>>(),
        port: args.port,
        eula_accepted: args.accept_eula,
        fallback_to_vanilla: args.vanilla_fallback,
    };

    pipeline.run(&manifest, &selections, &sink).await
}
