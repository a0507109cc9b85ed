use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use spec_autofill::domain::SpecDocument;
use spec_autofill::fill::{Autofill, AutofillError, SensingCatalog};
use spec_autofill::osm::{OsmClient, OsmConfig};
use spec_autofill::resolve::ResolveError;
use spec_autofill::routing::{OsrmClient, OsrmConfig};

/// Default catalog filename, looked up next to the input spec.
const SENSING_CONFIG_FILE: &str = "sensing_regimes.all.specs.json";

/// Expand a partial travel evaluation spec into a complete one.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path of the partial spec to read
    input: PathBuf,

    /// Path to write the filled spec to
    output: PathBuf,

    /// Sensing-configuration catalog file
    #[arg(long)]
    sensing_configs: Option<PathBuf>,

    /// Base URL of the OSM API
    #[arg(long)]
    osm_url: Option<String>,

    /// Base URL of the OSRM routing server
    #[arg(long)]
    osrm_url: Option<String>,
}

impl Args {
    fn catalog_path(&self) -> PathBuf {
        match &self.sensing_configs {
            Some(path) => path.clone(),
            None => match self.input.parent() {
                Some(dir) => dir.join(SENSING_CONFIG_FILE),
                None => PathBuf::from(SENSING_CONFIG_FILE),
            },
        }
    }
}

async fn run(args: &Args) -> Result<(), AutofillError> {
    let text = std::fs::read_to_string(&args.input)?;
    let doc: SpecDocument = serde_json::from_str(&text)?;
    let catalog = SensingCatalog::from_path(args.catalog_path())?;

    let mut osm_config = OsmConfig::new();
    if let Some(url) = &args.osm_url {
        osm_config = osm_config.with_base_url(url);
    }
    let mut osrm_config = OsrmConfig::new();
    if let Some(url) = &args.osrm_url {
        osrm_config = osrm_config.with_base_url(url);
    }

    let map = OsmClient::new(osm_config).map_err(ResolveError::from)?;
    let router = OsrmClient::new(osrm_config).map_err(ResolveError::from)?;
    let pipeline = Autofill::new(map, router, catalog);
    let filled = pipeline.run(doc).await?;

    // written only after every pass succeeded
    let out = serde_json::to_string_pretty(&filled)?;
    std::fs::write(&args.output, out)?;
    info!("wrote filled spec to {}", args.output.display());
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
