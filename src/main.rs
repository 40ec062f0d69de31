use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use property_search::config::Config;
use property_search::logging;
use property_search::repository::{sample_catalog, InMemoryRepository, PropertyRepository};
use property_search::search::{search_repository, SearchQuery};
use property_search::server::{start_server, AppState};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "property-search")]
#[command(about = "Search a property catalog from the command line or over HTTP")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP search service
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// JSON catalog file (defaults to the built-in sample catalog)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Run a single search and print the results
    Search(SearchArgs),
}

#[derive(clap::Args)]
struct SearchArgs {
    /// JSON catalog file (defaults to the built-in sample catalog)
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// rent, buy, service-apartment, rent-to-own or all
    #[arg(long)]
    property_type: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    keywords: Option<String>,
    #[arg(long)]
    min_price: Option<f64>,
    #[arg(long)]
    max_price: Option<f64>,
    #[arg(long)]
    bedrooms: Option<u32>,
    #[arg(long)]
    bathrooms: Option<u32>,
    /// Amenities that must be present (repeatable or comma-separated)
    #[arg(long, value_enum, value_delimiter = ',')]
    require: Vec<AmenityArg>,
    /// include, exclude or only
    #[arg(long)]
    retirement_homes: Option<String>,
    #[arg(long)]
    shared_ownership: Option<String>,
    #[arg(long)]
    auctions: Option<String>,
    #[arg(long)]
    new_build: Option<String>,
    #[arg(long)]
    off_plan: Option<String>,
    /// featured, price-low, price-high or newest
    #[arg(long)]
    sort_by: Option<String>,
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    page_size: Option<u32>,
    /// Print the raw result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum AmenityArg {
    Furnished,
    Parking,
    Garden,
    Pool,
    Gym,
    Verified,
    Serviced,
    Electricity,
    WaterSupply,
    Security,
    Balcony,
    ChainFree,
    ReducedPrice,
    UnderOffer,
}

impl SearchArgs {
    fn to_query(&self) -> SearchQuery {
        let mut query = SearchQuery {
            property_type: self.property_type.clone(),
            category: self.category.clone(),
            location: self.location.clone(),
            keywords: self.keywords.clone(),
            price_min: self.min_price,
            price_max: self.max_price,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            retirement_homes: self.retirement_homes.clone(),
            shared_ownership: self.shared_ownership.clone(),
            auctions: self.auctions.clone(),
            new_build: self.new_build.clone(),
            off_plan: self.off_plan.clone(),
            sort_by: self.sort_by.clone(),
            page: self.page,
            page_size: self.page_size,
            ..Default::default()
        };

        for amenity in &self.require {
            let flag = match amenity {
                AmenityArg::Furnished => &mut query.furnished,
                AmenityArg::Parking => &mut query.parking,
                AmenityArg::Garden => &mut query.garden,
                AmenityArg::Pool => &mut query.pool,
                AmenityArg::Gym => &mut query.gym,
                AmenityArg::Verified => &mut query.verified,
                AmenityArg::Serviced => &mut query.serviced,
                AmenityArg::Electricity => &mut query.electricity,
                AmenityArg::WaterSupply => &mut query.water_supply,
                AmenityArg::Security => &mut query.security,
                AmenityArg::Balcony => &mut query.balcony,
                AmenityArg::ChainFree => &mut query.is_chain_free,
                AmenityArg::ReducedPrice => &mut query.has_reduced_price,
                AmenityArg::UnderOffer => &mut query.is_under_offer,
            };
            *flag = Some(true);
        }

        query
    }
}

async fn load_repository(catalog: Option<&Path>) -> Result<InMemoryRepository> {
    match catalog {
        Some(path) => InMemoryRepository::from_json_file(path).await,
        None => {
            info!("📋 No catalog file configured, using the sample catalog");
            Ok(InMemoryRepository::with_catalog(sample_catalog())?)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { host, port, catalog } => {
            let catalog = catalog.or(config.catalog.path.clone());
            let repository = load_repository(catalog.as_deref()).await?;
            info!("🏠 Property Search - {} listings", repository.len().await?);

            let host = host.unwrap_or(config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let addr: SocketAddr = format!("{host}:{port}")
                .parse()
                .with_context(|| format!("Invalid listen address {host}:{port}"))?;

            let state = AppState::new(Arc::new(repository), config.search);
            start_server(state, addr).await?;
        }
        Commands::Search(args) => {
            let catalog = args.catalog.clone().or(config.catalog.path.clone());
            let repository = load_repository(catalog.as_deref()).await?;

            let (filters, page) = args
                .to_query()
                .into_request(config.search.default_page_size, config.search.max_page_size)?;
            let result = search_repository(&repository, &filters, page).await?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
                return Ok(());
            }

            info!(
                "✅ {} matching properties (page {} of {})",
                result.total,
                result.page,
                result.total_pages().max(1)
            );

            let offset = (result.page as usize - 1) * result.page_size as usize;
            for (i, property) in result.properties.iter().enumerate() {
                println!(
                    "{}. {} ({:.0} {})",
                    offset + i + 1,
                    property.title,
                    property.price,
                    property.currency
                );
                println!(
                    "   {} · {} bed, {} bath · {}, {}",
                    property.property_type,
                    property.bedrooms,
                    property.bathrooms,
                    property.location,
                    property.city
                );
                let amenities = property.amenities.labels();
                if !amenities.is_empty() {
                    println!("   Amenities: {}", amenities.join(", "));
                }
                println!("   ID: {}", property.id);
                println!();
            }
        }
    }

    Ok(())
}
