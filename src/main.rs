use dotenvy::dotenv;
use province_atlas::{
    config::{self, database},
    core::AtlasStore,
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();

    // 3. Load the type catalog
    let config_path =
        std::env::var("ATLAS_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let catalog = config::load_catalog_or_default(&config_path)
        .inspect_err(|e| error!("Failed to load catalog: {}", e))?;

    // 4. Connect and make sure the blob table exists
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 5. Open the store and report its current state
    let store = AtlasStore::open(db, catalog).await?;
    let stats = store.statistics();
    info!(
        "{} projects ({} active), {} hotels ({} active)",
        stats.projects.total, stats.projects.active, stats.hotels.total, stats.hotels.active
    );
    info!(
        "{} employees across {} provinces",
        stats.total_employees, stats.provinces_with_employees
    );
    for (rank, province) in stats.top_provinces.iter().enumerate() {
        info!(
            "#{} {}: {} items",
            rank + 1,
            province.province_name,
            province.total()
        );
    }
    if let Some(imported_at) = store.last_excel_import() {
        info!("Employees last imported at {}", imported_at.to_rfc3339());
    }

    Ok(())
}
