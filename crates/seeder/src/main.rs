//! `catalog-seeder` -- populate the catalog with sample media and records.
//!
//! Uploads up to five videos and five thumbnails from the asset directory,
//! attaches their URLs to five sample records and upserts the records.
//! Safe to re-run: uploads overwrite and records are upserted.
//!
//! # Environment variables
//!
//! | Variable                        | Required | Default     |
//! |---------------------------------|----------|-------------|
//! | `BLOB_STORE_CONNECTION_STRING`  | yes      | --          |
//! | `DOCUMENT_STORE_ENDPOINT`       | yes      | --          |
//! | `DOCUMENT_STORE_KEY`            | yes      | --          |
//! | `CATALOG_API_URL`               | yes      | --          |
//! | `DOCUMENT_STORE_DATABASE`       | no       | `NetflixDB` |
//! | `DOCUMENT_STORE_CONTAINER`      | no       | `movies`    |
//! | `SEED_ASSETS_DIR`               | no       | `./assets`  |

use std::io;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_seeder::assets::{check_layout, AssetPlan};
use catalog_seeder::config::SeedConfig;
use catalog_seeder::error::SeedError;
use catalog_seeder::prompt::confirm;
use catalog_seeder::run::Seeder;
use catalog_seeder::samples::sample_records;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_seeder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Seeding aborted");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), SeedError> {
    let config = SeedConfig::from_env()?;
    tracing::info!(assets_dir = %config.assets_dir.display(), "Starting catalog seeder");

    for warning in check_layout(&config.assets_dir) {
        tracing::warn!("{warning}");
    }

    let records = sample_records();
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    let plan = AssetPlan::discover(&config.assets_dir, &ids)?;
    println!("\n{plan}");

    let confirmed = confirm(
        &mut io::stdin().lock(),
        &mut io::stdout(),
        "Continue with the upload and record population?",
    )?;
    if !confirmed {
        tracing::info!("Operation cancelled");
        return Ok(());
    }

    let seeder = Seeder::new(config.connect()?);
    let report = seeder.run(&plan, records).await;

    if report.is_clean() {
        tracing::info!(%report, "Seeding complete");
    } else {
        tracing::warn!(%report, "Seeding finished with failures");
    }

    println!("\nNext steps:");
    println!("  1. Check the uploaded files in the blob store");
    println!("  2. Check the records in the document store");
    println!("  3. Try the catalog API at {}", config.api_url);
    Ok(())
}
