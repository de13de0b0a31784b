//! The demo sequence: index one vehicle, search for it, then list the index.

use chrono::NaiveDate;
use futures::TryStreamExt;
use serde_json::Value;
use tracing::info;

use crate::config::Settings;
use crate::RegistryError;
use registry_search_repository::{IndexedDocument, SearchIndexClient};
use registry_search_shared::{SearchHit, VehicleDocument};

/// Owner of the demo vehicle.
pub const DEMO_OWNER: &str = "KZ";

/// Tags of the demo vehicle.
pub const DEMO_TAGS: [&str; 3] = ["data1", "data2", "data3"];

/// Regular expression the demo searches with.
pub const DEMO_SEARCH_TERM: &str = ".*ABC.*";

/// Options of a demo run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoOptions {
    /// Delete and recreate the index before indexing.
    pub recreate_index: bool,
    /// Plate number of the demo vehicle.
    pub plate_number: String,
}

impl From<&Settings> for DemoOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            recreate_index: settings.recreate_index,
            plate_number: settings.demo_plate_number.clone(),
        }
    }
}

/// What a demo run did.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoReport {
    pub indexed: IndexedDocument,
    pub search_hits: Vec<SearchHit>,
    pub documents_listed: usize,
}

/// The vehicle the demo indexes.
pub fn demo_vehicle(plate_number: &str) -> Result<VehicleDocument, RegistryError> {
    let valid_until = NaiveDate::from_ymd_opt(2024, 1, 1)
        .ok_or_else(|| RegistryError::config("invalid demo validity date"))?;

    Ok(VehicleDocument::new(
        plate_number,
        DEMO_OWNER,
        valid_until,
        DEMO_TAGS.iter().map(|tag| tag.to_string()).collect(),
    ))
}

/// Run the demo against an initialized client.
///
/// Hits are printed to stdout, one JSON object per line, and progress is logged.
pub async fn run(
    client: &SearchIndexClient,
    options: &DemoOptions,
) -> Result<DemoReport, RegistryError> {
    if options.recreate_index {
        if client.delete_index().await {
            info!("Deleted existing index");
        }
        client.create_index().await?;
    } else if client.ensure_index().await? {
        info!("Created missing index");
    }

    let document = demo_vehicle(&options.plate_number)?;
    let indexed = client.add_document(&document).await?;
    client.refresh_index().await?;

    let response = client.search(DEMO_SEARCH_TERM).await?;
    info!(
        term = DEMO_SEARCH_TERM,
        total = response.total,
        "Search results"
    );
    for hit in &response.hits {
        print_hit(hit);
    }

    let mut documents = client.get_all_documents()?;
    let mut documents_listed = 0;
    while let Some(hit) = documents.try_next().await? {
        print_hit(&hit);
        documents_listed += 1;
    }
    info!(count = documents_listed, "Listed all documents");

    Ok(DemoReport {
        indexed,
        search_hits: response.hits,
        documents_listed,
    })
}

fn print_hit(hit: &SearchHit) {
    println!("{} {}", hit.id, Value::Object(hit.fields.clone()));
}
