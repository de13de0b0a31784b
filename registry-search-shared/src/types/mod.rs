//! This module defines the core data structures used across the registry search client.
//! It re-exports the vehicle document and the search query and result types.

pub mod search_query;
pub mod search_result;
pub mod vehicle_document;

pub use search_query::{MatchMode, SearchQuery};
pub use search_result::{SearchHit, SearchResponse};
pub use vehicle_document::VehicleDocument;
