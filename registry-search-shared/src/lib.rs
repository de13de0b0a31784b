//! # Registry Search Shared
//!
//! This crate defines the data structures shared by the registry search client
//! and its callers: the vehicle document that is indexed, the deterministic
//! document id derived from it, and the query and result types used by search.

pub mod types;

pub use types::search_query::{MatchMode, SearchQuery};
pub use types::search_result::{SearchHit, SearchResponse};
pub use types::vehicle_document::{document_uuid, VehicleDocument, DOCUMENT_NAMESPACE};
