//! Request and response types for search index operations.

use registry_search_shared::{SearchHit, VehicleDocument};

/// Type of a mapped index field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Exact-match string field. Array values are allowed.
    Keyword,
    /// Date field.
    Date,
}

impl FieldType {
    /// The engine's name for this field type.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Keyword => "keyword",
            FieldType::Date => "date",
        }
    }
}

/// Mapping of a single index field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    /// The field name as stored in documents.
    pub name: String,
    /// The field type.
    pub field_type: FieldType,
}

impl FieldMapping {
    /// Create a new field mapping.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Everything needed to create an index: its name, sharding and field mapping.
///
/// A descriptor is only used at creation time. Changing the mapping of an
/// existing index is not supported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDescriptor {
    /// The index name.
    pub name: String,
    /// Number of primary shards.
    pub number_of_shards: u32,
    /// Number of replicas.
    pub number_of_replicas: u32,
    /// Field mappings in declaration order.
    pub fields: Vec<FieldMapping>,
}

impl IndexDescriptor {
    /// Describe the vehicle index.
    ///
    /// Plate number, owner and tags are exact-match keyword fields and the
    /// registration expiry is a date field.
    pub fn vehicles(
        name: impl Into<String>,
        number_of_shards: u32,
        number_of_replicas: u32,
    ) -> Self {
        Self {
            name: name.into(),
            number_of_shards,
            number_of_replicas,
            fields: vec![
                FieldMapping::new(VehicleDocument::PLATE_NUMBER_FIELD, FieldType::Keyword),
                FieldMapping::new(VehicleDocument::OWNER_FIELD, FieldType::Keyword),
                FieldMapping::new(VehicleDocument::VALID_UNTIL_FIELD, FieldType::Date),
                FieldMapping::new(VehicleDocument::TAGS_FIELD, FieldType::Keyword),
            ],
        }
    }
}

/// Outcome of indexing a single document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedDocument {
    /// The index the document was written to.
    pub index: String,
    /// The document id.
    pub id: String,
    /// The engine's result string ("created" or "updated").
    pub result: String,
}

/// One page of a scroll.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollPage {
    /// Cursor for the next page. The engine returns it with every page.
    pub scroll_id: Option<String>,
    /// Hits on this page. An empty page means the scroll is exhausted.
    pub hits: Vec<SearchHit>,
}

impl ScrollPage {
    /// Returns true if this page signals the end of the scroll.
    pub fn is_exhausted(&self) -> bool {
        self.hits.is_empty()
    }
}
