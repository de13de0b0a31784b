//! Vehicle document types for the search index.
//!
//! This module defines the document structure that is indexed in the search engine
//! and the deterministic identifier derived from it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Namespace used to derive document ids (the RFC 4122 DNS namespace).
pub const DOCUMENT_NAMESPACE: Uuid = Uuid::NAMESPACE_DNS;

/// Derive the version-5 UUID for a name under [`DOCUMENT_NAMESPACE`].
///
/// This is a pure function: the same name always yields the same id, which is
/// what makes re-indexing a document an overwrite rather than a duplicate.
///
/// # Example
///
/// ```
/// use registry_search_shared::document_uuid;
///
/// let id = document_uuid("python.org");
/// assert_eq!(id.to_string(), "886313e1-3b8a-5372-9b90-0c9aee199e5d");
/// ```
pub fn document_uuid(name: &str) -> Uuid {
    Uuid::new_v5(&DOCUMENT_NAMESPACE, name.as_bytes())
}

/// Document representation of a registered vehicle.
///
/// The serialized field names are the ones stored in the index and must stay
/// identical between the writer and every reader.
///
/// # Fields
///
/// - `plate_number`: Natural key of the vehicle, seeds the document id
/// - `owner`: Registered owner
/// - `valid_until`: Expiry date of the registration certificate
/// - `tags`: Free-form ordered tags
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VehicleDocument {
    #[serde(rename = "rendszam")]
    pub plate_number: String,
    #[serde(rename = "tulajdonos")]
    pub owner: String,
    #[serde(rename = "forgalmi_ervenyes")]
    pub valid_until: NaiveDate,
    #[serde(rename = "adatok", default)]
    pub tags: Vec<String>,
}

impl VehicleDocument {
    /// Index field holding the plate number.
    pub const PLATE_NUMBER_FIELD: &'static str = "rendszam";
    /// Index field holding the owner.
    pub const OWNER_FIELD: &'static str = "tulajdonos";
    /// Index field holding the registration expiry date.
    pub const VALID_UNTIL_FIELD: &'static str = "forgalmi_ervenyes";
    /// Index field holding the tags.
    pub const TAGS_FIELD: &'static str = "adatok";

    /// Create a new vehicle document.
    ///
    /// # Example
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use registry_search_shared::VehicleDocument;
    ///
    /// let doc = VehicleDocument::new(
    ///     "ABC-123",
    ///     "KZ",
    ///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    ///     vec!["data1".to_string()],
    /// );
    /// assert_eq!(doc.plate_number, "ABC-123");
    /// ```
    pub fn new(
        plate_number: impl Into<String>,
        owner: impl Into<String>,
        valid_until: NaiveDate,
        tags: Vec<String>,
    ) -> Self {
        Self {
            plate_number: plate_number.into(),
            owner: owner.into(),
            valid_until,
            tags,
        }
    }

    /// Generate the document ID used in the search index.
    ///
    /// The id is the version-5 UUID of the plate number, so indexing the same
    /// vehicle twice replaces the earlier document.
    pub fn document_id(&self) -> Uuid {
        document_uuid(&self.plate_number)
    }

    /// Check the document invariants before it is sent anywhere.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.plate_number.trim().is_empty() {
            return Err("plate number is required".to_string());
        }
        Ok(())
    }
}
