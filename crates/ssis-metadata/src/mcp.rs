//! Metadata change proposals
//!
//! A proposal is a single (entity URN, aspect) record submitted to the
//! catalog. Serialized form:
//!
//! ```json
//! {"entityType": "ssisPackage", "entityUrn": "urn:li:ssisPackage:(...)",
//!  "changeType": "UPSERT", "aspectName": "status", "aspect": {"removed": false}}
//! ```

use serde::{Deserialize, Serialize};
use ssis_urn::{DatasetUrn, EntityType};

use crate::aspects::{Aspect, Status};

/// How the catalog applies a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    /// Insert or overwrite the aspect
    #[default]
    Upsert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataChangeProposal {
    pub entity_type: String,
    pub entity_urn: String,
    #[serde(default)]
    pub change_type: ChangeType,
    #[serde(flatten)]
    pub aspect: Aspect,
}

impl MetadataChangeProposal {
    /// Upsert an aspect on an arbitrary entity
    pub fn upsert(
        entity_type: impl Into<String>,
        entity_urn: impl Into<String>,
        aspect: impl Into<Aspect>,
    ) -> Self {
        Self {
            entity_type: entity_type.into(),
            entity_urn: entity_urn.into(),
            change_type: ChangeType::Upsert,
            aspect: aspect.into(),
        }
    }

    /// Upsert an aspect on an SSIS entity
    pub fn for_entity(entity_type: EntityType, entity_urn: &str, aspect: impl Into<Aspect>) -> Self {
        Self::upsert(entity_type.as_str(), entity_urn, aspect)
    }

    /// Mark a referenced dataset as present in the catalog
    pub fn dataset_present(dataset: &DatasetUrn) -> Self {
        Self::upsert(
            dataset.entity_type(),
            dataset.as_str(),
            Status { removed: false },
        )
    }

    pub fn aspect_name(&self) -> &'static str {
        self.aspect.name()
    }
}
