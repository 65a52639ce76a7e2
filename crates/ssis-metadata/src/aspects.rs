//! Aspect payloads carried by change proposals
//!
//! An aspect is one structured fact about a catalog entity. The `Aspect`
//! enum wraps every payload this crate produces and knows the catalog name
//! each one is stored under.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ssis_urn::{ControlFlowUrn, ControlTaskUrn, DatasetUrn, EntityType, PackageUrn};

use crate::constants::UNSET_TIME;

/// Who changed something, and when (milliseconds since the epoch)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStamp {
    pub time: i64,
    pub actor: String,
}

impl AuditStamp {
    pub fn new(actor: impl Into<String>, time: i64) -> Self {
        Self {
            time,
            actor: actor.into(),
        }
    }

    /// Stamp with the unset sentinel time
    pub fn unset(actor: impl Into<String>) -> Self {
        Self::new(actor, UNSET_TIME)
    }

    /// Stamp with the current wall-clock time
    pub fn now(actor: impl Into<String>) -> Self {
        Self::new(actor, chrono::Utc::now().timestamp_millis())
    }
}

/// Role an owner plays for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnershipType {
    Developer,
    TechnicalOwner,
    BusinessOwner,
    DataSteward,
    None,
}

/// Where an ownership claim came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnershipSourceType {
    /// Supplied by an ingestion pipeline
    Service,
    /// Entered by a person
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipSource {
    #[serde(rename = "type")]
    pub source_type: OwnershipSourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl OwnershipSource {
    pub fn service() -> Self {
        Self {
            source_type: OwnershipSourceType::Service,
            url: None,
        }
    }

    pub fn manual() -> Self {
        Self {
            source_type: OwnershipSourceType::Manual,
            url: None,
        }
    }
}

/// One owner entry: a user or group URN with its role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub owner: String,
    #[serde(rename = "type")]
    pub ownership_type: OwnershipType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<OwnershipSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ownership {
    pub owners: Vec<Owner>,
    pub last_modified: AuditStamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagAssociation {
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlobalTags {
    pub tags: Vec<TagAssociation>,
}

/// Soft-delete flag. `removed: false` marks an entity as present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Status {
    pub removed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SsisPackageInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub custom_properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SsisControlFlowInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub custom_properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    pub package_urn: PackageUrn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SsisControlTaskInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub custom_properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    pub control_flow_urn: ControlFlowUrn,
    #[serde(rename = "type")]
    pub task_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SsisDataFlowInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub custom_properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    pub control_task_urn: ControlTaskUrn,
}

/// User-editable description, kept apart from the pipeline-supplied one so
/// edits made in the catalog survive re-ingestion
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditableProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<AuditStamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<AuditStamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SsisControlTaskInputOutput {
    pub input_datasets: Vec<DatasetUrn>,
    pub output_datasets: Vec<DatasetUrn>,
    pub input_control_tasks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SsisDataFlowInputOutput {
    pub input_datasets: Vec<DatasetUrn>,
    pub output_datasets: Vec<DatasetUrn>,
    pub input_control_task: ControlTaskUrn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deprecation {
    pub deprecated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decommission_time: Option<i64>,
    pub note: String,
    pub actor: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionalMemoryMetadata {
    pub url: String,
    pub description: String,
    pub create_stamp: AuditStamp,
}

/// Links to documentation about an entity
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InstitutionalMemory {
    pub elements: Vec<InstitutionalMemoryMetadata>,
}

/// Every aspect this crate can produce, tagged with its catalog name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "aspectName", content = "aspect", rename_all = "camelCase")]
pub enum Aspect {
    SsisPackageInfo(SsisPackageInfo),
    SsisControlFlowInfo(SsisControlFlowInfo),
    SsisControlTaskInfo(SsisControlTaskInfo),
    SsisDataFlowInfo(SsisDataFlowInfo),
    EditableSsisPackageProperties(EditableProperties),
    EditableSsisControlFlowProperties(EditableProperties),
    EditableSsisControlTaskProperties(EditableProperties),
    EditableSsisDataFlowProperties(EditableProperties),
    SsisControlTaskInputOutput(SsisControlTaskInputOutput),
    SsisDataFlowInputOutput(SsisDataFlowInputOutput),
    Ownership(Ownership),
    GlobalTags(GlobalTags),
    Status(Status),
    Deprecation(Deprecation),
    InstitutionalMemory(InstitutionalMemory),
}

impl Aspect {
    /// Catalog aspect name (matches the serialized `aspectName`)
    pub fn name(&self) -> &'static str {
        match self {
            Self::SsisPackageInfo(_) => "ssisPackageInfo",
            Self::SsisControlFlowInfo(_) => "ssisControlFlowInfo",
            Self::SsisControlTaskInfo(_) => "ssisControlTaskInfo",
            Self::SsisDataFlowInfo(_) => "ssisDataFlowInfo",
            Self::EditableSsisPackageProperties(_) => "editableSsisPackageProperties",
            Self::EditableSsisControlFlowProperties(_) => "editableSsisControlFlowProperties",
            Self::EditableSsisControlTaskProperties(_) => "editableSsisControlTaskProperties",
            Self::EditableSsisDataFlowProperties(_) => "editableSsisDataFlowProperties",
            Self::SsisControlTaskInputOutput(_) => "ssisControlTaskInputOutput",
            Self::SsisDataFlowInputOutput(_) => "ssisDataFlowInputOutput",
            Self::Ownership(_) => "ownership",
            Self::GlobalTags(_) => "globalTags",
            Self::Status(_) => "status",
            Self::Deprecation(_) => "deprecation",
            Self::InstitutionalMemory(_) => "institutionalMemory",
        }
    }

    /// Wrap editable properties under the aspect name of the given kind
    pub fn editable_properties(entity_type: EntityType, properties: EditableProperties) -> Self {
        match entity_type {
            EntityType::SsisPackage => Self::EditableSsisPackageProperties(properties),
            EntityType::SsisControlFlow => Self::EditableSsisControlFlowProperties(properties),
            EntityType::SsisControlTask => Self::EditableSsisControlTaskProperties(properties),
            EntityType::SsisDataFlow => Self::EditableSsisDataFlowProperties(properties),
        }
    }

    /// Display name carried by an info aspect, if this is one
    pub fn info_name(&self) -> Option<&str> {
        match self {
            Self::SsisPackageInfo(info) => Some(&info.name),
            Self::SsisControlFlowInfo(info) => Some(&info.name),
            Self::SsisControlTaskInfo(info) => Some(&info.name),
            Self::SsisDataFlowInfo(info) => Some(&info.name),
            _ => None,
        }
    }
}

macro_rules! aspect_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Aspect {
                fn from(aspect: $variant) -> Self {
                    Self::$variant(aspect)
                }
            }
        )*
    };
}

aspect_from!(
    SsisPackageInfo,
    SsisControlFlowInfo,
    SsisControlTaskInfo,
    SsisDataFlowInfo,
    SsisControlTaskInputOutput,
    SsisDataFlowInputOutput,
    Ownership,
    GlobalTags,
    Status,
    Deprecation,
    InstitutionalMemory,
);
