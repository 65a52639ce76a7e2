//! The closed set of SSIS entity kinds

use std::fmt;

use serde::{Deserialize, Serialize};

/// Common prefix of every catalog URN
pub const URN_PREFIX: &str = "urn:li:";

/// Kind of SSIS entity, in containment order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityType {
    SsisPackage,
    SsisControlFlow,
    SsisControlTask,
    SsisDataFlow,
}

impl EntityType {
    /// All kinds, outermost first
    pub const ALL: [EntityType; 4] = [
        EntityType::SsisPackage,
        EntityType::SsisControlFlow,
        EntityType::SsisControlTask,
        EntityType::SsisDataFlow,
    ];

    /// Catalog entity name (e.g. "ssisPackage")
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SsisPackage => "ssisPackage",
            Self::SsisControlFlow => "ssisControlFlow",
            Self::SsisControlTask => "ssisControlTask",
            Self::SsisDataFlow => "ssisDataFlow",
        }
    }

    /// Namespace prefix including the trailing colon (e.g. "urn:li:ssisPackage:")
    pub const fn urn_prefix(self) -> &'static str {
        match self {
            Self::SsisPackage => "urn:li:ssisPackage:",
            Self::SsisControlFlow => "urn:li:ssisControlFlow:",
            Self::SsisControlTask => "urn:li:ssisControlTask:",
            Self::SsisDataFlow => "urn:li:ssisDataFlow:",
        }
    }

    /// Human-readable layout, used in error messages
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::SsisPackage => "urn:li:ssisPackage:(<orchestrator>,<id>,<cluster>)",
            Self::SsisControlFlow => "urn:li:ssisControlFlow:(<package urn>,<id>)",
            Self::SsisControlTask => "urn:li:ssisControlTask:(<control flow urn>,<id>)",
            Self::SsisDataFlow => "urn:li:ssisDataFlow:(<package urn>,<id>)",
        }
    }

    /// Identify the kind of an SSIS URN from its prefix
    pub fn from_urn(urn: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| urn.starts_with(kind.urn_prefix()))
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
