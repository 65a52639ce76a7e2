use std::iter;

use ssis_urn::{ControlFlowUrn, EntityType, PackageUrn};

use super::{editable_proposal, trailing_proposals, EntityBase, McpStream, SsisEntity};
use crate::aspects::SsisControlFlowInfo;
use crate::mcp::MetadataChangeProposal;

/// Control flow of a package
#[derive(Debug, Clone)]
pub struct ControlFlow {
    base: EntityBase,
    key: ControlFlowUrn,
    urn: String,
}

impl ControlFlow {
    pub fn new(base: EntityBase, package: PackageUrn) -> Self {
        let key = ControlFlowUrn::new(package, base.id.clone());
        let urn = key.to_string();
        Self { base, key, urn }
    }

    /// Build from the string form of the package URN
    pub fn from_reference(base: EntityBase, package_urn: &str) -> ssis_urn::Result<Self> {
        Ok(Self::new(base, package_urn.parse()?))
    }

    pub fn key(&self) -> &ControlFlowUrn {
        &self.key
    }

    pub fn package_urn(&self) -> &PackageUrn {
        self.key.package()
    }
}

impl SsisEntity for ControlFlow {
    fn entity_type(&self) -> EntityType {
        EntityType::SsisControlFlow
    }

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn urn(&self) -> &str {
        &self.urn
    }

    /// Third component of the package URN
    fn orchestrator_name(&self) -> &str {
        self.key.package().cluster()
    }

    fn generate_mcp(&self, _materialize_iolets: bool) -> McpStream<'_> {
        Box::new(
            iter::once_with(move || {
                let info = SsisControlFlowInfo {
                    name: self.base.display_name().to_string(),
                    description: self.base.description.clone(),
                    custom_properties: self.base.properties.clone(),
                    external_url: self.base.url.clone(),
                    package_urn: self.key.package().clone(),
                };
                MetadataChangeProposal::for_entity(self.entity_type(), &self.urn, info)
            })
            .chain(iter::once_with(move || editable_proposal(self)))
            .chain(trailing_proposals(self)),
        )
    }
}
