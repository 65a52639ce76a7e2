use std::iter;

use ssis_urn::{EntityType, PackageUrn};

use super::{editable_proposal, trailing_proposals, EntityBase, McpStream, SsisEntity};
use crate::aspects::SsisPackageInfo;
use crate::mcp::MetadataChangeProposal;

/// Root of the hierarchy, identified by orchestrator, id and cluster
#[derive(Debug, Clone)]
pub struct Package {
    base: EntityBase,
    key: PackageUrn,
    urn: String,
}

impl Package {
    pub fn new(base: EntityBase, orchestrator: impl Into<String>, cluster: impl Into<String>) -> Self {
        let key = PackageUrn::new(orchestrator, base.id.clone(), cluster);
        let urn = key.to_string();
        Self { base, key, urn }
    }

    pub fn key(&self) -> &PackageUrn {
        &self.key
    }

    pub fn orchestrator(&self) -> &str {
        self.key.orchestrator()
    }

    pub fn cluster(&self) -> &str {
        self.key.cluster()
    }

    fn info(&self) -> SsisPackageInfo {
        SsisPackageInfo {
            name: self.base.display_name().to_string(),
            description: self.base.description.clone(),
            custom_properties: self.base.properties.clone(),
            external_url: self.base.url.clone(),
        }
    }
}

impl SsisEntity for Package {
    fn entity_type(&self) -> EntityType {
        EntityType::SsisPackage
    }

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn urn(&self) -> &str {
        &self.urn
    }

    fn orchestrator_name(&self) -> &str {
        self.key.orchestrator()
    }

    fn generate_mcp(&self, _materialize_iolets: bool) -> McpStream<'_> {
        Box::new(
            iter::once_with(move || {
                MetadataChangeProposal::for_entity(self.entity_type(), &self.urn, self.info())
            })
            .chain(iter::once_with(move || editable_proposal(self)))
            .chain(trailing_proposals(self)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspects::Aspect;

    fn package() -> Package {
        Package::new(
            EntityBase::new("pkg1")
                .with_description("Nightly load")
                .with_property("version", "3"),
            "OrchA",
            "clusterX",
        )
    }

    #[test]
    fn test_urn_is_deterministic() {
        assert_eq!(package().urn(), "urn:li:ssisPackage:(OrchA,pkg1,clusterX)");
        assert_eq!(package().urn(), package().urn());
    }

    #[test]
    fn test_aspect_order() {
        let names: Vec<_> = package()
            .generate_mcp(true)
            .map(|mcp| mcp.aspect_name())
            .collect();
        assert_eq!(
            names,
            vec![
                "ssisPackageInfo",
                "editableSsisPackageProperties",
                "ownership",
                "globalTags"
            ]
        );
    }

    #[test]
    fn test_info_uses_id_as_name() {
        let first = package().generate_mcp(true).next().unwrap();
        assert_eq!(first.entity_type, "ssisPackage");
        match first.aspect {
            Aspect::SsisPackageInfo(info) => {
                assert_eq!(info.name, "pkg1");
                assert_eq!(info.description.as_deref(), Some("Nightly load"));
                assert_eq!(info.custom_properties["version"], "3");
            }
            other => panic!("Expected SsisPackageInfo, got {:?}", other),
        }
    }

    #[test]
    fn test_orchestrator_is_ownership_actor() {
        match package().generate_ownership_aspect().aspect {
            Aspect::Ownership(ownership) => {
                assert_eq!(ownership.last_modified.actor, "urn:li:corpuser:OrchA")
            }
            other => panic!("Expected Ownership, got {:?}", other),
        }
    }
}
