//! User-driven edits to an existing SSIS entity
//!
//! An `EntityUpdate` is what a catalog UI submits when someone changes the
//! ownership, tags, deprecation, links or description of an entity. Each
//! section that is present becomes one proposal.

use serde::{Deserialize, Serialize};
use ssis_urn::{make_tag_urn, make_user_urn, SsisUrn};

use crate::aspects::{
    Aspect, AuditStamp, Deprecation, EditableProperties, GlobalTags, InstitutionalMemory,
    InstitutionalMemoryMetadata, Owner, Ownership, OwnershipSource, OwnershipType, TagAssociation,
};
use crate::mcp::MetadataChangeProposal;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerUpdate {
    /// User or group URN
    pub owner: String,
    #[serde(rename = "type")]
    pub ownership_type: OwnershipType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeprecationUpdate {
    pub deprecated: bool,
    #[serde(default)]
    pub decommission_time: Option<i64>,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkUpdate {
    pub url: String,
    #[serde(default)]
    pub description: String,
    /// Defaults to the acting user
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditablePropertiesUpdate {
    #[serde(default)]
    pub description: Option<String>,
}

/// A partial edit. Absent sections are left untouched in the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityUpdate {
    pub ownership: Option<Vec<OwnerUpdate>>,
    /// Tag names or tag URNs
    pub tags: Option<Vec<String>>,
    pub deprecation: Option<DeprecationUpdate>,
    pub institutional_memory: Option<Vec<LinkUpdate>>,
    pub editable_properties: Option<EditablePropertiesUpdate>,
}

impl EntityUpdate {
    pub fn is_empty(&self) -> bool {
        self.ownership.is_none()
            && self.tags.is_none()
            && self.deprecation.is_none()
            && self.institutional_memory.is_none()
            && self.editable_properties.is_none()
    }

    /// One proposal per present section, stamped by `actor` at the current time
    pub fn to_proposals(&self, urn: &SsisUrn, actor: &str) -> Vec<MetadataChangeProposal> {
        let actor = make_user_urn(actor);
        let stamp = AuditStamp::now(actor.clone());
        let entity_type = urn.entity_type();
        let entity_urn = urn.to_string();
        let proposal = |aspect: Aspect| {
            MetadataChangeProposal::for_entity(entity_type, &entity_urn, aspect)
        };

        let mut proposals = Vec::with_capacity(5);

        if let Some(owners) = &self.ownership {
            proposals.push(proposal(
                Ownership {
                    owners: owners
                        .iter()
                        .map(|update| Owner {
                            owner: update.owner.clone(),
                            ownership_type: update.ownership_type,
                            source: Some(OwnershipSource::manual()),
                        })
                        .collect(),
                    last_modified: stamp.clone(),
                }
                .into(),
            ));
        }

        if let Some(tags) = &self.tags {
            proposals.push(proposal(
                GlobalTags {
                    tags: tags
                        .iter()
                        .map(|tag| TagAssociation {
                            tag: make_tag_urn(tag),
                        })
                        .collect(),
                }
                .into(),
            ));
        }

        if let Some(deprecation) = &self.deprecation {
            proposals.push(proposal(
                Deprecation {
                    deprecated: deprecation.deprecated,
                    decommission_time: deprecation.decommission_time,
                    note: deprecation.note.clone(),
                    actor: actor.clone(),
                }
                .into(),
            ));
        }

        if let Some(links) = &self.institutional_memory {
            proposals.push(proposal(
                InstitutionalMemory {
                    elements: links
                        .iter()
                        .map(|link| InstitutionalMemoryMetadata {
                            url: link.url.clone(),
                            description: link.description.clone(),
                            create_stamp: AuditStamp::new(
                                link.author
                                    .as_deref()
                                    .map(make_user_urn)
                                    .unwrap_or_else(|| actor.clone()),
                                stamp.time,
                            ),
                        })
                        .collect(),
                }
                .into(),
            ));
        }

        if let Some(editable) = &self.editable_properties {
            proposals.push(proposal(Aspect::editable_properties(
                entity_type,
                EditableProperties {
                    description: editable.description.clone(),
                    created: Some(stamp.clone()),
                    last_modified: Some(stamp.clone()),
                },
            )));
        }

        log::debug!("Mapped update of {} to {} proposals", entity_urn, proposals.len());
        proposals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspects::OwnershipSourceType;
    use ssis_urn::{ControlFlowUrn, ControlTaskUrn, PackageUrn};

    fn task_urn() -> SsisUrn {
        ControlTaskUrn::new(
            ControlFlowUrn::new(PackageUrn::new("OrchA", "pkg1", "clusterX"), "flow1"),
            "task1",
        )
        .into()
    }

    #[test]
    fn test_empty_update_yields_nothing() {
        let update = EntityUpdate::default();
        assert!(update.is_empty());
        assert!(update.to_proposals(&task_urn(), "bob").is_empty());
    }

    #[test]
    fn test_section_order() {
        let update: EntityUpdate = serde_json::from_str(
            r#"{
                "editableProperties": {"description": "Loads the warehouse"},
                "tags": ["etl"],
                "ownership": [{"owner": "urn:li:corpuser:alice", "type": "TECHNICAL_OWNER"}],
                "deprecation": {"deprecated": true, "note": "replaced"},
                "institutionalMemory": [{"url": "https://wiki/etl"}]
            }"#,
        )
        .unwrap();

        let names: Vec<_> = update
            .to_proposals(&task_urn(), "bob")
            .iter()
            .map(|mcp| mcp.aspect_name())
            .collect();
        assert_eq!(
            names,
            vec![
                "ownership",
                "globalTags",
                "deprecation",
                "institutionalMemory",
                "editableSsisControlTaskProperties"
            ]
        );
    }

    #[test]
    fn test_ownership_is_manual_and_stamped() {
        let update = EntityUpdate {
            ownership: Some(vec![OwnerUpdate {
                owner: "urn:li:corpGroup:team1".to_string(),
                ownership_type: OwnershipType::BusinessOwner,
            }]),
            ..Default::default()
        };

        let proposals = update.to_proposals(&task_urn(), "bob");
        assert_eq!(proposals[0].entity_type, "ssisControlTask");
        match &proposals[0].aspect {
            Aspect::Ownership(ownership) => {
                assert_eq!(ownership.last_modified.actor, "urn:li:corpuser:bob");
                assert!(ownership.last_modified.time > 0);
                let source = ownership.owners[0].source.as_ref().unwrap();
                assert_eq!(source.source_type, OwnershipSourceType::Manual);
            }
            other => panic!("Expected Ownership, got {:?}", other),
        }
    }

    #[test]
    fn test_link_author_defaults_to_actor() {
        let update = EntityUpdate {
            institutional_memory: Some(vec![
                LinkUpdate {
                    url: "https://wiki/a".to_string(),
                    description: "runbook".to_string(),
                    author: None,
                },
                LinkUpdate {
                    url: "https://wiki/b".to_string(),
                    description: String::new(),
                    author: Some("carol".to_string()),
                },
            ]),
            ..Default::default()
        };

        let proposals = update.to_proposals(&task_urn(), "bob");
        match &proposals[0].aspect {
            Aspect::InstitutionalMemory(memory) => {
                assert_eq!(memory.elements[0].create_stamp.actor, "urn:li:corpuser:bob");
                assert_eq!(memory.elements[1].create_stamp.actor, "urn:li:corpuser:carol");
            }
            other => panic!("Expected InstitutionalMemory, got {:?}", other),
        }
    }
}
