//! SSIS entities and the proposals they generate
//!
//! Four kinds form a containment hierarchy:
//!
//! ```text
//! Package -> ControlFlow -> ControlTask
//!         -> DataFlow (run by a ControlTask)
//! ```
//!
//! Every kind wraps an [`EntityBase`] with the shared descriptive fields and
//! implements [`SsisEntity`]. An entity fixes its URN when it is built and
//! yields its proposals in a fixed order:
//!
//! 1. info aspect
//! 2. editable properties aspect
//! 3. input/output aspect, followed by one status proposal per referenced
//!    dataset when iolets are materialized (control tasks and data flows)
//! 4. ownership aspect
//! 5. tags aspect

mod control_flow;
mod control_task;
mod data_flow;
mod package;

pub use control_flow::ControlFlow;
pub use control_task::ControlTask;
pub use data_flow::DataFlow;
pub use package::Package;

use std::collections::{BTreeMap, BTreeSet, HashSet};

use ssis_urn::{make_group_urn, make_tag_urn, make_user_urn, DatasetUrn, EntityType};

use crate::aspects::{
    Aspect, AuditStamp, EditableProperties, GlobalTags, Owner, Ownership, OwnershipSource,
    TagAssociation,
};
use crate::constants::defaults;
use crate::emitter::{EmitCallback, EmitError, Emitter};
use crate::mcp::MetadataChangeProposal;

/// Lazy, finite sequence of proposals for one entity
pub type McpStream<'a> = Box<dyn Iterator<Item = MetadataChangeProposal> + 'a>;

/// Identity and descriptive fields shared by every entity kind
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityBase {
    /// Unique within the parent's scope
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub properties: BTreeMap<String, String>,
    pub tags: BTreeSet<String>,
    pub owners: BTreeSet<String>,
    pub group_owners: BTreeSet<String>,
}

impl EntityBase {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owners.insert(owner.into());
        self
    }

    pub fn with_group_owner(mut self, group: impl Into<String>) -> Self {
        self.group_owners.insert(group.into());
        self
    }

    /// Name shown in the catalog, falling back to the id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Ownership over all user and group owners, stamped by `actor_name`
    ///
    /// Every owner is recorded as a developer supplied by the pipeline. The
    /// owner list is empty, not absent, when nobody owns the entity.
    pub fn ownership_aspect(&self, actor_name: &str) -> Ownership {
        let owner_urns: BTreeSet<String> = self
            .owners
            .iter()
            .map(|owner| make_user_urn(owner))
            .chain(self.group_owners.iter().map(|group| make_group_urn(group)))
            .collect();

        Ownership {
            owners: owner_urns
                .into_iter()
                .map(|owner| Owner {
                    owner,
                    ownership_type: defaults::OWNERSHIP_TYPE,
                    source: Some(OwnershipSource::service()),
                })
                .collect(),
            last_modified: AuditStamp::unset(make_user_urn(actor_name)),
        }
    }

    /// Tags in ascending order
    pub fn tags_aspect(&self) -> GlobalTags {
        GlobalTags {
            tags: self
                .tags
                .iter()
                .map(|tag| TagAssociation {
                    tag: make_tag_urn(tag),
                })
                .collect(),
        }
    }

    pub(crate) fn editable_properties(&self) -> EditableProperties {
        EditableProperties {
            description: self.description.clone(),
            ..Default::default()
        }
    }
}

/// An SSIS entity that can describe itself as change proposals
///
/// The trait is object safe, so mixed hierarchies can be handled as
/// `&dyn SsisEntity`.
pub trait SsisEntity {
    fn entity_type(&self) -> EntityType;

    fn base(&self) -> &EntityBase;

    /// Composite URN string, fixed at construction
    fn urn(&self) -> &str;

    /// Name used as the actor on pipeline-generated stamps
    fn orchestrator_name(&self) -> &str;

    /// All proposals for this entity, in emission order
    fn generate_mcp(&self, materialize_iolets: bool) -> McpStream<'_>;

    /// Exactly one ownership proposal
    fn generate_ownership_aspect(&self) -> MetadataChangeProposal {
        MetadataChangeProposal::for_entity(
            self.entity_type(),
            self.urn(),
            self.base().ownership_aspect(self.orchestrator_name()),
        )
    }

    /// Exactly one tags proposal
    fn generate_tags_aspect(&self) -> MetadataChangeProposal {
        MetadataChangeProposal::for_entity(self.entity_type(), self.urn(), self.base().tags_aspect())
    }

    /// Hand every proposal to `emitter`, in order
    ///
    /// Stops at the first failure. Proposals delivered before it stay
    /// delivered.
    fn emit(
        &self,
        emitter: &dyn Emitter,
        callback: Option<&EmitCallback<'_>>,
    ) -> Result<(), EmitError> {
        for proposal in self.generate_mcp(defaults::MATERIALIZE_IOLETS) {
            emitter.emit(proposal, callback)?;
        }
        Ok(())
    }
}

/// Editable properties proposal carrying the entity's description
pub(crate) fn editable_proposal<E: SsisEntity + ?Sized>(entity: &E) -> MetadataChangeProposal {
    MetadataChangeProposal::for_entity(
        entity.entity_type(),
        entity.urn(),
        Aspect::editable_properties(entity.entity_type(), entity.base().editable_properties()),
    )
}

/// Trailing ownership and tags proposals shared by every kind
pub(crate) fn trailing_proposals<'a, E: SsisEntity + ?Sized + 'a>(
    entity: &'a E,
) -> impl Iterator<Item = MetadataChangeProposal> + 'a {
    std::iter::once_with(move || entity.generate_ownership_aspect())
        .chain(std::iter::once_with(move || entity.generate_tags_aspect()))
}

/// One status proposal per distinct dataset reference, inlets first
pub(crate) fn iolet_statuses<'a>(
    inlets: &'a [DatasetUrn],
    outlets: &'a [DatasetUrn],
    materialize: bool,
) -> impl Iterator<Item = MetadataChangeProposal> + 'a {
    let mut seen = HashSet::new();
    materialize
        .then(move || {
            inlets
                .iter()
                .chain(outlets)
                .filter(move |dataset| seen.insert(*dataset))
                .map(MetadataChangeProposal::dataset_present)
        })
        .into_iter()
        .flatten()
}
