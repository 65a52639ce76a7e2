use std::iter;

use ssis_urn::{ControlTaskUrn, DataFlowUrn, DatasetUrn, EntityType, PackageUrn};

use super::{
    editable_proposal, iolet_statuses, trailing_proposals, EntityBase, McpStream, SsisEntity,
};
use crate::aspects::{SsisDataFlowInfo, SsisDataFlowInputOutput};
use crate::mcp::MetadataChangeProposal;

/// A data flow of a package, run by a control task
///
/// The URN hangs off the package. The running task is only recorded in the
/// info and input/output aspects.
#[derive(Debug, Clone)]
pub struct DataFlow {
    base: EntityBase,
    key: DataFlowUrn,
    urn: String,
    control_task: ControlTaskUrn,
    inlets: Vec<DatasetUrn>,
    outlets: Vec<DatasetUrn>,
}

impl DataFlow {
    pub fn new(base: EntityBase, package: PackageUrn, control_task: ControlTaskUrn) -> Self {
        let key = DataFlowUrn::new(package, base.id.clone());
        let urn = key.to_string();
        Self {
            base,
            key,
            urn,
            control_task,
            inlets: Vec::new(),
            outlets: Vec::new(),
        }
    }

    /// Build from the string forms of the package and control task URNs
    pub fn from_reference(
        base: EntityBase,
        package_urn: &str,
        control_task_urn: &str,
    ) -> ssis_urn::Result<Self> {
        Ok(Self::new(
            base,
            package_urn.parse()?,
            control_task_urn.parse()?,
        ))
    }

    pub fn with_inlet(mut self, dataset: impl Into<DatasetUrn>) -> Self {
        self.inlets.push(dataset.into());
        self
    }

    pub fn with_outlet(mut self, dataset: impl Into<DatasetUrn>) -> Self {
        self.outlets.push(dataset.into());
        self
    }

    pub fn key(&self) -> &DataFlowUrn {
        &self.key
    }

    pub fn package_urn(&self) -> &PackageUrn {
        self.key.package()
    }

    pub fn control_task_urn(&self) -> &ControlTaskUrn {
        &self.control_task
    }

    pub fn inlets(&self) -> &[DatasetUrn] {
        &self.inlets
    }

    pub fn outlets(&self) -> &[DatasetUrn] {
        &self.outlets
    }

    fn info(&self) -> SsisDataFlowInfo {
        SsisDataFlowInfo {
            name: self.base.display_name().to_string(),
            description: self.base.description.clone(),
            custom_properties: self.base.properties.clone(),
            external_url: self.base.url.clone(),
            control_task_urn: self.control_task.clone(),
        }
    }

    fn input_output(&self) -> SsisDataFlowInputOutput {
        SsisDataFlowInputOutput {
            input_datasets: self.inlets.clone(),
            output_datasets: self.outlets.clone(),
            input_control_task: self.control_task.clone(),
        }
    }
}

impl SsisEntity for DataFlow {
    fn entity_type(&self) -> EntityType {
        EntityType::SsisDataFlow
    }

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn urn(&self) -> &str {
        &self.urn
    }

    fn orchestrator_name(&self) -> &str {
        self.key.package().cluster()
    }

    fn generate_mcp(&self, materialize_iolets: bool) -> McpStream<'_> {
        let kind = self.entity_type();
        Box::new(
            iter::once_with(move || MetadataChangeProposal::for_entity(kind, &self.urn, self.info()))
                .chain(iter::once_with(move || editable_proposal(self)))
                .chain(iter::once_with(move || {
                    MetadataChangeProposal::for_entity(kind, &self.urn, self.input_output())
                }))
                .chain(iolet_statuses(&self.inlets, &self.outlets, materialize_iolets))
                .chain(trailing_proposals(self)),
        )
    }
}
