use std::iter;

use ssis_urn::{ControlFlowUrn, ControlTaskUrn, DatasetUrn, EntityType, PackageUrn};

use super::{
    editable_proposal, iolet_statuses, trailing_proposals, EntityBase, McpStream, SsisEntity,
};
use crate::aspects::{SsisControlTaskInfo, SsisControlTaskInputOutput};
use crate::constants::defaults;
use crate::mcp::MetadataChangeProposal;

/// A task inside a control flow, with the datasets it reads and writes
#[derive(Debug, Clone)]
pub struct ControlTask {
    base: EntityBase,
    key: ControlTaskUrn,
    urn: String,
    task_type: String,
    input_control_tasks: Vec<String>,
    inlets: Vec<DatasetUrn>,
    outlets: Vec<DatasetUrn>,
}

impl ControlTask {
    pub fn new(base: EntityBase, flow: ControlFlowUrn) -> Self {
        let key = ControlTaskUrn::new(flow, base.id.clone());
        let urn = key.to_string();
        Self {
            base,
            key,
            urn,
            task_type: defaults::CONTROL_TASK_TYPE.to_string(),
            input_control_tasks: Vec::new(),
            inlets: Vec::new(),
            outlets: Vec::new(),
        }
    }

    /// Build from the string form of the control flow URN
    pub fn from_reference(base: EntityBase, flow_urn: &str) -> ssis_urn::Result<Self> {
        Ok(Self::new(base, flow_urn.parse()?))
    }

    pub fn with_type(mut self, task_type: impl Into<String>) -> Self {
        self.task_type = task_type.into();
        self
    }

    /// Record an upstream task this one depends on
    pub fn with_input_control_task(mut self, task: impl Into<String>) -> Self {
        self.input_control_tasks.push(task.into());
        self
    }

    pub fn with_inlet(mut self, dataset: impl Into<DatasetUrn>) -> Self {
        self.inlets.push(dataset.into());
        self
    }

    pub fn with_outlet(mut self, dataset: impl Into<DatasetUrn>) -> Self {
        self.outlets.push(dataset.into());
        self
    }

    pub fn key(&self) -> &ControlTaskUrn {
        &self.key
    }

    pub fn flow_urn(&self) -> &ControlFlowUrn {
        self.key.flow()
    }

    /// Package that owns this task's control flow
    pub fn package_urn(&self) -> &PackageUrn {
        self.key.package()
    }

    pub fn task_type(&self) -> &str {
        &self.task_type
    }

    pub fn inlets(&self) -> &[DatasetUrn] {
        &self.inlets
    }

    pub fn outlets(&self) -> &[DatasetUrn] {
        &self.outlets
    }

    fn info(&self) -> SsisControlTaskInfo {
        SsisControlTaskInfo {
            name: self.base.display_name().to_string(),
            description: self.base.description.clone(),
            custom_properties: self.base.properties.clone(),
            external_url: self.base.url.clone(),
            control_flow_urn: self.key.flow().clone(),
            task_type: self.task_type.clone(),
        }
    }

    fn input_output(&self) -> SsisControlTaskInputOutput {
        SsisControlTaskInputOutput {
            input_datasets: self.inlets.clone(),
            output_datasets: self.outlets.clone(),
            input_control_tasks: self.input_control_tasks.clone(),
        }
    }
}

impl SsisEntity for ControlTask {
    fn entity_type(&self) -> EntityType {
        EntityType::SsisControlTask
    }

    fn base(&self) -> &EntityBase {
        &self.base
    }

    fn urn(&self) -> &str {
        &self.urn
    }

    fn orchestrator_name(&self) -> &str {
        self.package_urn().cluster()
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
