//! Search documents for SSIS entities
//!
//! Builds the small JSON document a search index stores per entity: the
//! URN, the key fields carried by the URN, and the display name from the
//! most recent info aspect.

use serde_json::{json, Map, Value};
use ssis_urn::SsisUrn;

use crate::mcp::MetadataChangeProposal;

/// Build the search document for `urn` from the proposals seen so far
///
/// Returns `None` when `urn` is not a valid SSIS URN.
pub fn hydrate_document(urn: &str, proposals: &[MetadataChangeProposal]) -> Option<Value> {
    let parsed: SsisUrn = match urn.parse() {
        Ok(parsed) => parsed,
        Err(e) => {
            log::info!("Failed to parse urn for search document: {}", e);
            return None;
        }
    };

    let mut document = Map::new();
    document.insert("urn".to_string(), json!(urn));

    match &parsed {
        SsisUrn::Package(package) => {
            document.insert("orchestrator".to_string(), json!(package.orchestrator()));
            document.insert("ssisPackageId".to_string(), json!(package.package_id()));
            document.insert("cluster".to_string(), json!(package.cluster()));
        }
        SsisUrn::ControlFlow(flow) => {
            document.insert("controlFlowId".to_string(), json!(flow.flow_id()));
        }
        SsisUrn::ControlTask(task) => {
            document.insert("controlTaskId".to_string(), json!(task.task_id()));
        }
        SsisUrn::DataFlow(data_flow) => {
            document.insert("dataFlowId".to_string(), json!(data_flow.data_flow_id()));
        }
    }

    let name = proposals
        .iter()
        .rev()
        .filter(|mcp| mcp.entity_urn == urn)
        .find_map(|mcp| mcp.aspect.info_name());
    if let Some(name) = name {
        document.insert("name".to_string(), json!(name));
    }

    Some(Value::Object(document))
}
