//! SSIS Metadata - Catalog change proposals for SSIS pipelines
//!
//! This crate maps SSIS packages, control flows, control tasks and data
//! flows onto a metadata catalog's entity/aspect model. It provides:
//!
//! - Typed aspect payloads and the `MetadataChangeProposal` wire record
//! - `SsisEntity` implementations producing a fixed, lazy aspect sequence
//! - An `Emitter` transport boundary with in-memory, stdout and file sinks
//! - Mapping of user edits and search documents for existing entities
//!
//! # Example
//!
//! ```
//! use ssis_metadata::{ControlFlow, EntityBase, Package, SsisEntity, VecEmitter};
//!
//! let package = Package::new(EntityBase::new("pkg1").with_owner("alice"), "OrchA", "clusterX");
//! let flow = ControlFlow::new(EntityBase::new("flow1"), package.key().clone());
//!
//! let emitter = VecEmitter::new();
//! package.emit(&emitter, None).unwrap();
//! flow.emit(&emitter, None).unwrap();
//! assert_eq!(emitter.len(), 8);
//! ```

pub mod aspects;
pub mod config;
pub mod constants;
pub mod emitter;
pub mod entity;
pub mod error;
pub mod hydrate;
pub mod mcp;
pub mod update;
pub mod writer;

// Re-export key types
pub use aspects::Aspect;
pub use config::{EmitterConfig, SinkConfig};
pub use emitter::{
    read_proposals, ConsoleEmitter, EmitCallback, EmitError, Emitter, FileEmitter,
    JsonLinesEmitter, NullEmitter, VecEmitter,
};
pub use entity::{ControlFlow, ControlTask, DataFlow, EntityBase, McpStream, Package, SsisEntity};
pub use error::{MetadataError, Result};
pub use hydrate::hydrate_document;
pub use mcp::{ChangeType, MetadataChangeProposal};
pub use update::EntityUpdate;
pub use writer::CatalogWriter;

// Re-export URN types that consumers will need
pub use ssis_urn::{
    ControlFlowUrn, ControlTaskUrn, DataFlowUrn, DatasetUrn, EntityType, PackageUrn, SsisUrn,
    UrnError,
};
