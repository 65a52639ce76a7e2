//! Typed URNs for SSIS catalog entities
//!
//! Packages, control flows, control tasks and data flows are identified by
//! nested tuple URNs. This crate keeps those identifiers decomposed, so
//! ancestors are read from fields instead of being pattern-matched back out
//! of strings, and produces the composite string only when it is rendered.
//!
//! # Example
//!
//! ```
//! use ssis_urn::{ControlFlowUrn, PackageUrn};
//!
//! let package = PackageUrn::new("OrchA", "pkg1", "clusterX");
//! let flow = ControlFlowUrn::new(package, "flow1");
//! assert_eq!(
//!     flow.to_string(),
//!     "urn:li:ssisControlFlow:(urn:li:ssisPackage:(OrchA,pkg1,clusterX),flow1)"
//! );
//! ```

pub mod common;
pub mod entity_type;
pub mod error;
pub mod ssis;

pub use common::{entity_type_of, make_group_urn, make_tag_urn, make_user_urn, DatasetUrn};
pub use entity_type::{EntityType, URN_PREFIX};
pub use error::{Result, UrnError};
pub use ssis::{ControlFlowUrn, ControlTaskUrn, DataFlowUrn, PackageUrn, SsisUrn};
