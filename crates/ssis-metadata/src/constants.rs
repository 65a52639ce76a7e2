//! Fixed values used when mapping entities to aspects

/// Defaults applied when a caller leaves a field unset
pub mod defaults {
    use crate::aspects::OwnershipType;

    /// Control task kind when none is given
    pub const CONTROL_TASK_TYPE: &str = "SCRIPT";

    /// Whether referenced datasets get a status proposal of their own
    pub const MATERIALIZE_IOLETS: bool = true;

    /// Role given to owners supplied by the pipeline
    pub const OWNERSHIP_TYPE: OwnershipType = OwnershipType::Developer;
}

/// Timestamp of pipeline-generated ownership stamps (unset)
pub const UNSET_TIME: i64 = 0;
