//! Typed URNs for the SSIS containment hierarchy
//!
//! Each URN holds its decomposed ancestor identifiers directly. The composite
//! string form is produced by `Display` and read back by `FromStr`:
//!
//! ```text
//! urn:li:ssisPackage:(<orchestrator>,<id>,<cluster>)
//! urn:li:ssisControlFlow:(<package urn>,<id>)
//! urn:li:ssisControlTask:(<control flow urn>,<id>)
//! urn:li:ssisDataFlow:(<package urn>,<id>)
//! ```
//!
//! A nested parent URN ends at the parenthesis that closes its own tuple, and
//! the id is everything after the comma that follows it, so ids containing
//! commas round-trip. Package components are split on the last two commas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, UrnError};
use crate::EntityType;

/// Strip `<prefix>(` and the closing `)` from a tuple-shaped URN
fn tuple_body(urn: &str, kind: EntityType) -> Result<&str> {
    urn.strip_prefix(kind.urn_prefix())
        .and_then(|rest| rest.strip_prefix('('))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| UrnError::mismatch(urn, kind))
}

/// Split `<parent>,<id>` where `<parent>` is a nested tuple URN
///
/// The parent ends at the parenthesis closing its own tuple. Everything
/// after the following comma is the id, commas included.
fn parent_and_id(urn: &str, kind: EntityType) -> Result<(&str, &str)> {
    let body = tuple_body(urn, kind)?;
    let mut depth = 0usize;
    for (index, ch) in body.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| UrnError::mismatch(urn, kind))?;
                if depth == 0 {
                    let (parent, rest) = body.split_at(index + 1);
                    return rest
                        .strip_prefix(',')
                        .map(|id| (parent, id))
                        .ok_or_else(|| UrnError::mismatch(urn, kind));
                }
            }
            _ => {}
        }
    }
    Err(UrnError::mismatch(urn, kind))
}

macro_rules! string_serde {
    ($ty:ty) => {
        impl TryFrom<String> for $ty {
            type Error = UrnError;

            fn try_from(value: String) -> Result<Self> {
                value.parse()
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.to_string()
            }
        }
    };
}

/// URN of an SSIS package
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageUrn {
    orchestrator: String,
    package_id: String,
    cluster: String,
}

impl PackageUrn {
    pub fn new(
        orchestrator: impl Into<String>,
        package_id: impl Into<String>,
        cluster: impl Into<String>,
    ) -> Self {
        Self {
            orchestrator: orchestrator.into(),
            package_id: package_id.into(),
            cluster: cluster.into(),
        }
    }

    pub fn orchestrator(&self) -> &str {
        &self.orchestrator
    }

    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    pub fn cluster(&self) -> &str {
        &self.cluster
    }
}

impl fmt::Display for PackageUrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({},{},{})",
            EntityType::SsisPackage.urn_prefix(),
            self.orchestrator,
            self.package_id,
            self.cluster
        )
    }
}

impl FromStr for PackageUrn {
    type Err = UrnError;

    fn from_str(s: &str) -> Result<Self> {
        let kind = EntityType::SsisPackage;
        let mut parts = tuple_body(s, kind)?.rsplitn(3, ',');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(cluster), Some(package_id), Some(orchestrator)) => {
                Ok(Self::new(orchestrator, package_id, cluster))
            }
            _ => Err(UrnError::mismatch(s, kind)),
        }
    }
}

string_serde!(PackageUrn);

/// URN of a control flow inside a package
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ControlFlowUrn {
    package: PackageUrn,
    flow_id: String,
}

impl ControlFlowUrn {
    pub fn new(package: PackageUrn, flow_id: impl Into<String>) -> Self {
        Self {
            package,
            flow_id: flow_id.into(),
        }
    }

    pub fn package(&self) -> &PackageUrn {
        &self.package
    }

    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }
}

impl fmt::Display for ControlFlowUrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({},{})",
            EntityType::SsisControlFlow.urn_prefix(),
            self.package,
            self.flow_id
        )
    }
}

impl FromStr for ControlFlowUrn {
    type Err = UrnError;

    fn from_str(s: &str) -> Result<Self> {
        let kind = EntityType::SsisControlFlow;
        let (package, flow_id) = parent_and_id(s, kind)?;
        let package = package.parse().map_err(|_| UrnError::mismatch(s, kind))?;
        Ok(Self::new(package, flow_id))
    }
}

string_serde!(ControlFlowUrn);

/// URN of a control task inside a control flow
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ControlTaskUrn {
    flow: ControlFlowUrn,
    task_id: String,
}

impl ControlTaskUrn {
    pub fn new(flow: ControlFlowUrn, task_id: impl Into<String>) -> Self {
        Self {
            flow,
            task_id: task_id.into(),
        }
    }

    pub fn flow(&self) -> &ControlFlowUrn {
        &self.flow
    }

    /// The package two levels up
    pub fn package(&self) -> &PackageUrn {
        self.flow.package()
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }
}

impl fmt::Display for ControlTaskUrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({},{})",
            EntityType::SsisControlTask.urn_prefix(),
            self.flow,
            self.task_id
        )
    }
}

impl FromStr for ControlTaskUrn {
    type Err = UrnError;

    fn from_str(s: &str) -> Result<Self> {
        let kind = EntityType::SsisControlTask;
        let (flow, task_id) = parent_and_id(s, kind)?;
        let flow = flow.parse().map_err(|_| UrnError::mismatch(s, kind))?;
        Ok(Self::new(flow, task_id))
    }
}

string_serde!(ControlTaskUrn);

/// URN of a data flow. Data flows hang off the package, not the control
/// task that runs them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DataFlowUrn {
    package: PackageUrn,
    data_flow_id: String,
}

impl DataFlowUrn {
    pub fn new(package: PackageUrn, data_flow_id: impl Into<String>) -> Self {
        Self {
            package,
            data_flow_id: data_flow_id.into(),
        }
    }

    pub fn package(&self) -> &PackageUrn {
        &self.package
    }

    pub fn data_flow_id(&self) -> &str {
        &self.data_flow_id
    }
}

impl fmt::Display for DataFlowUrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({},{})",
            EntityType::SsisDataFlow.urn_prefix(),
            self.package,
            self.data_flow_id
        )
    }
}

impl FromStr for DataFlowUrn {
    type Err = UrnError;

    fn from_str(s: &str) -> Result<Self> {
        let kind = EntityType::SsisDataFlow;
        let (package, data_flow_id) = parent_and_id(s, kind)?;
        let package = package.parse().map_err(|_| UrnError::mismatch(s, kind))?;
        Ok(Self::new(package, data_flow_id))
    }
}

string_serde!(DataFlowUrn);

/// Any SSIS URN, dispatched on its prefix
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SsisUrn {
    Package(PackageUrn),
    ControlFlow(ControlFlowUrn),
    ControlTask(ControlTaskUrn),
    DataFlow(DataFlowUrn),
}

impl SsisUrn {
    pub fn entity_type(&self) -> EntityType {
        match self {
            Self::Package(_) => EntityType::SsisPackage,
            Self::ControlFlow(_) => EntityType::SsisControlFlow,
            Self::ControlTask(_) => EntityType::SsisControlTask,
            Self::DataFlow(_) => EntityType::SsisDataFlow,
        }
    }

    /// The package this entity belongs to (itself for a package)
    pub fn package(&self) -> &PackageUrn {
        match self {
            Self::Package(urn) => urn,
            Self::ControlFlow(urn) => urn.package(),
            Self::ControlTask(urn) => urn.package(),
            Self::DataFlow(urn) => urn.package(),
        }
    }

    /// The entity's own id, without ancestors
    pub fn id(&self) -> &str {
        match self {
            Self::Package(urn) => urn.package_id(),
            Self::ControlFlow(urn) => urn.flow_id(),
            Self::ControlTask(urn) => urn.task_id(),
            Self::DataFlow(urn) => urn.data_flow_id(),
        }
    }
}

impl fmt::Display for SsisUrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Package(urn) => fmt::Display::fmt(urn, f),
            Self::ControlFlow(urn) => fmt::Display::fmt(urn, f),
            Self::ControlTask(urn) => fmt::Display::fmt(urn, f),
            Self::DataFlow(urn) => fmt::Display::fmt(urn, f),
        }
    }
}

impl FromStr for SsisUrn {
    type Err = UrnError;

    fn from_str(s: &str) -> Result<Self> {
        match EntityType::from_urn(s) {
            Some(EntityType::SsisPackage) => s.parse().map(Self::Package),
            Some(EntityType::SsisControlFlow) => s.parse().map(Self::ControlFlow),
            Some(EntityType::SsisControlTask) => s.parse().map(Self::ControlTask),
            Some(EntityType::SsisDataFlow) => s.parse().map(Self::DataFlow),
            None => Err(UrnError::UnknownEntityType { urn: s.to_string() }),
        }
    }
}

string_serde!(SsisUrn);

impl From<PackageUrn> for SsisUrn {
    fn from(urn: PackageUrn) -> Self {
        Self::Package(urn)
    }
}

impl From<ControlFlowUrn> for SsisUrn {
    fn from(urn: ControlFlowUrn) -> Self {
        Self::ControlFlow(urn)
    }
}

impl From<ControlTaskUrn> for SsisUrn {
    fn from(urn: ControlTaskUrn) -> Self {
        Self::ControlTask(urn)
    }
}

impl From<DataFlowUrn> for SsisUrn {
    fn from(urn: DataFlowUrn) -> Self {
        Self::DataFlow(urn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package() -> PackageUrn {
        PackageUrn::new("OrchA", "pkg1", "clusterX")
    }

    #[test]
    fn test_package_urn_format() {
        assert_eq!(
            package().to_string(),
            "urn:li:ssisPackage:(OrchA,pkg1,clusterX)"
        );
    }

    #[test]
    fn test_package_urn_is_deterministic() {
        assert_eq!(package().to_string(), package().to_string());
    }

    #[test]
    fn test_package_urn_parse() {
        let urn: PackageUrn = "urn:li:ssisPackage:(OrchA,pkg1,clusterX)".parse().unwrap();
        assert_eq!(urn.orchestrator(), "OrchA");
        assert_eq!(urn.package_id(), "pkg1");
        assert_eq!(urn.cluster(), "clusterX");
    }

    #[test]
    fn test_package_urn_parse_splits_on_last_commas() {
        let urn: PackageUrn = "urn:li:ssisPackage:(a,b,c,d)".parse().unwrap();
        assert_eq!(urn.orchestrator(), "a,b");
        assert_eq!(urn.package_id(), "c");
        assert_eq!(urn.cluster(), "d");
    }

    #[test]
    fn test_package_urn_rejects_two_components() {
        let err = "urn:li:ssisPackage:(OrchA,pkg1)"
            .parse::<PackageUrn>()
            .unwrap_err();
        assert!(matches!(
            err,
            UrnError::PatternMismatch {
                entity_type: EntityType::SsisPackage,
                ..
            }
        ));
    }

    #[test]
    fn test_package_urn_rejects_wrong_prefix() {
        assert!("urn:li:dataFlow:(a,b,c)".parse::<PackageUrn>().is_err());
        assert!("urn:li:ssisPackage:a,b,c".parse::<PackageUrn>().is_err());
        assert!("urn:li:ssisPackage:(a,b,c".parse::<PackageUrn>().is_err());
    }

    #[test]
    fn test_control_flow_urn_roundtrip() {
        let flow = ControlFlowUrn::new(package(), "flow1");
        let text = flow.to_string();
        assert_eq!(
            text,
            "urn:li:ssisControlFlow:(urn:li:ssisPackage:(OrchA,pkg1,clusterX),flow1)"
        );
        assert_eq!(text.parse::<ControlFlowUrn>().unwrap(), flow);
    }

    #[test]
    fn test_control_flow_urn_rejects_malformed_package() {
        let err = "urn:li:ssisControlFlow:(not-a-package,flow1)"
            .parse::<ControlFlowUrn>()
            .unwrap_err();
        assert_eq!(
            err,
            UrnError::PatternMismatch {
                urn: "urn:li:ssisControlFlow:(not-a-package,flow1)".to_string(),
                entity_type: EntityType::SsisControlFlow,
                pattern: EntityType::SsisControlFlow.pattern(),
            }
        );
    }

    #[test]
    fn test_control_task_urn_recovers_ancestors() {
        let text = "urn:li:ssisControlTask:(urn:li:ssisControlFlow:(urn:li:ssisPackage:(OrchA,pkg1,clusterX),flow1),task1)";
        let task: ControlTaskUrn = text.parse().unwrap();
        assert_eq!(task.task_id(), "task1");
        assert_eq!(task.flow().flow_id(), "flow1");
        assert_eq!(task.package(), &package());
        assert_eq!(task.to_string(), text);
    }

    #[test]
    fn test_comma_in_id_roundtrips() {
        let flow = ControlFlowUrn::new(package(), "Sequence, 1");
        let text = flow.to_string();
        assert_eq!(
            text,
            "urn:li:ssisControlFlow:(urn:li:ssisPackage:(OrchA,pkg1,clusterX),Sequence, 1)"
        );
        assert_eq!(text.parse::<ControlFlowUrn>().unwrap(), flow);

        let task = ControlTaskUrn::new(flow, "Load, stage");
        let parsed: ControlTaskUrn = task.to_string().parse().unwrap();
        assert_eq!(parsed.task_id(), "Load, stage");
        assert_eq!(parsed.flow().flow_id(), "Sequence, 1");
        assert_eq!(parsed.package().cluster(), "clusterX");

        let data_flow = DataFlowUrn::new(package(), "Copy, rows");
        assert_eq!(data_flow.to_string().parse::<DataFlowUrn>().unwrap(), data_flow);
    }

    #[test]
    fn test_nested_parent_needs_balanced_parentheses() {
        for text in [
            "urn:li:ssisControlFlow:(urn:li:ssisPackage:(OrchA,pkg1,clusterX,flow1)",
            "urn:li:ssisControlFlow:(urn:li:ssisPackage:(OrchA,pkg1,clusterX)flow1)",
            "urn:li:ssisControlFlow:(flow1),x)",
        ] {
            assert!(text.parse::<ControlFlowUrn>().is_err(), "{}", text);
        }
    }

    #[test]
    fn test_data_flow_urn_format() {
        let data_flow = DataFlowUrn::new(package(), "df1");
        assert_eq!(
            data_flow.to_string(),
            "urn:li:ssisDataFlow:(urn:li:ssisPackage:(OrchA,pkg1,clusterX),df1)"
        );
    }

    #[test]
    fn test_ssis_urn_dispatch() {
        let urn: SsisUrn = "urn:li:ssisDataFlow:(urn:li:ssisPackage:(OrchA,pkg1,clusterX),df1)"
            .parse()
            .unwrap();
        assert_eq!(urn.entity_type(), EntityType::SsisDataFlow);
        assert_eq!(urn.id(), "df1");
        assert_eq!(urn.package().cluster(), "clusterX");

        let err = "urn:li:dataset:(a,b,c)".parse::<SsisUrn>().unwrap_err();
        assert!(matches!(err, UrnError::UnknownEntityType { .. }));
    }

    #[test]
    fn test_serializes_as_string() {
        let flow = ControlFlowUrn::new(package(), "flow1");
        let json = serde_json::to_string(&flow).unwrap();
        assert_eq!(
            json,
            "\"urn:li:ssisControlFlow:(urn:li:ssisPackage:(OrchA,pkg1,clusterX),flow1)\""
        );
        let back: ControlFlowUrn = serde_json::from_str(&json).unwrap();
        assert_eq!(back, flow);

        assert!(serde_json::from_str::<PackageUrn>("\"garbage\"").is_err());
    }
}
