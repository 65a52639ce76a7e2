//! URNs for catalog entities outside the SSIS hierarchy
//!
//! Users, groups and tags are referenced by plain string URNs. Datasets are
//! opaque references supplied by whatever source discovered them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entity_type::URN_PREFIX;

pub const CORP_USER_PREFIX: &str = "urn:li:corpuser:";
pub const CORP_GROUP_PREFIX: &str = "urn:li:corpGroup:";
pub const TAG_PREFIX: &str = "urn:li:tag:";

fn with_prefix(prefix: &str, value: &str) -> String {
    if value.starts_with(prefix) {
        value.to_string()
    } else {
        format!("{}{}", prefix, value)
    }
}

/// User URN for an owner id. Already-qualified URNs pass through unchanged.
pub fn make_user_urn(user: &str) -> String {
    with_prefix(CORP_USER_PREFIX, user)
}

/// Group URN for a group id. Already-qualified URNs pass through unchanged.
pub fn make_group_urn(group: &str) -> String {
    with_prefix(CORP_GROUP_PREFIX, group)
}

/// Tag URN for a tag name. Already-qualified URNs pass through unchanged.
pub fn make_tag_urn(tag: &str) -> String {
    with_prefix(TAG_PREFIX, tag)
}

/// Entity type segment of a `urn:li:<type>:...` string
pub fn entity_type_of(urn: &str) -> Option<&str> {
    let rest = urn.strip_prefix(URN_PREFIX)?;
    let (entity_type, _) = rest.split_once(':')?;
    (!entity_type.is_empty()).then_some(entity_type)
}

/// Reference to a dataset consumed or produced by a task or data flow
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetUrn(String);

impl DatasetUrn {
    pub fn new(urn: impl Into<String>) -> Self {
        Self(urn.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Catalog entity type of the reference, "dataset" when the string does
    /// not carry one
    pub fn entity_type(&self) -> &str {
        entity_type_of(&self.0).unwrap_or("dataset")
    }
}

impl fmt::Display for DatasetUrn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DatasetUrn {
    fn from(urn: &str) -> Self {
        Self::new(urn)
    }
}

impl From<String> for DatasetUrn {
    fn from(urn: String) -> Self {
        Self(urn)
    }
}

impl AsRef<str> for DatasetUrn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_user_urn() {
        assert_eq!(make_user_urn("alice"), "urn:li:corpuser:alice");
        assert_eq!(make_user_urn("urn:li:corpuser:alice"), "urn:li:corpuser:alice");
    }

    #[test]
    fn test_make_group_urn() {
        assert_eq!(make_group_urn("team1"), "urn:li:corpGroup:team1");
    }

    #[test]
    fn test_make_tag_urn() {
        assert_eq!(make_tag_urn("etl"), "urn:li:tag:etl");
        assert_eq!(make_tag_urn("urn:li:tag:etl"), "urn:li:tag:etl");
    }

    #[test]
    fn test_entity_type_of() {
        assert_eq!(
            entity_type_of("urn:li:dataset:(urn:li:dataPlatform:mssql,db.t,PROD)"),
            Some("dataset")
        );
        assert_eq!(entity_type_of("urn:li:ssisPackage:(a,b,c)"), Some("ssisPackage"));
        assert_eq!(entity_type_of("ds:a"), None);
        assert_eq!(entity_type_of("urn:li::x"), None);
    }

    #[test]
    fn test_dataset_entity_type_fallback() {
        assert_eq!(DatasetUrn::from("ds:a").entity_type(), "dataset");
        assert_eq!(
            DatasetUrn::from("urn:li:dataset:(urn:li:dataPlatform:mssql,db.t,PROD)").entity_type(),
            "dataset"
        );
    }
}
