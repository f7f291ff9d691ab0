// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

#[derive(Debug, PartialEq)]
pub enum PatchRequestError {
    Invalid(String),
    Unsupported(String),
}

impl std::fmt::Display for PatchRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PatchRequestError::Invalid(s) => write!(f, "invalid patch: {s}"),
            PatchRequestError::Unsupported(s) => {
                write!(f, "unsupported patch: {s}")
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, PartialEq)]
#[serde(tag = "op")]
pub enum PatchOp {
    #[serde(rename = "add")]
    Add { path: Option<String>, value: serde_json::Value },
    #[serde(rename = "remove")]
    Remove { path: String },
}

#[derive(Debug, Serialize, Deserialize, JsonSchema, Clone, PartialEq)]
pub struct PatchRequest {
    pub schemas: Vec<String>,
    #[serde(rename = "Operations")]
    pub operations: Vec<PatchOp>,
}

impl PatchRequest {
    fn new(operations: Vec<PatchOp>) -> Self {
        Self { schemas: vec![PATCHOP_URN.to_string()], operations }
    }

    /// Add the given ids to a group's members.
    pub fn add_members(member_ids: &[&str]) -> Self {
        let members: Vec<ScimMember> =
            member_ids.iter().map(|id| ScimMember::new(id)).collect();

        Self::new(vec![PatchOp::Add {
            path: Some(String::from("members")),
            value: serde_json::json!(members),
        }])
    }

    /// Remove a single member from a group.
    pub fn remove_member(member_id: &str) -> Self {
        Self::new(vec![PatchOp::Remove {
            path: format!("members[value eq \"{member_id}\"]"),
        }])
    }

    fn validate_schema(&self) -> Result<(), PatchRequestError> {
        match matches!(&self.schemas[..], [val] if val == PATCHOP_URN) {
            true => Ok(()),
            false => Err(PatchRequestError::Invalid(format!(
                "invalid patch schema {:?}",
                self.schemas
            ))),
        }
    }

    /// Apply every operation to `group`, leaving it untouched if any
    /// operation is rejected.
    pub fn apply_group_ops(
        &self,
        group: &Group,
    ) -> Result<Group, PatchRequestError> {
        self.validate_schema()?;
        let mut updated_group = group.clone();

        for patch_op in &self.operations {
            match patch_op {
                PatchOp::Add { path, value } => {
                    apply_group_add_op(path.as_deref(), value, &mut updated_group)?
                }
                PatchOp::Remove { path } => {
                    apply_group_remove_op(path, &mut updated_group)?
                }
            }
        }

        Ok(updated_group)
    }
}

fn apply_group_add_op(
    path: Option<&str>,
    value: &serde_json::Value,
    group: &mut Group,
) -> Result<(), PatchRequestError> {
    let Some(_path) = path.filter(|p| p.eq_ignore_ascii_case("members")) else {
        return Err(PatchRequestError::Unsupported(
            "group add op must provide members as the path".to_string(),
        ));
    };

    let Ok(members) = serde_json::from_value::<Vec<ScimMember>>(value.clone())
    else {
        return Err(PatchRequestError::Invalid(
            "group add op value must be an array of members".to_string(),
        ));
    };

    for member in members {
        if !group.members.iter().any(|m| m.value == member.value) {
            group.members.push(member);
        }
    }

    Ok(())
}

enum GroupRemoveOp {
    All,
    Individual(String),
}

fn parse_remove_path(path: &str) -> Result<GroupRemoveOp, PatchRequestError> {
    let path = path.trim();
    if path.eq_ignore_ascii_case("members") {
        return Ok(GroupRemoveOp::All);
    }

    let Some(filter) = path
        .get(..8)
        .filter(|prefix| prefix.eq_ignore_ascii_case("members["))
        .and_then(|_| path[8..].strip_suffix(']'))
    else {
        return Err(PatchRequestError::Unsupported(format!(
            "unsupported remove path {path}"
        )));
    };

    // `value eq "<id>"`, where the id must be quoted
    let mut parts = filter.trim().splitn(3, ' ');
    let (Some(attribute), Some(operator), Some(value)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return Err(PatchRequestError::Invalid(format!(
            "malformed member filter {filter}"
        )));
    };

    if !attribute.eq_ignore_ascii_case("value")
        || !operator.eq_ignore_ascii_case("eq")
    {
        return Err(PatchRequestError::Unsupported(format!(
            "unsupported member filter {filter}"
        )));
    }

    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .filter(|v| !v.is_empty())
        .map(|v| GroupRemoveOp::Individual(v.to_string()))
        .ok_or(PatchRequestError::Invalid(
            "individual group remove op must contain a quoted value in the \
                path"
                .to_string(),
        ))
}

fn apply_group_remove_op(
    path: &str,
    group: &mut Group,
) -> Result<(), PatchRequestError> {
    match parse_remove_path(path)? {
        GroupRemoveOp::All => group.members.clear(),
        GroupRemoveOp::Individual(value) => {
            group.members.retain(|m| m.value != value)
        }
    };

    Ok(())
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use crate::Group;
    use crate::PatchRequest;
    use crate::PatchRequestError;
    use crate::ScimMember;

    fn sales_reps() -> Group {
        Group {
            id: String::from("123"),
            display_name: String::from("Sales Reps"),
            members: vec![ScimMember::new("dschrute")],
        }
    }

    #[test]
    fn test_parse_group_members_add_op() {
        let json = json!({
          "schemas": [
            "urn:ietf:params:scim:api:messages:2.0:PatchOp"
          ],
          "Operations": [
            {
              "op": "add",
              "path": "members",
              "value": [
                {
                  "value": "abf4dd94-a4c0-4f67-89c9-76b03340cb9b"
                }
              ]
            }
          ]
        });

        let request = serde_json::from_value::<PatchRequest>(json).unwrap();
        assert_eq!(
            request,
            PatchRequest::add_members(&["abf4dd94-a4c0-4f67-89c9-76b03340cb9b"])
        );
    }

    #[test]
    fn test_add_members_skips_existing() {
        let group = PatchRequest::add_members(&["dschrute", "jhalpert"])
            .apply_group_ops(&sales_reps())
            .unwrap();

        let ids: Vec<&str> =
            group.members.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(ids, vec!["dschrute", "jhalpert"]);
    }

    #[test]
    fn test_remove_individual_member() {
        let group = PatchRequest::remove_member("dschrute")
            .apply_group_ops(&sales_reps())
            .unwrap();

        assert!(group.members.is_empty());
    }

    #[test]
    fn test_remove_all_members() {
        let json = json!({
          "schemas": [
            "urn:ietf:params:scim:api:messages:2.0:PatchOp"
          ],
          "Operations": [
            {
              "op": "remove",
              "path": "members"
            }
          ]
        });

        let request = serde_json::from_value::<PatchRequest>(json).unwrap();
        let group = request.apply_group_ops(&sales_reps()).unwrap();
        assert!(group.members.is_empty());
    }

    #[test]
    fn test_remove_requires_quoted_value() {
        let json = json!({
          "schemas": [
            "urn:ietf:params:scim:api:messages:2.0:PatchOp"
          ],
          "Operations": [
            {
              "op": "remove",
              "path": "members[value eq dschrute]"
            }
          ]
        });

        let request = serde_json::from_value::<PatchRequest>(json).unwrap();
        assert!(matches!(
            request.apply_group_ops(&sales_reps()),
            Err(PatchRequestError::Invalid(_))
        ));
    }

    #[test]
    fn test_wrong_schema_rejected() {
        let mut request = PatchRequest::remove_member("dschrute");
        request.schemas = vec![String::from("urn:example")];

        assert!(matches!(
            request.apply_group_ops(&sales_reps()),
            Err(PatchRequestError::Invalid(_))
        ));
    }
}
