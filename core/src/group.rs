// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

/// A reference from a group to a user (or from a user to a group).
#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct ScimMember {
    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    #[serde(rename = "$ref")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl ScimMember {
    pub fn new(value: &str) -> Self {
        Self { value: value.to_string(), display: None, reference: None }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    #[serde(default)]
    pub schemas: Vec<String>,

    pub display_name: String,

    #[serde(default)]
    pub members: Vec<ScimMember>,
}

impl CreateGroupRequest {
    pub fn new(display_name: String) -> Self {
        Self {
            schemas: vec![GROUP_URN.to_string()],
            display_name,
            members: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,

    pub display_name: String,

    #[serde(default)]
    pub members: Vec<ScimMember>,
}

impl Group {
    pub fn has_member(&self, member_id: &str) -> bool {
        self.members.iter().any(|m| m.value == member_id)
    }
}
