// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct Email {
    pub value: String,

    #[serde(rename = "type")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    pub schemas: Vec<String>,

    pub user_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<Email>,
}

impl CreateUserRequest {
    pub fn new(user_name: String, display_name: Option<String>) -> Self {
        // Account users are addressed by email, so the user name doubles as
        // the primary address.
        let emails = vec![Email {
            value: user_name.clone(),
            email_type: Some(String::from("work")),
            primary: Some(true),
        }];

        Self {
            schemas: vec![USER_URN.to_string()],
            user_name,
            display_name,
            emails,
        }
    }
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,

    pub user_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub emails: Vec<Email>,

    /// Groups are read only on a user.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<ScimMember>,
}
