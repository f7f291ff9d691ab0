// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

/// Build a SCIM `eq` filter. Quotes inside the value are escaped.
fn eq_filter(attribute: &str, value: &str) -> String {
    format!("{attribute} eq \"{}\"", value.replace('"', "\\\""))
}

/// The SCIM 2.0 endpoints of a single account.
#[derive(Clone)]
pub struct AccountScimClient {
    pub users: AccountUsersClient,
    pub groups: AccountGroupsClient,
}

impl AccountScimClient {
    pub fn new(client: RestClient, account_id: &str) -> Result<Self, ClientError> {
        let account_id = required_text("account_id", account_id)?;
        let base_path = ApiPath::new(&[
            "api",
            "2.0",
            "accounts",
            account_id.as_str(),
            "scim",
            "v2",
        ]);

        Ok(Self {
            users: AccountUsersClient {
                client: client.clone(),
                path: base_path.join("Users"),
            },
            groups: AccountGroupsClient {
                client,
                path: base_path.join("Groups"),
            },
        })
    }
}

#[derive(Clone)]
pub struct AccountUsersClient {
    client: RestClient,
    path: ApiPath,
}

impl AccountUsersClient {
    pub fn list(&self) -> Result<Vec<User>, ClientError> {
        let response: ListResponse<User> =
            self.client.get_json(&self.path, &[])?;

        Ok(response.resources)
    }

    pub fn get_by_id(&self, user_id: &str) -> Result<User, ClientError> {
        let user_id = required_text("user_id", user_id)?;

        self.client.get_json(&self.path.join(&user_id), &[])
    }

    pub fn get_by_name(
        &self,
        user_name: &str,
    ) -> Result<Option<User>, ClientError> {
        let user_name = required_text("user_name", user_name)?;
        let filter = eq_filter("userName", &user_name);

        let response: ListResponse<User> =
            self.client.get_json(&self.path, &[("filter", filter.as_str())])?;

        Ok(response.resources.into_iter().next())
    }

    pub fn create(
        &self,
        user_name: &str,
        display_name: Option<&str>,
    ) -> Result<User, ClientError> {
        let user_name = required_text("user_name", user_name)?;
        let display_name = string_value(
            "display_name",
            display_name,
            &Constraints::optional().min_length(1),
        )?;

        let request = CreateUserRequest::new(user_name, display_name);
        self.client.post_json(&self.path, &request)
    }

    pub fn delete_by_id(&self, user_id: &str) -> Result<(), ClientError> {
        let user_id = required_text("user_id", user_id)?;

        self.client.delete(&self.path.join(&user_id))
    }
}

#[derive(Clone)]
pub struct AccountGroupsClient {
    client: RestClient,
    path: ApiPath,
}

impl AccountGroupsClient {
    pub fn list(&self) -> Result<Vec<Group>, ClientError> {
        let response: ListResponse<Group> =
            self.client.get_json(&self.path, &[])?;

        Ok(response.resources)
    }

    pub fn get_by_id(&self, group_id: &str) -> Result<Group, ClientError> {
        let group_id = required_text("group_id", group_id)?;

        self.client.get_json(&self.path.join(&group_id), &[])
    }

    pub fn get_by_name(
        &self,
        display_name: &str,
    ) -> Result<Option<Group>, ClientError> {
        let display_name = required_text("display_name", display_name)?;
        let filter = eq_filter("displayName", &display_name);

        let response: ListResponse<Group> =
            self.client.get_json(&self.path, &[("filter", filter.as_str())])?;

        Ok(response.resources.into_iter().next())
    }

    pub fn create(&self, display_name: &str) -> Result<Group, ClientError> {
        let display_name = required_text("display_name", display_name)?;

        let request = CreateGroupRequest::new(display_name);
        self.client.post_json(&self.path, &request)
    }

    pub fn add_member(
        &self,
        group_id: &str,
        member_id: &str,
    ) -> Result<(), ClientError> {
        let group_id = required_text("group_id", group_id)?;
        let member_id = required_text("member_id", member_id)?;

        let request = PatchRequest::add_members(&[member_id.as_str()]);
        self.client.patch(&self.path.join(&group_id), &request)
    }

    pub fn remove_member(
        &self,
        group_id: &str,
        member_id: &str,
    ) -> Result<(), ClientError> {
        let group_id = required_text("group_id", group_id)?;
        let member_id = required_text("member_id", member_id)?;

        let request = PatchRequest::remove_member(&member_id);
        self.client.patch(&self.path.join(&group_id), &request)
    }

    pub fn delete_by_id(&self, group_id: &str) -> Result<(), ClientError> {
        let group_id = required_text("group_id", group_id)?;

        self.client.delete(&self.path.join(&group_id))
    }
}
