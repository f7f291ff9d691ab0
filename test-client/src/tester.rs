// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use anyhow::Context;
use anyhow::bail;
use uuid::Uuid;

use dbrest::AccountsClient;
use dbrest::ClientError;
use dbrest::CreateWorkspaceRequest;
use dbrest::Group;
use dbrest::User;

fn expect_not_found<T>(
    result: Result<T, ClientError>,
    what: &str,
) -> anyhow::Result<()> {
    match result {
        Err(e) if e.is_not_found() => Ok(()),
        Err(e) => Err(anyhow::Error::from(e)
            .context(format!("expected {what} to be not found"))),
        Ok(_) => bail!("{what} unexpectedly exists"),
    }
}

/// Drives an [`AccountsClient`] through create, lookup and delete of every
/// resource kind, leaving the account as it found it.
pub struct Tester {
    client: AccountsClient,
    suffix: String,
    workspaces: bool,
}

impl Tester {
    pub fn new(client: AccountsClient) -> Self {
        let suffix = Uuid::new_v4().simple().to_string()[..8].to_string();
        Self { client, suffix, workspaces: false }
    }

    /// Against a real account creating a workspace provisions cloud
    /// resources, so the workspace checks only run when asked for.
    pub fn with_workspaces(mut self, workspaces: bool) -> Self {
        self.workspaces = workspaces;
        self
    }

    pub fn run(&self) -> anyhow::Result<()> {
        self.nonexistent_resource_tests()
            .context("nonexistent_resource_tests")?;

        let user = self.create_user_tests().context("create_user_tests")?;
        let group =
            self.group_membership_tests(&user).context("group_membership_tests")?;

        if self.workspaces {
            self.workspace_tests().context("workspace_tests")?;
        }

        self.cleanup(&user, &group).context("cleanup")?;

        Ok(())
    }

    fn nonexistent_resource_tests(&self) -> anyhow::Result<()> {
        let random_id = "999999";

        expect_not_found(self.client.scim.users.get_by_id(random_id), "user")?;
        expect_not_found(self.client.scim.groups.get_by_id(random_id), "group")?;
        expect_not_found(
            self.client.scim.users.delete_by_id(random_id),
            "deleted user",
        )?;

        let user_name = format!("nobody-{}@example.com", self.suffix);
        if let Some(user) = self.client.scim.users.get_by_name(&user_name)? {
            bail!("lookup of {user_name} returned user {}", user.id);
        }

        Ok(())
    }

    fn create_user_tests(&self) -> anyhow::Result<User> {
        let user_name = format!("dbrest-test-{}@example.com", self.suffix);

        let user = self
            .client
            .scim
            .users
            .create(&user_name, Some("Dwight Schrute"))?;

        if user.user_name != user_name {
            bail!("user name of test user is {}, not {user_name}", user.user_name);
        }

        match self.client.scim.users.create(&user_name, None) {
            Err(e) if e.status().is_some_and(|s| s.as_u16() == 409) => {}
            Err(e) => {
                return Err(anyhow::Error::from(e)
                    .context("conflicting create failed the wrong way"));
            }
            Ok(duplicate) => {
                bail!("conflicting create returned user {}", duplicate.id)
            }
        }

        let Some(found) = self.client.scim.users.get_by_name(&user_name)? else {
            bail!("lookup of {user_name} returned nothing");
        };

        if found.id != user.id {
            bail!("lookup of {user_name} returned {} not {}", found.id, user.id);
        }

        let fetched = self.client.scim.users.get_by_id(&user.id)?;
        if fetched.user_name != user_name {
            bail!("user {} has name {}", user.id, fetched.user_name);
        }

        let users = self.client.scim.users.list()?;
        if !users.iter().any(|u| u.id == user.id) {
            bail!("users list does not contain {}", user.id);
        }

        Ok(user)
    }

    fn group_membership_tests(&self, user: &User) -> anyhow::Result<Group> {
        let display_name = format!("dbrest-test-{}", self.suffix);
        let groups = &self.client.scim.groups;

        let group = groups.create(&display_name)?;
        if group.display_name != display_name {
            bail!(
                "display name of test group is {}, not {display_name}",
                group.display_name
            );
        }

        groups.add_member(&group.id, &user.id)?;

        if !groups.get_by_id(&group.id)?.has_member(&user.id) {
            bail!("group {} does not contain user {}", group.id, user.id);
        }

        let member = self.client.scim.users.get_by_id(&user.id)?;
        if !member.groups.iter().any(|g| g.value == group.id) {
            bail!("user {} does not list group {}", user.id, group.id);
        }

        let Some(found) = groups.get_by_name(&display_name)? else {
            bail!("lookup of group {display_name} returned nothing");
        };

        if found.id != group.id {
            bail!("lookup of {display_name} returned {} not {}", found.id, group.id);
        }

        groups.remove_member(&group.id, &user.id)?;

        if groups.get_by_id(&group.id)?.has_member(&user.id) {
            bail!("group {} still contains user {}", group.id, user.id);
        }

        Ok(group)
    }

    fn workspace_tests(&self) -> anyhow::Result<()> {
        let workspace_name = format!("dbrest-test-{}", self.suffix);
        let workspaces = &self.client.workspaces;

        let workspace =
            workspaces.create(&CreateWorkspaceRequest::new(&workspace_name))?;

        let fetched = workspaces.get_by_id(workspace.workspace_id)?;
        if fetched.workspace_name != workspace_name {
            bail!(
                "workspace {} has name {}",
                workspace.workspace_id,
                fetched.workspace_name
            );
        }

        let Some(found) = workspaces.get_by_name(&workspace_name)? else {
            bail!("lookup of workspace {workspace_name} returned nothing");
        };

        if found.workspace_id != workspace.workspace_id {
            bail!(
                "lookup of {workspace_name} returned {} not {}",
                found.workspace_id,
                workspace.workspace_id
            );
        }

        workspaces.delete_by_id(workspace.workspace_id)?;

        expect_not_found(
            workspaces.get_by_id(workspace.workspace_id),
            "deleted workspace",
        )
    }

    fn cleanup(&self, user: &User, group: &Group) -> anyhow::Result<()> {
        self.client.scim.groups.delete_by_id(&group.id)?;
        self.client.scim.users.delete_by_id(&user.id)?;

        expect_not_found(self.client.scim.groups.get_by_id(&group.id), "group")?;
        expect_not_found(self.client.scim.users.get_by_id(&user.id), "user")
    }
}
