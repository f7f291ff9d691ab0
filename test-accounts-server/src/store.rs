// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;

use chrono::Utc;
use dbrest::CreateGroupRequest;
use dbrest::CreateUserRequest;
use dbrest::CreateWorkspaceRequest;
use dbrest::Group;
use dbrest::PatchRequest;
use dbrest::ScimMember;
use dbrest::User;
use dbrest::Workspace;
use dbrest::WorkspaceStatus;
use unicase::UniCase;
use uuid::Uuid;

use crate::ApiError;

/// The filters this server understands. SCIM attribute names are case
/// insensitive; so are user names.
#[derive(Debug, PartialEq)]
pub enum FilterOp {
    UserNameEq(String),
    DisplayNameEq(String),
}

impl FilterOp {
    pub fn parse(filter: &str) -> Result<FilterOp, ApiError> {
        let invalid =
            || ApiError::invalid(format!("invalid or unsupported filter {filter}"));

        let mut parts = filter.trim().splitn(3, ' ');
        let (Some(attribute), Some(operator), Some(value)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        if !operator.eq_ignore_ascii_case("eq") {
            return Err(invalid());
        }

        let Some(value) =
            value.trim().strip_prefix('"').and_then(|v| v.strip_suffix('"'))
        else {
            return Err(invalid());
        };
        let value = value.replace("\\\"", "\"");

        let attribute = UniCase::new(attribute);
        if attribute == UniCase::new("userName") {
            Ok(FilterOp::UserNameEq(value))
        } else if attribute == UniCase::new("displayName") {
            Ok(FilterOp::DisplayNameEq(value))
        } else {
            Err(invalid())
        }
    }
}

#[derive(Default)]
struct AccountState {
    users: BTreeMap<String, User>,
    groups: BTreeMap<String, Group>,
    workspaces: BTreeMap<i64, Workspace>,
}

impl AccountState {
    /// Users carry the groups they belong to, which are derived from the
    /// groups' member lists rather than stored.
    fn with_groups(&self, user: &User) -> User {
        let groups = self
            .groups
            .values()
            .filter(|group| group.has_member(&user.id))
            .map(|group| ScimMember {
                value: group.id.clone(),
                display: Some(group.display_name.clone()),
                reference: None,
            })
            .collect();

        User { groups, ..user.clone() }
    }

    fn check_members(&self, members: &[ScimMember]) -> Result<(), ApiError> {
        for member in members {
            if !self.users.contains_key(&member.value) {
                return Err(ApiError::not_found("User", &member.value));
            }
        }

        Ok(())
    }
}

/// All state of the server, keyed by account id. Accounts spring into
/// existence on first use.
#[derive(Default)]
pub struct AccountsStore {
    accounts: BTreeMap<String, AccountState>,
    next_workspace_id: i64,
}

impl AccountsStore {
    fn account(&mut self, account_id: &str) -> &mut AccountState {
        self.accounts.entry(account_id.to_string()).or_default()
    }

    pub fn list_users(
        &mut self,
        account_id: &str,
        filter: Option<&str>,
    ) -> Result<Vec<User>, ApiError> {
        let filter = filter.map(FilterOp::parse).transpose()?;
        let account: &AccountState = self.account(account_id);

        let users = account.users.values().filter(|user| match &filter {
            None => true,
            Some(FilterOp::UserNameEq(name)) => {
                UniCase::new(user.user_name.as_str()) == UniCase::new(name.as_str())
            }
            Some(FilterOp::DisplayNameEq(name)) => {
                user.display_name.as_deref() == Some(name.as_str())
            }
        });

        Ok(users.map(|user| account.with_groups(user)).collect())
    }

    pub fn get_user(
        &mut self,
        account_id: &str,
        user_id: &str,
    ) -> Result<User, ApiError> {
        let account: &AccountState = self.account(account_id);

        account
            .users
            .get(user_id)
            .map(|user| account.with_groups(user))
            .ok_or(ApiError::not_found("User", user_id))
    }

    pub fn create_user(
        &mut self,
        account_id: &str,
        request: CreateUserRequest,
    ) -> Result<User, ApiError> {
        let account = self.account(account_id);

        let name = UniCase::new(request.user_name.as_str());
        if account
            .users
            .values()
            .any(|user| UniCase::new(user.user_name.as_str()) == name)
        {
            return Err(ApiError::conflict("User", &request.user_name));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            user_name: request.user_name,
            display_name: request.display_name,
            active: Some(true),
            emails: request.emails,
            groups: Vec::new(),
        };

        account.users.insert(user.id.clone(), user.clone());

        Ok(user)
    }

    pub fn delete_user(
        &mut self,
        account_id: &str,
        user_id: &str,
    ) -> Result<(), ApiError> {
        let account = self.account(account_id);

        if account.users.remove(user_id).is_none() {
            return Err(ApiError::not_found("User", user_id));
        }

        for group in account.groups.values_mut() {
            group.members.retain(|m| m.value != user_id);
        }

        Ok(())
    }

    pub fn list_groups(
        &mut self,
        account_id: &str,
        filter: Option<&str>,
    ) -> Result<Vec<Group>, ApiError> {
        let filter = filter.map(FilterOp::parse).transpose()?;
        let account = self.account(account_id);

        let groups = account.groups.values().filter(|group| match &filter {
            None => true,
            Some(FilterOp::DisplayNameEq(name)) => &group.display_name == name,
            Some(FilterOp::UserNameEq(_)) => false,
        });

        Ok(groups.cloned().collect())
    }

    pub fn get_group(
        &mut self,
        account_id: &str,
        group_id: &str,
    ) -> Result<Group, ApiError> {
        self.account(account_id)
            .groups
            .get(group_id)
            .cloned()
            .ok_or(ApiError::not_found("Group", group_id))
    }

    pub fn create_group(
        &mut self,
        account_id: &str,
        request: CreateGroupRequest,
    ) -> Result<Group, ApiError> {
        let account = self.account(account_id);

        if account
            .groups
            .values()
            .any(|group| group.display_name == request.display_name)
        {
            return Err(ApiError::conflict("Group", &request.display_name));
        }

        account.check_members(&request.members)?;

        let group = Group {
            id: Uuid::new_v4().to_string(),
            display_name: request.display_name,
            members: request.members,
        };

        account.groups.insert(group.id.clone(), group.clone());

        Ok(group)
    }

    pub fn patch_group(
        &mut self,
        account_id: &str,
        group_id: &str,
        request: PatchRequest,
    ) -> Result<Group, ApiError> {
        let account = self.account(account_id);

        let group = account
            .groups
            .get(group_id)
            .ok_or(ApiError::not_found("Group", group_id))?;

        let updated_group = request.apply_group_ops(group)?;
        account.check_members(&updated_group.members)?;

        account.groups.insert(group_id.to_string(), updated_group.clone());

        Ok(updated_group)
    }

    pub fn delete_group(
        &mut self,
        account_id: &str,
        group_id: &str,
    ) -> Result<(), ApiError> {
        match self.account(account_id).groups.remove(group_id) {
            Some(_) => Ok(()),
            None => Err(ApiError::not_found("Group", group_id)),
        }
    }

    pub fn list_workspaces(&mut self, account_id: &str) -> Vec<Workspace> {
        self.account(account_id).workspaces.values().cloned().collect()
    }

    pub fn get_workspace(
        &mut self,
        account_id: &str,
        workspace_id: i64,
    ) -> Result<Workspace, ApiError> {
        self.account(account_id)
            .workspaces
            .get(&workspace_id)
            .cloned()
            .ok_or(ApiError::not_found("Workspace", &workspace_id.to_string()))
    }

    pub fn create_workspace(
        &mut self,
        account_id: &str,
        request: CreateWorkspaceRequest,
    ) -> Result<Workspace, ApiError> {
        if request.workspace_name.is_empty() {
            return Err(ApiError::invalid(String::from(
                "workspace_name must not be empty",
            )));
        }

        self.next_workspace_id += 1;
        let workspace_id = self.next_workspace_id;

        let account = self.account(account_id);
        if account
            .workspaces
            .values()
            .any(|w| w.workspace_name == request.workspace_name)
        {
            return Err(ApiError::conflict("Workspace", &request.workspace_name));
        }

        let deployment_name = request.deployment_name.unwrap_or_else(|| {
            format!("dbc-{}", &Uuid::new_v4().simple().to_string()[..12])
        });

        let workspace = Workspace {
            workspace_id,
            workspace_name: request.workspace_name,
            account_id: Some(account_id.to_string()),
            deployment_name: Some(deployment_name),
            aws_region: request.aws_region,
            credentials_id: request.credentials_id,
            storage_configuration_id: request.storage_configuration_id,
            network_id: request.network_id,
            pricing_tier: request.pricing_tier,
            workspace_status: Some(WorkspaceStatus::Running),
            workspace_status_message: Some(String::from(
                "Workspace is running.",
            )),
            creation_time: Some(Utc::now().timestamp_millis()),
        };

        account.workspaces.insert(workspace_id, workspace.clone());

        Ok(workspace)
    }

    pub fn delete_workspace(
        &mut self,
        account_id: &str,
        workspace_id: i64,
    ) -> Result<(), ApiError> {
        match self.account(account_id).workspaces.remove(&workspace_id) {
            Some(_) => Ok(()),
            None => {
                Err(ApiError::not_found("Workspace", &workspace_id.to_string()))
            }
        }
    }
}
