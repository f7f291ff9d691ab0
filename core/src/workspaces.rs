// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

#[derive(Serialize, Deserialize, JsonSchema, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkspaceStatus {
    NotProvisioned,
    Provisioning,
    Running,
    Failed,
    Banned,
    Cancelling,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct Workspace {
    pub workspace_id: i64,

    pub workspace_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_configuration_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_tier: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_status: Option<WorkspaceStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_status_message: Option<String>,

    /// Milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<i64>,
}

#[derive(Serialize, Deserialize, JsonSchema, Clone, Debug, Default, PartialEq)]
pub struct CreateWorkspaceRequest {
    pub workspace_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws_region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_configuration_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_tier: Option<String>,
}

impl CreateWorkspaceRequest {
    pub fn new(workspace_name: &str) -> Self {
        Self { workspace_name: workspace_name.to_string(), ..Self::default() }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        required_text("workspace_name", &self.workspace_name)?;

        let optional = Constraints::optional().min_length(1);
        for (name, value) in [
            ("deployment_name", &self.deployment_name),
            ("aws_region", &self.aws_region),
            ("credentials_id", &self.credentials_id),
            ("storage_configuration_id", &self.storage_configuration_id),
            ("network_id", &self.network_id),
            ("pricing_tier", &self.pricing_tier),
        ] {
            string_value(name, value.as_deref(), &optional)?;
        }

        Ok(())
    }
}

fn validate_workspace_id(workspace_id: i64) -> Result<i64, ValidationError> {
    Ok(integer_value(
        "workspace_id",
        workspace_id,
        &Constraints::required().min_value(1),
    )?
    .unwrap_or_default())
}

/// The workspaces owned by a single account.
#[derive(Clone)]
pub struct WorkspacesClient {
    client: RestClient,
    path: ApiPath,
}

impl WorkspacesClient {
    pub fn new(client: RestClient, account_id: &str) -> Result<Self, ClientError> {
        let account_id = required_text("account_id", account_id)?;

        let path = ApiPath::new(&[
            "api",
            "2.0",
            "accounts",
            account_id.as_str(),
            "workspaces",
        ]);

        Ok(Self { client, path })
    }

    pub fn list(&self) -> Result<Vec<Workspace>, ClientError> {
        self.client.get_json(&self.path, &[])
    }

    pub fn get_by_id(&self, workspace_id: i64) -> Result<Workspace, ClientError> {
        let workspace_id = validate_workspace_id(workspace_id)?;

        self.client.get_json(&self.path.join(&workspace_id.to_string()), &[])
    }

    /// The account API has no lookup by name, so this scans the full list.
    pub fn get_by_name(
        &self,
        workspace_name: &str,
    ) -> Result<Option<Workspace>, ClientError> {
        let workspace_name = required_text("workspace_name", workspace_name)?;

        Ok(self
            .list()?
            .into_iter()
            .find(|w| w.workspace_name == workspace_name))
    }

    pub fn create(
        &self,
        request: &CreateWorkspaceRequest,
    ) -> Result<Workspace, ClientError> {
        request.validate()?;

        self.client.post_json(&self.path, request)
    }

    pub fn delete_by_id(&self, workspace_id: i64) -> Result<(), ClientError> {
        let workspace_id = validate_workspace_id(workspace_id)?;

        self.client.delete(&self.path.join(&workspace_id.to_string()))
    }
}
