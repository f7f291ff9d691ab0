// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

pub const DEFAULT_ACCOUNTS_ENDPOINT: &str =
    "https://accounts.cloud.databricks.com";

/// Root of the account-level API: one account, one shared [`RestClient`],
/// and the sub-clients built on top of it.
pub struct AccountsClient {
    account_id: String,
    client: RestClient,
    pub scim: AccountScimClient,
    pub workspaces: WorkspacesClient,
}

impl AccountsClient {
    /// Connect to the default accounts endpoint with basic authentication.
    pub fn new(
        log: Logger,
        account_id: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, ClientError> {
        Self::with_endpoint(
            log,
            DEFAULT_ACCOUNTS_ENDPOINT,
            account_id,
            Credentials::basic(username, password),
        )
    }

    pub fn with_endpoint(
        log: Logger,
        endpoint: &str,
        account_id: &str,
        credentials: Credentials,
    ) -> Result<Self, ClientError> {
        let account_id = required_text("account_id", account_id)?;
        let client = RestClient::new(log, endpoint, credentials)?;

        let scim = AccountScimClient::new(client.clone(), &account_id)?;
        let workspaces = WorkspacesClient::new(client.clone(), &account_id)?;

        Ok(Self { account_id, client, scim, workspaces })
    }

    pub fn endpoint(&self) -> &str {
        self.client.endpoint()
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn client(&self) -> &RestClient {
        &self.client
    }
}
