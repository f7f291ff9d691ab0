// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! An in-memory stand-in for the account API, serving the SCIM and workspace
//! routes that `dbrest` talks to. State lives for the lifetime of the process
//! and is partitioned by account id; any account id is accepted.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use dropshot::ApiDescription;
use dropshot::Body;
use dropshot::ConfigDropshot;
use dropshot::ConfigLogging;
use dropshot::ConfigLoggingLevel;
use dropshot::HttpError;
use dropshot::HttpServer;
use dropshot::Path;
use dropshot::Query;
use dropshot::RequestContext;
use dropshot::ServerBuilder;
use dropshot::TypedBody;
use dropshot::endpoint;
use http::Response;
use http::StatusCode;
use schemars::JsonSchema;
use serde::Deserialize;
use slog::Logger;
use slog::info;

use dbrest::ListResponse;

mod groups;
mod response;
mod store;
mod users;
mod workspaces;

pub use response::*;
pub use store::*;

pub struct ServerContext {
    log: Logger,
    store: Mutex<AccountsStore>,
}

impl ServerContext {
    pub fn new(log: Logger) -> Self {
        Self { log, store: Mutex::new(AccountsStore::default()) }
    }

    fn store(&self) -> MutexGuard<'_, AccountsStore> {
        self.store.lock().unwrap()
    }
}

#[derive(Deserialize, JsonSchema)]
struct AccountPathParam {
    account_id: String,
}

#[derive(Deserialize, JsonSchema)]
struct ListQueryParams {
    /// A SCIM filter of the form `<attribute> eq "<value>"`
    filter: Option<String>,
}

fn register<E: std::fmt::Display>(result: Result<(), E>) -> anyhow::Result<()> {
    result.map_err(|e| anyhow::anyhow!("registering endpoint failed: {e}"))
}

fn api() -> anyhow::Result<ApiDescription<Arc<ServerContext>>> {
    let mut api = ApiDescription::new();

    register(api.register(users::list_users))?;
    register(api.register(users::get_user))?;
    register(api.register(users::create_user))?;
    register(api.register(users::delete_user))?;

    register(api.register(groups::list_groups))?;
    register(api.register(groups::get_group))?;
    register(api.register(groups::create_group))?;
    register(api.register(groups::patch_group))?;
    register(api.register(groups::delete_group))?;

    register(api.register(workspaces::list_workspaces))?;
    register(api.register(workspaces::get_workspace))?;
    register(api.register(workspaces::create_workspace))?;
    register(api.register(workspaces::delete_workspace))?;

    Ok(api)
}

/// Start the server. Binds an ephemeral port when no address is given.
///
/// Must be called from within a tokio runtime.
pub fn create_http_server(
    bind_address: Option<SocketAddr>,
) -> anyhow::Result<HttpServer<Arc<ServerContext>>> {
    let bind_address = match bind_address {
        Some(bind_address) => bind_address,
        None => "127.0.0.1:0".parse()?,
    };

    let config = ConfigDropshot { bind_address, ..Default::default() };

    let log = ConfigLogging::StderrTerminal { level: ConfigLoggingLevel::Info }
        .to_logger("dbrest-test-accounts-server")?;

    let context = Arc::new(ServerContext::new(log.clone()));

    let server = ServerBuilder::new(api()?, context, log)
        .config(config)
        .start()
        .map_err(|e| anyhow::anyhow!("starting server failed: {e}"))?;

    Ok(server)
}

/// Run the server on its own thread and runtime, returning once it is
/// listening. For blocking callers such as tests; the server lives until the
/// process exits.
pub fn spawn_background_server() -> anyhow::Result<SocketAddr> {
    let (tx, rx) = std::sync::mpsc::channel::<anyhow::Result<SocketAddr>>();

    std::thread::spawn(move || {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                let _ = tx.send(Err(e.into()));
                return;
            }
        };

        runtime.block_on(async move {
            match create_http_server(None) {
                Ok(server) => {
                    let _ = tx.send(Ok(server.local_addr()));
                    let _ = server.await;
                }

                Err(e) => {
                    let _ = tx.send(Err(e));
                }
            }
        });
    });

    rx.recv()?
}
