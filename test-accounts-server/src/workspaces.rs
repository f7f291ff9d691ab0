// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

#[endpoint {
    method = GET,
    path = "/api/2.0/accounts/{account_id}/workspaces"
}]
pub async fn list_workspaces(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<AccountPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let workspaces = apictx.store().list_workspaces(&path_param.account_id);

    json_response(StatusCode::OK, &workspaces).map_err(HttpError::from)
}

#[derive(Deserialize, JsonSchema)]
struct WorkspacePathParam {
    account_id: String,
    workspace_id: i64,
}

#[endpoint {
    method = GET,
    path = "/api/2.0/accounts/{account_id}/workspaces/{workspace_id}"
}]
pub async fn get_workspace(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<WorkspacePathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let result = apictx
        .store()
        .get_workspace(&path_param.account_id, path_param.workspace_id);

    respond(result, StatusCode::OK)
}

#[endpoint {
    method = POST,
    path = "/api/2.0/accounts/{account_id}/workspaces",
}]
pub async fn create_workspace(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<AccountPathParam>,
    body: TypedBody<dbrest::CreateWorkspaceRequest>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();
    let request = body.into_inner();

    let result =
        apictx.store().create_workspace(&path_param.account_id, request);

    if let Ok(workspace) = &result {
        info!(
            apictx.log,
            "created workspace";
            "account_id" => &path_param.account_id,
            "workspace_id" => workspace.workspace_id
        );
    }

    respond(result, StatusCode::OK)
}

#[endpoint {
    method = DELETE,
    path = "/api/2.0/accounts/{account_id}/workspaces/{workspace_id}"
}]
pub async fn delete_workspace(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<WorkspacePathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    // The account API answers a workspace deletion with an empty object.
    let result = apictx
        .store()
        .delete_workspace(&path_param.account_id, path_param.workspace_id)
        .map(|()| serde_json::json!({}));

    respond(result, StatusCode::OK)
}
