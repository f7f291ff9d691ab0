// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

#[endpoint {
    method = GET,
    path = "/api/2.0/accounts/{account_id}/scim/v2/Groups"
}]
pub async fn list_groups(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<AccountPathParam>,
    query_params: Query<ListQueryParams>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();
    let query_params = query_params.into_inner();

    let result = apictx
        .store()
        .list_groups(&path_param.account_id, query_params.filter.as_deref())
        .map(ListResponse::from_resources);

    respond(result, StatusCode::OK)
}

#[derive(Deserialize, JsonSchema)]
struct GroupPathParam {
    account_id: String,
    group_id: String,
}

#[endpoint {
    method = GET,
    path = "/api/2.0/accounts/{account_id}/scim/v2/Groups/{group_id}"
}]
pub async fn get_group(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<GroupPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let result = apictx
        .store()
        .get_group(&path_param.account_id, &path_param.group_id);

    respond(result, StatusCode::OK)
}

#[endpoint {
    method = POST,
    path = "/api/2.0/accounts/{account_id}/scim/v2/Groups",
}]
pub async fn create_group(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<AccountPathParam>,
    body: TypedBody<dbrest::CreateGroupRequest>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();
    let request = body.into_inner();

    let result =
        apictx.store().create_group(&path_param.account_id, request);

    if let Ok(group) = &result {
        info!(
            apictx.log,
            "created group";
            "account_id" => &path_param.account_id,
            "group_id" => &group.id
        );
    }

    respond(result, StatusCode::CREATED)
}

#[endpoint {
    method = PATCH,
    path = "/api/2.0/accounts/{account_id}/scim/v2/Groups/{group_id}"
}]
pub async fn patch_group(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<GroupPathParam>,
    body: TypedBody<dbrest::PatchRequest>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let result = apictx.store().patch_group(
        &path_param.account_id,
        &path_param.group_id,
        body.into_inner(),
    );

    respond(result, StatusCode::OK)
}

#[endpoint {
    method = DELETE,
    path = "/api/2.0/accounts/{account_id}/scim/v2/Groups/{group_id}"
}]
pub async fn delete_group(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<GroupPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let result: Result<Response<Body>, http::Error> = match apictx
        .store()
        .delete_group(&path_param.account_id, &path_param.group_id)
    {
        Ok(()) => deleted_http_response(),
        Err(error) => error.to_http_response(),
    };

    result.map_err(HttpError::from)
}
