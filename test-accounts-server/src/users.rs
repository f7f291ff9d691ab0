// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

#[endpoint {
    method = GET,
    path = "/api/2.0/accounts/{account_id}/scim/v2/Users"
}]
pub async fn list_users(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<AccountPathParam>,
    query_params: Query<ListQueryParams>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();
    let query_params = query_params.into_inner();

    let result = apictx
        .store()
        .list_users(&path_param.account_id, query_params.filter.as_deref())
        .map(ListResponse::from_resources);

    respond(result, StatusCode::OK)
}

#[derive(Deserialize, JsonSchema)]
pub struct UserPathParam {
    account_id: String,
    user_id: String,
}

#[endpoint {
    method = GET,
    path = "/api/2.0/accounts/{account_id}/scim/v2/Users/{user_id}"
}]
pub async fn get_user(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<UserPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let result = apictx
        .store()
        .get_user(&path_param.account_id, &path_param.user_id);

    respond(result, StatusCode::OK)
}

#[endpoint {
    method = POST,
    path = "/api/2.0/accounts/{account_id}/scim/v2/Users",
}]
pub async fn create_user(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<AccountPathParam>,
    body: TypedBody<dbrest::CreateUserRequest>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();
    let request = body.into_inner();

    let result =
        apictx.store().create_user(&path_param.account_id, request);

    if let Ok(user) = &result {
        info!(
            apictx.log,
            "created user";
            "account_id" => &path_param.account_id,
            "user_id" => &user.id
        );
    }

    respond(result, StatusCode::CREATED)
}

#[endpoint {
    method = DELETE,
    path = "/api/2.0/accounts/{account_id}/scim/v2/Users/{user_id}"
}]
pub async fn delete_user(
    rqctx: RequestContext<Arc<ServerContext>>,
    path_param: Path<UserPathParam>,
) -> Result<Response<Body>, HttpError> {
    let apictx = rqctx.context();
    let path_param = path_param.into_inner();

    let result: Result<Response<Body>, http::Error> = match apictx
        .store()
        .delete_user(&path_param.account_id, &path_param.user_id)
    {
        Ok(()) => deleted_http_response(),
        Err(error) => error.to_http_response(),
    };

    result.map_err(HttpError::from)
}
