// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

use reqwest::Method;
use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::blocking::RequestBuilder;
use reqwest::blocking::Response;
use serde::de::DeserializeOwned;
use slog::debug;
use slog::warn;

/// How requests authenticate against the platform.
#[derive(Clone)]
pub enum Credentials {
    Basic { username: String, password: String },
    Bearer(String),
}

impl Credentials {
    pub fn basic(username: &str, password: &str) -> Self {
        Credentials::Basic {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn bearer(token: &str) -> Self {
        Credentials::Bearer(token.to_string())
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let constraints = Constraints::required().min_length(1);

        match self {
            Credentials::Basic { username, password } => {
                string_value("username", username.as_str(), &constraints)?;
                string_value("password", password.as_str(), &constraints)?;
            }

            Credentials::Bearer(token) => {
                string_value("token", token.as_str(), &constraints)?;
            }
        }

        Ok(())
    }

    fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
        match self {
            Credentials::Basic { username, password } => {
                builder.basic_auth(username, Some(password))
            }

            Credentials::Bearer(token) => builder.bearer_auth(token),
        }
    }
}

// Never print secrets.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),

            Credentials::Bearer(_) => {
                f.debug_tuple("Bearer").field(&"<redacted>").finish()
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid endpoint {endpoint}: {reason}")]
    Endpoint { endpoint: String, reason: String },

    #[error("request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The platform answered with a non-success status.
    #[error("{method} {url} returned {status}: {message}")]
    Api {
        method: Method,
        url: String,
        status: StatusCode,
        error_code: Option<String>,
        message: String,
    },

    #[error("decoding response from {url} failed")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// The HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// The error body returned by the account API. SCIM endpoints use `detail`
/// instead of `message`.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct ApiErrorBody {
    error_code: Option<String>,
    message: Option<String>,
    detail: Option<String>,
}

/// A request path, relative to the endpoint, kept as unencoded segments.
/// Each segment is percent-encoded on its own when the URL is built, so an
/// id containing `/` or `?` stays inside its segment.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiPath(Vec<String>);

impl ApiPath {
    pub fn new(segments: &[&str]) -> Self {
        Self(segments.iter().map(|s| s.to_string()).collect())
    }

    pub fn join(&self, segment: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.to_string());
        Self(segments)
    }
}

/// The HTTP client shared by every sub-client of an account.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Clone)]
pub struct RestClient {
    log: Logger,
    endpoint: String,
    base: Url,
    credentials: Credentials,
    client: Client,
}

impl RestClient {
    pub fn new(
        log: Logger,
        endpoint: &str,
        credentials: Credentials,
    ) -> Result<Self, ClientError> {
        let endpoint = string_value(
            "endpoint",
            endpoint,
            &Constraints::required().min_length(1),
        )?
        .unwrap_or_default();
        credentials.validate()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();

        let base = Url::parse(&endpoint).map_err(|e| ClientError::Endpoint {
            endpoint: endpoint.clone(),
            reason: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ClientError::Endpoint {
                endpoint,
                reason: String::from("not a base URL"),
            });
        }

        let client = Client::builder()
            .build()
            .map_err(|source| ClientError::Http { url: endpoint.clone(), source })?;

        Ok(Self { log, endpoint, base, credentials, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn log(&self) -> &Logger {
        &self.log
    }

    fn url(&self, path: &ApiPath) -> Url {
        let mut url = self.base.clone();

        // Only fails for URLs that cannot be a base, rejected in `new`.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(&path.0);
        }

        url
    }

    fn send(
        &self,
        method: Method,
        path: &ApiPath,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<(String, Response), ClientError> {
        let request_url = self.url(path);
        let url = request_url.to_string();
        debug!(self.log, "sending request"; "method" => %method, "url" => &url);

        let builder = self.client.request(method.clone(), request_url);
        let builder = build(self.credentials.apply(builder));

        let response = builder
            .send()
            .map_err(|source| ClientError::Http { url: url.clone(), source })?;

        let status = response.status();
        if status.is_success() {
            return Ok((url, response));
        }

        // The body is only used to explain the failure, so a body that cannot
        // be read or parsed still yields an API error with the status.
        let text = response.text().unwrap_or_default();
        let body: ApiErrorBody = serde_json::from_str(&text).unwrap_or_default();
        let message = body.message.or(body.detail).unwrap_or(text);

        warn!(
            self.log,
            "request failed";
            "method" => %method,
            "url" => &url,
            "status" => status.as_u16()
        );

        Err(ClientError::Api {
            method,
            url,
            status,
            error_code: body.error_code,
            message,
        })
    }

    fn decode<T>(url: String, response: Response) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let bytes = response
            .bytes()
            .map_err(|source| ClientError::Http { url: url.clone(), source })?;

        serde_json::from_slice(&bytes)
            .map_err(|source| ClientError::Decode { url, source })
    }

    pub fn get_json<T>(
        &self,
        path: &ApiPath,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let (url, response) =
            self.send(Method::GET, path, |builder| builder.query(query))?;

        Self::decode(url, response)
    }

    pub fn post_json<B, T>(&self, path: &ApiPath, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (url, response) =
            self.send(Method::POST, path, |builder| builder.json(body))?;

        Self::decode(url, response)
    }

    /// PATCH whose response body is not needed.
    pub fn patch<B>(&self, path: &ApiPath, body: &B) -> Result<(), ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::PATCH, path, |builder| builder.json(body))?;
        Ok(())
    }

    pub fn delete(&self, path: &ApiPath) -> Result<(), ClientError> {
        self.send(Method::DELETE, path, |builder| builder)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use slog::Logger;
    use slog::o;

    use super::ApiPath;
    use super::ClientError;
    use super::Credentials;
    use super::RestClient;

    fn client(endpoint: &str) -> RestClient {
        RestClient::new(
            Logger::root(slog::Discard, o!()),
            endpoint,
            Credentials::bearer("token"),
        )
        .unwrap()
    }

    #[test]
    fn test_path_segments_are_encoded() {
        let client = client("http://127.0.0.1:4567/");
        let users = ApiPath::new(&["api", "2.0", "accounts", "1234", "Users"]);

        assert_eq!(
            client.url(&users.join("42")).as_str(),
            "http://127.0.0.1:4567/api/2.0/accounts/1234/Users/42"
        );
        assert_eq!(
            client.url(&users.join("x?filter=a")).as_str(),
            "http://127.0.0.1:4567/api/2.0/accounts/1234/Users/x%3Ffilter=a"
        );
        assert_eq!(
            client.url(&users.join("../Groups")).as_str(),
            "http://127.0.0.1:4567/api/2.0/accounts/1234/Users/..%2FGroups"
        );
    }

    #[test]
    fn test_endpoint_path_prefix_kept() {
        let client = client("https://proxy.example.com/databricks/");

        assert_eq!(
            client.url(&ApiPath::new(&["api", "2.0"])).as_str(),
            "https://proxy.example.com/databricks/api/2.0"
        );
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let result = RestClient::new(
            Logger::root(slog::Discard, o!()),
            "accounts.cloud.databricks.com",
            Credentials::bearer("token"),
        );

        assert!(matches!(result, Err(ClientError::Endpoint { .. })));
    }
}
