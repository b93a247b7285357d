//! Main client implementation.

use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, ErrorResponse, Result};

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Path prefix of the versioned API.
const API_PREFIX: [&str; 2] = ["api", "v0"];

/// Malloy Publisher API client.
///
/// Every operation performs exactly one blocking GET request. The
/// underlying connection pool is released by [`MalloyClient::close`] or,
/// failing that, when the client is dropped.
///
/// # Example
///
/// ```no_run
/// use malloy_client::MalloyClient;
///
/// # fn example() -> malloy_client::Result<()> {
/// let client = MalloyClient::new("http://localhost:4000", None)?;
/// for project in client.list_projects()? {
///     println!("{}", project.name);
/// }
/// # Ok(())
/// # }
/// ```
pub struct MalloyClient {
    /// HTTP client. `None` once closed.
    http: Option<Client>,
    /// Base URL without trailing slash.
    base_url: String,
    /// Whether a bearer token is attached to requests.
    authenticated: bool,
}

impl MalloyClient {
    /// Create a client for `base_url`, optionally authenticating with `api_key`.
    pub fn new(base_url: impl Into<String>, api_key: Option<&str>) -> Result<Self> {
        let mut builder = Self::builder().base_url(base_url);
        if let Some(key) = api_key {
            builder = builder.api_key(key);
        }
        builder.build()
    }

    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether requests carry an `Authorization` header.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.http.is_none()
    }

    /// Release the underlying transport. Safe to call more than once.
    pub fn close(&mut self) {
        if self.http.take().is_some() {
            tracing::debug!(base_url = %self.base_url, "closed Malloy client");
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL under `/api/v0` from path segments.
    ///
    /// Each segment is percent-encoded on its own; a `/` inside a segment
    /// (a nested model path) is kept as a separator. `.` and `..`
    /// components are rejected with [`Error::InvalidInput`].
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                Error::Config(format!("base URL cannot carry a path: {}", self.base_url))
            })?;
            path.pop_if_empty().extend(API_PREFIX);
            for segment in segments {
                for part in segment.split('/') {
                    // The URL parser would resolve these away and address
                    // a different resource.
                    if part == "." || part == ".." {
                        return Err(Error::invalid_input(format!(
                            "path segment '{}' in '{}' is not allowed",
                            part, segment
                        )));
                    }
                    path.push(part);
                }
            }
        }
        Ok(url)
    }

    /// Make a GET request and decode the body into `T`.
    pub(crate) fn get<T: DeserializeOwned>(&self, url: Url, query: &[(&str, &str)]) -> Result<T> {
        let body = self.get_raw(url, query)?;
        let mut de = serde_json::Deserializer::from_slice(&body);
        serde_path_to_error::deserialize(&mut de).map_err(schema_error)
    }

    /// Make a GET request and return the body as a JSON value, for
    /// operations that reshape the payload before decoding it.
    pub(crate) fn get_value(&self, url: Url, query: &[(&str, &str)]) -> Result<serde_json::Value> {
        self.get(url, query)
    }

    /// Make a GET request and return the raw success body.
    fn get_raw(&self, url: Url, query: &[(&str, &str)]) -> Result<Vec<u8>> {
        let http = self.http.as_ref().ok_or(Error::Closed)?;

        tracing::debug!(method = "GET", url = %url, params = query.len(), "sending request");
        let response = http.get(url).query(query).send()?;
        tracing::debug!(status = response.status().as_u16(), "received response");

        self.handle_response(response)
    }

    /// Handle a response, extracting the body or error.
    fn handle_response(&self, response: Response) -> Result<Vec<u8>> {
        let status = response.status().as_u16();
        let body = response.bytes()?;

        if status >= 400 {
            let error = api_error(status, &body);
            tracing::warn!(status, error = %error, "API request failed");
            return Err(error);
        }

        Ok(body.to_vec())
    }
}

impl Drop for MalloyClient {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for MalloyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MalloyClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.authenticated)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Decode a value that was already fetched, with field-path tracking.
pub(crate) fn decode_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(schema_error)
}

/// Convert a path-tracking decode failure into a schema error.
///
/// A missing field is reported against its enclosing object, so the
/// field name is appended to give the path of the field itself.
fn schema_error<E: std::fmt::Display>(err: serde_path_to_error::Error<E>) -> Error {
    let message = err.inner().to_string();
    let mut path = err.path().to_string();
    if let Some(field) = missing_field(&message) {
        path = if path == "." {
            field.to_string()
        } else {
            format!("{}.{}", path, field)
        };
    }
    Error::Schema { path, message }
}

/// Field name from serde's "missing field `name`" message.
fn missing_field(message: &str) -> Option<&str> {
    message
        .strip_prefix("missing field `")?
        .split('`')
        .next()
        .filter(|field| !field.is_empty())
}

/// Build an API error from a failed response body.
///
/// A body that is not an error record still yields an API error with the
/// original status; the decode failure becomes the message.
fn api_error(status: u16, body: &[u8]) -> Error {
    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(err) => Error::Api {
            status,
            code: Some(err.code),
            message: err.message,
        },
        Err(e) => Error::Api {
            status,
            code: None,
            message: e.to_string(),
        },
    }
}

/// Builder for creating a MalloyClient.
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Set the base URL for the server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key sent as a bearer token.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client. Performs no network I/O.
    pub fn build(self) -> Result<MalloyClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let authenticated = self.api_key.is_some();
        if let Some(key) = &self.api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|_| Error::Config("Invalid API key".to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("malloy-client/{}", env!("CARGO_PKG_VERSION")));

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .timeout(self.timeout)
            .build()?;

        tracing::debug!(base_url = %base_url, authenticated, "created Malloy client");

        Ok(MalloyClient {
            http: Some(http),
            base_url,
            authenticated,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
