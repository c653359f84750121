use std::fmt::{self, Debug};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use artemis_core::{
    Context, Env, Error, HttpSend, OsEnv, ProvideCredential, ProvideCredentialChain, Result,
    Signer,
};
use artemis_http_send_reqwest::ReqwestHttpSend;
use artemis_sign::{
    Credential, DefaultCredentialProvider, RequestSigner, SigningHttpSend,
    StaticCredentialProvider,
};
use bytes::Bytes;
use http::Uri;
use log::debug;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;

use crate::constants::*;
use crate::model::*;

/// Default timeout of a single call, connect to last byte.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Characters left as-is in a path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Builder of [`Client`].
pub struct ClientBuilder {
    endpoint: String,
    env: Arc<dyn Env>,
    provider: Option<ProvideCredentialChain<Credential>>,
    timeout: Duration,
    http_client: Option<reqwest::Client>,
    http_send: Option<Arc<dyn HttpSend>>,
    content_md5: bool,
}

impl Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("endpoint", &self.endpoint)
            .field("env", &self.env)
            .field("provider", &self.provider)
            .field("timeout", &self.timeout)
            .field("http_send", &self.http_send)
            .field("content_md5", &self.content_md5)
            .finish_non_exhaustive()
    }
}

impl ClientBuilder {
    /// Create a builder for the gateway at `endpoint`, e.g. `https://10.0.0.1:443`.
    ///
    /// Without an explicit credential the key pair is read from
    /// `ARTEMIS_ACCESS_KEY` and `ARTEMIS_SECRET_KEY`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            env: Arc::new(OsEnv),
            provider: None,
            timeout: DEFAULT_TIMEOUT,
            http_client: None,
            http_send: None,
            content_md5: false,
        }
    }

    /// Create a builder with the endpoint read from `ARTEMIS_ENDPOINT`.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(OsEnv)
    }

    /// Same as [`ClientBuilder::from_env`], reading from the given env.
    ///
    /// Credentials are loaded from the same env unless set explicitly.
    pub fn from_env_with(env: impl Env) -> Result<Self> {
        let Some(endpoint) = env.var(ARTEMIS_ENDPOINT).filter(|v| !v.is_empty()) else {
            return Err(Error::config_invalid(format!("{ARTEMIS_ENDPOINT} is not set")));
        };

        Ok(Self::new(endpoint).env(env))
    }

    /// Set the env credentials are loaded from.
    pub fn env(mut self, env: impl Env) -> Self {
        self.env = Arc::new(env);
        self
    }

    /// Sign with a fixed key pair.
    pub fn credential(self, access_key: &str, secret_key: &str) -> Self {
        self.credential_provider(StaticCredentialProvider::new(access_key, secret_key))
    }

    /// Load the key pair from `provider`, replacing any previous source.
    pub fn credential_provider(
        mut self,
        provider: impl ProvideCredential<Credential = Credential>,
    ) -> Self {
        self.provider = Some(ProvideCredentialChain::new().push(provider));
        self
    }

    /// Set the timeout of a single call. Ignored when a custom client or
    /// send path is given.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a preconfigured reqwest client, for instance one with custom TLS
    /// settings.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Send requests through `http_send` instead of reqwest.
    pub fn http_send(mut self, http_send: impl HttpSend) -> Self {
        self.http_send = Some(Arc::new(http_send));
        self
    }

    /// Emit the body digest as a `Content-MD5` header as well.
    pub fn content_md5(mut self, enable: bool) -> Self {
        self.content_md5 = enable;
        self
    }

    /// Build the client.
    ///
    /// Fails with [`ErrorKind::ConfigInvalid`](artemis_core::ErrorKind::ConfigInvalid)
    /// if the endpoint is not an absolute http(s) URL.
    pub fn build(self) -> Result<Client> {
        let endpoint = parse_endpoint(&self.endpoint)?;

        let http_send: Arc<dyn HttpSend> = match (self.http_send, self.http_client) {
            (Some(send), _) => send,
            (None, Some(client)) => Arc::new(ReqwestHttpSend::new(client)),
            (None, None) => {
                let client = reqwest::Client::builder()
                    .timeout(self.timeout)
                    .build()
                    .map_err(|e| {
                        Error::config_invalid("failed to build http client").with_source(e)
                    })?;
                Arc::new(ReqwestHttpSend::new(client))
            }
        };

        let provider = self.provider.unwrap_or_else(|| {
            ProvideCredentialChain::new().push(DefaultCredentialProvider::new())
        });
        let ctx = Context::new()
            .with_env(self.env)
            .with_http_send(http_send.clone());
        let signer = Signer::new(
            ctx,
            provider,
            RequestSigner::new().with_content_md5(self.content_md5),
        );

        debug!("artemis client built for endpoint {endpoint}");
        Ok(Client {
            endpoint,
            transport: SigningHttpSend::new(signer, http_send),
        })
    }
}

fn parse_endpoint(endpoint: &str) -> Result<String> {
    let uri = Uri::from_str(endpoint).map_err(|e| {
        Error::config_invalid(format!("invalid endpoint {endpoint:?}")).with_source(e)
    })?;

    match uri.scheme_str() {
        Some("http") | Some("https") => {}
        _ => {
            return Err(Error::config_invalid(format!(
                "endpoint {endpoint:?} must start with http:// or https://"
            )))
        }
    }
    if uri.authority().is_none() {
        return Err(Error::config_invalid(format!(
            "endpoint {endpoint:?} has no host"
        )));
    }
    if uri.query().is_some() {
        return Err(Error::config_invalid(format!(
            "endpoint {endpoint:?} must not carry a query"
        )));
    }

    Ok(endpoint.trim_end_matches('/').to_string())
}

/// Client of the Artemis open platform.
///
/// Every call is signed with the client's key pair and sent once, without
/// retry. The client is cheap to clone and safe to share between tasks.
///
/// ```no_run
/// use artemis::Client;
///
/// # async fn example() -> artemis::Result<()> {
/// let client = Client::new("https://10.0.0.1:443", "access_key", "secret_key")?;
/// let units = client.control_units(10, 0).await?;
/// for unit in units.data {
///     println!("{} {}", unit.index_code, unit.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    endpoint: String,
    transport: SigningHttpSend<Arc<dyn HttpSend>>,
}

impl Client {
    /// Create a client with a fixed key pair and default settings.
    pub fn new(endpoint: &str, access_key: &str, secret_key: &str) -> Result<Self> {
        ClientBuilder::new(endpoint)
            .credential(access_key, secret_key)
            .build()
    }

    /// Create a [`ClientBuilder`].
    pub fn builder(endpoint: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(endpoint)
    }

    /// Base URL every path is appended to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The signing send path, for calls not covered by a typed operation.
    pub fn transport(&self) -> &SigningHttpSend<Arc<dyn HttpSend>> {
        &self.transport
    }

    /// List a page of control units.
    pub async fn control_units(&self, size: u32, start: u32) -> Result<ControlUnits> {
        let (size, start) = (size.to_string(), start.to_string());
        self.get(
            FIND_CONTROL_UNIT_PAGE,
            &[("size", size.as_str()), ("start", start.as_str())],
        )
        .await
    }

    /// List the direct children of the control unit `unit_code`.
    pub async fn children_control_units(&self, unit_code: &str) -> Result<ChildrenControlUnits> {
        self.get(FIND_CONTROL_UNIT_BY_UNIT_CODE, &[("unitCode", unit_code)])
            .await
    }

    /// Fetch the security parameters of the application `app_key`.
    pub async fn security_info(&self, app_key: &str) -> Result<SecurityParam> {
        let path = format!(
            "{SECURITY_PARAM}/{}",
            utf8_percent_encode(app_key, PATH_SEGMENT)
        );
        self.get(&path, &[]).await
    }

    /// List a page of cameras.
    pub async fn cameras(&self, size: u32, start: u32) -> Result<Cameras> {
        let (size, start) = (size.to_string(), start.to_string());
        self.get(
            FIND_CAMERA_INFO_PAGE,
            &[("size", size.as_str()), ("start", start.as_str())],
        )
        .await
    }

    /// List a page of cameras under the tree node `tree_node`.
    pub async fn children_cameras(
        &self,
        size: u32,
        start: u32,
        tree_node: &str,
    ) -> Result<ChildrenCameras> {
        let (size, start) = (size.to_string(), start.to_string());
        self.get(
            FIND_CAMERA_INFO_PAGE_BY_TREE_NODE,
            &[("size", size.as_str()), ("start", start.as_str()), ("treeNode", tree_node)],
        )
        .await
    }

    /// Fetch the detail of the camera `index_code`.
    pub async fn camera_detail(&self, index_code: &str) -> Result<CameraDetails> {
        self.get(FIND_CAMERA_INFO_BY_INDEX_CODE, &[("indexCode", index_code)])
            .await
    }

    /// Get a preview stream URL for the camera `camera_index_code`.
    ///
    /// `sub_stream` and `protocol` are passed through as the gateway's
    /// integer selectors.
    pub async fn preview_url(
        &self,
        camera_index_code: &str,
        sub_stream: i32,
        protocol: i32,
    ) -> Result<Preview> {
        let (sub_stream, protocol) = (sub_stream.to_string(), protocol.to_string());
        self.get(
            PREVIEW,
            &[
                ("cameraIndexCode", camera_index_code),
                ("subStream", sub_stream.as_str()),
                ("protocol", protocol.as_str()),
            ],
        )
        .await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let mut url = format!("{}{path}", self.endpoint);
        if !query.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query)
                .finish();
            url.push('?');
            url.push_str(&query);
        }

        debug!("sending artemis request: GET {url}");
        let req = http::Request::get(url).body(Bytes::new())?;
        let resp = self.transport.http_send(req).await?;
        debug!("got artemis response: {}", resp.status());

        parse_response(resp)
    }
}

/// Decode a gateway response.
///
/// Non-2xx statuses fail before the body is looked at. Otherwise the
/// embedded status is checked first and the payload is decoded only on
/// success, so a failure envelope never needs to match `T`.
fn parse_response<T: DeserializeOwned>(resp: http::Response<Bytes>) -> Result<T> {
    let (parts, body) = resp.into_parts();
    if !parts.status.is_success() {
        return Err(Error::http_status(parts.status));
    }

    let status: Status = if body.is_empty() {
        Status::default()
    } else {
        serde_json::from_slice(&body)?
    };
    if !status.is_success() {
        return Err(Error::application(status.msg));
    }

    Ok(serde_json::from_slice(&body)?)
}
