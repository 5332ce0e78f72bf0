//! Signed JSON client.

use crate::codec::{JsonCodec, SerdeJsonCodec};
use crate::config::ClientConfig;
use crate::error::{ClientError, ConfigError};
use crate::headers::SignedHeaders;
use auth::{ClientCredentials, RequestSigner};
use rest_client::header::{HeaderValue, CONTENT_TYPE};
use rest_client::{
    HttpTransport, Method, RestClient, StatusCode, TransportRequest, TransportResponse,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// HTTP client that signs every request with a fresh timestamp and HMAC.
///
/// Signed headers are built per request and handed to the transport with
/// that request only; the client holds no mutable state and can be shared
/// across tasks.
pub struct HmacHttpClient<H = RestClient, C = SerdeJsonCodec> {
    transport: H,
    codec: C,
    config: ClientConfig,
    credentials: ClientCredentials,
}

impl HmacHttpClient {
    /// Create a client backed by a reqwest transport.
    ///
    /// # Errors
    /// Returns an error if the configuration is inconsistent or the HTTP
    /// client cannot be built.
    pub fn new(config: ClientConfig, credentials: ClientCredentials) -> Result<Self, ClientError> {
        let transport = RestClient::new(config.base_address(), config.timeout())?;
        Self::with_transport(config, credentials, transport)
    }

    /// Create a client from `HMAC_CLIENT_*` environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        let config = ClientConfig::from_env()?;
        let credentials = ClientCredentials::from_env()?;
        Self::new(config, credentials)
    }
}

impl<H: HttpTransport> HmacHttpClient<H, SerdeJsonCodec> {
    /// Create a client over any transport.
    ///
    /// The transport is expected to resolve paths against
    /// `config.base_address()`.
    pub fn with_transport(
        config: ClientConfig,
        credentials: ClientCredentials,
        transport: H,
    ) -> Result<Self, ClientError> {
        config.check_distinct_headers()?;
        HeaderValue::from_str(credentials.client_id())
            .map_err(|_| ConfigError::InvalidClientId(credentials.client_id().to_string()))?;

        tracing::debug!(
            base_address = %config.base_address(),
            client_id = %credentials.client_id(),
            hash_header = %config.hash_header_name(),
            timestamp_header = %config.timestamp_header_name(),
            timestamp_format = %config.timestamp_format(),
            "Created HMAC client"
        );

        Ok(Self {
            transport,
            codec: SerdeJsonCodec,
            config,
            credentials,
        })
    }
}

impl<H, C> HmacHttpClient<H, C> {
    /// Replace the JSON codec.
    pub fn with_codec<C2: JsonCodec>(self, codec: C2) -> HmacHttpClient<H, C2> {
        HmacHttpClient {
            transport: self.transport,
            codec,
            config: self.config,
            credentials: self.credentials,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_address(&self) -> &str {
        self.config.base_address()
    }

    /// Get the client id (public, safe to log).
    pub fn client_id(&self) -> &str {
        self.credentials.client_id()
    }

    /// Sign the current instant and return the headers for one request.
    ///
    /// Called by every verb; exposed for callers that dispatch requests
    /// themselves. Never reuse the result for a second request.
    pub fn initialize_request(&self) -> Result<SignedHeaders, ClientError> {
        let signature = RequestSigner::new(&self.credentials)
            .with_format(self.config.timestamp_format())
            .sign()?;

        Ok(SignedHeaders {
            timestamp_header_name: self.config.timestamp_header_name().clone(),
            timestamp_value: signature.timestamp,
            hash_header_name: self.config.hash_header_name().clone(),
            hash_payload: signature.hash_payload,
        })
    }
}

impl<H: HttpTransport, C: JsonCodec> HmacHttpClient<H, C> {
    /// GET a resource and decode it.
    ///
    /// The status is not checked. An empty body decodes to `T::default()`.
    ///
    /// ```rust,ignore
    /// let widget: Widget = client.get("api/widgets/1").await?;
    /// let widgets: Vec<Widget> = client.get("api/widgets").await?;
    /// ```
    pub async fn get<T>(&self, path: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Default,
    {
        let response = self.dispatch(Method::GET, path, None).await?;

        if response.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }
        self.decode(&response)
    }

    /// POST an item and decode the response.
    ///
    /// # Errors
    /// Returns `ClientError::Status` if the response status is not 2xx.
    pub async fn post<T>(&self, path: &str, item: &T) -> Result<T, ClientError>
    where
        T: Serialize + DeserializeOwned,
    {
        self.send_json(Method::POST, path, item).await
    }

    /// PUT an item and decode the response.
    ///
    /// # Errors
    /// Returns `ClientError::Status` if the response status is not 2xx.
    pub async fn put<T>(&self, path: &str, item: &T) -> Result<T, ClientError>
    where
        T: Serialize + DeserializeOwned,
    {
        self.send_json(Method::PUT, path, item).await
    }

    /// DELETE a resource and return the raw status.
    ///
    /// The body is ignored and the status is not checked.
    pub async fn delete(&self, path: &str) -> Result<StatusCode, ClientError> {
        let response = self.dispatch(Method::DELETE, path, None).await?;
        Ok(response.status)
    }

    async fn send_json<T>(&self, method: Method, path: &str, item: &T) -> Result<T, ClientError>
    where
        T: Serialize + DeserializeOwned,
    {
        let body = self.codec.encode(item)?;
        let response = self.dispatch(method, path, Some(body)).await?;

        if !response.status.is_success() {
            let body = response.body_text();
            tracing::warn!(
                path = %path,
                status = response.status.as_u16(),
                body = %body,
                "Request failed"
            );
            return Err(ClientError::Status {
                status: response.status,
                body,
            });
        }

        self.decode(&response)
    }

    /// Sign, attach headers and send one request.
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<TransportResponse, ClientError> {
        let signed = self.initialize_request()?;
        let mut headers = signed.to_header_map()?;

        tracing::debug!(
            method = %method,
            path = %path,
            client_id = %self.credentials.client_id(),
            timestamp = %signed.timestamp_value,
            "Sending signed request"
        );

        let request = match body {
            Some(body) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                TransportRequest::new(method, path, headers).with_body(body)
            }
            None => TransportRequest::new(method, path, headers),
        };

        let response = self.transport.send(request).await?;

        tracing::debug!(
            path = %path,
            status = response.status.as_u16(),
            "Received response"
        );

        Ok(response)
    }

    fn decode<T: DeserializeOwned>(&self, response: &TransportResponse) -> Result<T, ClientError> {
        self.codec.decode(&response.body).map_err(|e| {
            tracing::warn!(body = %response.body_text(), error = %e, "Failed to parse response");
            ClientError::Codec(e)
        })
    }
}

impl<H, C> std::fmt::Debug for HmacHttpClient<H, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacHttpClient")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .finish()
    }
}
