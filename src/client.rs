//! The Geoapify client and its request execution core.
//!
//! [`Client`] holds the immutable per-client configuration: the API key,
//! the base URL, the injected [`reqwest::Client`] transport, and the
//! optional retry policy. Every endpoint service obtained from the client
//! funnels into the same two execution paths (`get` / `post`), which build
//! the final URL, dispatch the request, classify the response, and decode
//! the body.

use std::sync::Arc;

use http::{header, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::batch::BatchGeocodingService;
use crate::boundaries::BoundariesService;
use crate::cancel::CancelToken;
use crate::error::{ApiError, Error, Result};
use crate::geocoding::GeocodingService;
use crate::ip_geolocation::IpGeolocationService;
use crate::isolines::IsolinesService;
use crate::map_matching::MapMatchingService;
use crate::places::{PlaceDetailsService, PlacesService};
use crate::postcode::PostcodeService;
use crate::retry::{AttemptFailure, RetryConfig};
use crate::route_matrix::RouteMatrixService;
use crate::route_planner::RoutePlannerService;
use crate::routing::RoutingService;

/// Default host of the Geoapify REST APIs.
const DEFAULT_BASE_URL: &str = "https://api.geoapify.com";

/// Query parameter carrying the API credential. Always appended last and
/// always present, replacing any caller-supplied value of the same name.
const API_KEY_PARAM: &str = "apiKey";

/// Ordered query parameters for a single endpoint call.
///
/// Insertion order is preserved so that building the same request twice
/// yields byte-identical query strings.
#[derive(Debug, Clone, Default)]
pub(crate) struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, key: &str, value: impl Into<String>) {
        self.pairs.push((key.to_string(), value.into()));
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// The Geoapify API client.
///
/// The client is cheap to clone and safe to share across tasks: all
/// configuration is immutable after construction, and the underlying
/// connection pool is reused by every call.
///
/// # Examples
///
/// ```no_run
/// use geoapify::Client;
///
/// #[tokio::main]
/// async fn main() -> Result<(), geoapify::Error> {
///     let client = Client::new("YOUR_API_KEY")?;
///
///     let response = client
///         .geocoding()
///         .search("1313 Broadway, Tacoma, WA")
///         .limit(5)
///         .send()
///         .await?;
///
///     for address in &response.results {
///         println!("{}", address.formatted.as_deref().unwrap_or("<unnamed>"));
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    retry: Option<RetryConfig>,
}

impl Client {
    /// Creates a client with the default base URL and transport.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    /// Creates a [`ClientBuilder`] for custom configuration.
    pub fn builder(api_key: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(api_key)
    }

    /// Returns the geocoding service (forward, reverse, autocomplete).
    pub fn geocoding(&self) -> GeocodingService {
        GeocodingService::new(self.clone())
    }

    /// Returns the places service.
    pub fn places(&self) -> PlacesService {
        PlacesService::new(self.clone())
    }

    /// Returns the place details service.
    pub fn place_details(&self) -> PlaceDetailsService {
        PlaceDetailsService::new(self.clone())
    }

    /// Returns the routing service.
    pub fn routing(&self) -> RoutingService {
        RoutingService::new(self.clone())
    }

    /// Returns the route matrix service.
    pub fn route_matrix(&self) -> RouteMatrixService {
        RouteMatrixService::new(self.clone())
    }

    /// Returns the route planner (VRP) service.
    pub fn route_planner(&self) -> RoutePlannerService {
        RoutePlannerService::new(self.clone())
    }

    /// Returns the map matching service.
    pub fn map_matching(&self) -> MapMatchingService {
        MapMatchingService::new(self.clone())
    }

    /// Returns the isolines service.
    pub fn isolines(&self) -> IsolinesService {
        IsolinesService::new(self.clone())
    }

    /// Returns the IP geolocation service.
    pub fn ip_geolocation(&self) -> IpGeolocationService {
        IpGeolocationService::new(self.clone())
    }

    /// Returns the boundaries service.
    pub fn boundaries(&self) -> BoundariesService {
        BoundariesService::new(self.clone())
    }

    /// Returns the postcode service.
    pub fn postcode(&self) -> PostcodeService {
        PostcodeService::new(self.clone())
    }

    /// Returns the batch geocoding service.
    pub fn batch_geocoding(&self) -> BatchGeocodingService {
        BatchGeocodingService::new(self.clone())
    }

    /// Executes a GET request against `path` and decodes the response.
    pub(crate) async fn get<T>(&self, path: &str, params: Params, cancel: &CancelToken) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self.build_url(path, &params);
        self.execute(Method::GET, url, None, cancel).await
    }

    /// Executes a POST request with a JSON body and decodes the response.
    pub(crate) async fn post<B, T>(
        &self,
        path: &str,
        params: Params,
        body: &B,
        cancel: &CancelToken,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.build_url(path, &params);
        let body = serde_json::to_string(body).map_err(Error::Encode)?;
        self.execute(Method::POST, url, Some(body), cancel).await
    }

    /// Builds the final request URL: base + path + caller parameters in
    /// insertion order, with the API key appended last.
    fn build_url(&self, path: &str, params: &Params) -> Url {
        let mut url = self.inner.base_url.clone();
        url.set_path(path);
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params.iter().filter(|(key, _)| *key != API_KEY_PARAM) {
                pairs.append_pair(key, value);
            }
            pairs.append_pair(API_KEY_PARAM, &self.inner.api_key);
        }
        url
    }

    /// Runs one logical call: a single attempt, or a bounded retry loop if
    /// the client carries a retry configuration.
    async fn execute<T>(
        &self,
        method: Method,
        url: Url,
        body: Option<String>,
        cancel: &CancelToken,
    ) -> Result<T>
    where
        T: DeserializeOwned,
    {
        // The query string carries the credential, so log the path only.
        tracing::debug!(method = %method, path = url.path(), "Dispatching request");

        match &self.inner.retry {
            Some(retry) => {
                retry
                    .run(cancel, || {
                        self.attempt(&method, &url, body.as_deref(), cancel)
                    })
                    .await
            }
            None => self
                .attempt(&method, &url, body.as_deref(), cancel)
                .await
                .map_err(|failure| failure.error),
        }
    }

    /// Performs exactly one HTTP round trip and classifies the outcome.
    async fn attempt<T>(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&str>,
        cancel: &CancelToken,
    ) -> std::result::Result<T, AttemptFailure>
    where
        T: DeserializeOwned,
    {
        let mut request = self.inner.http.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.to_owned());
        }

        let round_trip = async {
            let response = request
                .send()
                .await
                .map_err(|e| AttemptFailure::fatal(Error::Request(e)))?;

            let status = response.status();
            let retry_after = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);

            let body = response
                .bytes()
                .await
                .map_err(|e| AttemptFailure::fatal(Error::Body(e)))?;

            if !status.is_success() {
                let api_error = ApiError::from_response(status, body.to_vec());
                tracing::debug!(status = status.as_u16(), "Received error response");
                if api_error.is_retryable() {
                    return Err(AttemptFailure::retryable(api_error.into(), retry_after));
                }
                return Err(AttemptFailure::fatal(api_error.into()));
            }

            tracing::debug!(status = status.as_u16(), "Received response");
            serde_json::from_slice(&body).map_err(|e| AttemptFailure::fatal(Error::Decode(e)))
        };

        tokio::select! {
            _ = cancel.cancelled() => Err(AttemptFailure::fatal(Error::Cancelled)),
            outcome = round_trip => outcome,
        }
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use geoapify::{Client, RetryConfig};
/// use std::time::Duration;
///
/// # fn example() -> Result<(), geoapify::Error> {
/// let client = Client::builder("YOUR_API_KEY")
///     .retry(RetryConfig::new(3, Duration::from_millis(500), Duration::from_secs(30)))
///     .build()?;
/// # let _ = client;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    api_key: String,
    base_url: Option<Url>,
    http_client: Option<reqwest::Client>,
    retry: Option<RetryConfig>,
}

impl ClientBuilder {
    fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            http_client: None,
            retry: None,
        }
    }

    /// Overrides the default API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Supplies a custom transport.
    ///
    /// The [`reqwest::Client`] owns the connection pool and any transport
    /// settings such as proxies or timeouts; it may be shared with other
    /// parts of the application.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Enables retries for rate-limited (429) and server-error (5xx)
    /// responses.
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry = Some(config);
        self
    }

    /// Builds the configured [`Client`].
    pub fn build(self) -> Result<Client> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let http = match self.http_client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .build()
                .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {e}")))?,
        };

        Ok(Client {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                api_key: self.api_key,
                retry: self.retry,
            }),
        })
    }
}
