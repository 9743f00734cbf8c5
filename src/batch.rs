//! Batch geocoding: job submission and result polling.
//!
//! Submitting a batch returns a [`BatchJob`] with an id. Polling that id
//! yields either the job status (still pending) or the finished results;
//! the two shapes are distinguished by the first structural token of the
//! response payload, an object for status and an array for results.

use std::fmt;

use serde::de::{Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;

use crate::cancel::CancelToken;
use crate::client::{Client, Params};
use crate::error::Result;
use crate::types::{Address, Location, LocationType};

const FORWARD_PATH: &str = "/v1/batch/geocode/search";
const REVERSE_PATH: &str = "/v1/batch/geocode/reverse";

/// Access to the batch geocoding API.
pub struct BatchGeocodingService {
    client: Client,
}

impl BatchGeocodingService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Submits a forward batch geocoding job for the given addresses.
    pub fn submit_forward<I, S>(&self, addresses: I) -> BatchForwardRequest
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BatchForwardRequest {
            client: self.client.clone(),
            addresses: addresses.into_iter().map(Into::into).collect(),
            location_type: None,
            lang: None,
            filters: Vec::new(),
            biases: Vec::new(),
            cancel: CancelToken::new(),
        }
    }

    /// Submits a reverse batch geocoding job for the given coordinates.
    pub fn submit_reverse<I: IntoIterator<Item = Location>>(
        &self,
        coordinates: I,
    ) -> BatchReverseRequest {
        BatchReverseRequest {
            client: self.client.clone(),
            coordinates: coordinates.into_iter().collect(),
            location_type: None,
            lang: None,
            cancel: CancelToken::new(),
        }
    }

    /// Polls a forward batch job for its results.
    pub fn forward_result(&self, job_id: impl Into<String>) -> BatchResultRequest {
        BatchResultRequest {
            client: self.client.clone(),
            path: FORWARD_PATH,
            job_id: job_id.into(),
            format: None,
            cancel: CancelToken::new(),
        }
    }

    /// Polls a reverse batch job for its results.
    pub fn reverse_result(&self, job_id: impl Into<String>) -> BatchResultRequest {
        BatchResultRequest {
            client: self.client.clone(),
            path: REVERSE_PATH,
            job_id: job_id.into(),
            format: None,
            cancel: CancelToken::new(),
        }
    }
}

/// The response to a batch job submission.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchJob {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: String,
    pub url: Option<String>,
}

/// The outcome of polling a batch job.
#[derive(Debug, Clone)]
pub enum BatchResult {
    /// The job is still being processed.
    Pending { id: String, status: String },
    /// The job finished and returned its results.
    Complete(Vec<Address>),
}

impl BatchResult {
    /// Returns `true` while the job has not produced results yet.
    pub fn is_pending(&self) -> bool {
        matches!(self, BatchResult::Pending { .. })
    }
}

impl<'de> Deserialize<'de> for BatchResult {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BatchResultVisitor;

        impl<'de> Visitor<'de> for BatchResultVisitor {
            type Value = BatchResult;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a batch status object or an array of geocoded results")
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut results = Vec::new();
                while let Some(address) = seq.next_element::<Address>()? {
                    results.push(address);
                }
                Ok(BatchResult::Complete(results))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut id = None;
                let mut status = None;
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "id" => id = Some(map.next_value()?),
                        "status" => status = Some(map.next_value()?),
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(BatchResult::Pending {
                    id: id.unwrap_or_default(),
                    status: status.unwrap_or_default(),
                })
            }
        }

        deserializer.deserialize_any(BatchResultVisitor)
    }
}

/// A forward batch submission builder.
pub struct BatchForwardRequest {
    client: Client,
    addresses: Vec<String>,
    location_type: Option<LocationType>,
    lang: Option<String>,
    filters: Vec<String>,
    biases: Vec<String>,
    cancel: CancelToken,
}

impl BatchForwardRequest {
    /// Restricts results to the given location type.
    pub fn location_type(mut self, value: LocationType) -> Self {
        self.location_type = Some(value);
        self
    }

    /// Sets the response language.
    pub fn lang(mut self, value: impl Into<String>) -> Self {
        self.lang = Some(value.into());
        self
    }

    /// Adds a result filter; see [`crate::filter`].
    pub fn filter(mut self, value: impl Into<String>) -> Self {
        self.filters.push(value.into());
        self
    }

    /// Adds a result bias; see [`crate::bias`].
    pub fn bias(mut self, value: impl Into<String>) -> Self {
        self.biases.push(value.into());
        self
    }

    /// Attaches a cancellation token to this call.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Submits the job.
    pub async fn send(self) -> Result<BatchJob> {
        let mut params = Params::new();
        if let Some(location_type) = self.location_type {
            params.push("type", location_type.as_str());
        }
        if let Some(lang) = self.lang {
            params.push("lang", lang);
        }
        if !self.filters.is_empty() {
            params.push("filter", self.filters.join("|"));
        }
        if !self.biases.is_empty() {
            params.push("bias", self.biases.join("|"));
        }

        self.client
            .post(FORWARD_PATH, params, &self.addresses, &self.cancel)
            .await
    }
}

/// A reverse batch submission builder.
pub struct BatchReverseRequest {
    client: Client,
    coordinates: Vec<Location>,
    location_type: Option<LocationType>,
    lang: Option<String>,
    cancel: CancelToken,
}

impl BatchReverseRequest {
    /// Restricts results to the given location type.
    pub fn location_type(mut self, value: LocationType) -> Self {
        self.location_type = Some(value);
        self
    }

    /// Sets the response language.
    pub fn lang(mut self, value: impl Into<String>) -> Self {
        self.lang = Some(value.into());
        self
    }

    /// Attaches a cancellation token to this call.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Submits the job.
    pub async fn send(self) -> Result<BatchJob> {
        let mut params = Params::new();
        if let Some(location_type) = self.location_type {
            params.push("type", location_type.as_str());
        }
        if let Some(lang) = self.lang {
            params.push("lang", lang);
        }

        // The body is a bare array of [lon, lat] pairs.
        let body: Vec<[f64; 2]> = self.coordinates.iter().map(|c| c.lon_lat()).collect();

        self.client
            .post(REVERSE_PATH, params, &body, &self.cancel)
            .await
    }
}

/// A batch result polling builder.
pub struct BatchResultRequest {
    client: Client,
    path: &'static str,
    job_id: String,
    format: Option<String>,
    cancel: CancelToken,
}

impl BatchResultRequest {
    /// Sets the result format (e.g. `"json"`, `"geojson"`, `"csv"`).
    pub fn format(mut self, value: impl Into<String>) -> Self {
        self.format = Some(value.into());
        self
    }

    /// Attaches a cancellation token to this call.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Polls the job once.
    pub async fn send(self) -> Result<BatchResult> {
        let mut params = Params::new();
        params.push("id", self.job_id);
        if let Some(format) = self.format {
            params.push("format", format);
        }

        self.client.get(self.path, params, &self.cancel).await
    }
}
