//! Postcode lookup around a coordinate.

use crate::cancel::CancelToken;
use crate::client::{Client, Params};
use crate::error::Result;
use crate::types::{FeatureCollection, Format, GeometryType};

/// Access to the postcode API.
pub struct PostcodeService {
    client: Client,
}

impl PostcodeService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Starts a postcode request for the given coordinates.
    pub fn search(&self, lat: f64, lon: f64) -> PostcodeRequest {
        PostcodeRequest {
            client: self.client.clone(),
            lat,
            lon,
            limit: None,
            filters: Vec::new(),
            biases: Vec::new(),
            lang: None,
            format: None,
            geometry: None,
            cancel: CancelToken::new(),
        }
    }
}

/// A postcode request builder.
pub struct PostcodeRequest {
    client: Client,
    lat: f64,
    lon: f64,
    limit: Option<u32>,
    filters: Vec<String>,
    biases: Vec<String>,
    lang: Option<String>,
    format: Option<Format>,
    geometry: Option<GeometryType>,
    cancel: CancelToken,
}

impl PostcodeRequest {
    /// Sets the maximum number of results.
    pub fn limit(mut self, value: u32) -> Self {
        self.limit = Some(value);
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

    /// Sets the response language.
    pub fn lang(mut self, value: impl Into<String>) -> Self {
        self.lang = Some(value.into());
        self
    }

    /// Sets the response format.
    pub fn format(mut self, value: Format) -> Self {
        self.format = Some(value);
        self
    }

    /// Sets the geometry resolution of the response.
    pub fn geometry(mut self, value: GeometryType) -> Self {
        self.geometry = Some(value);
        self
    }

    /// Attaches a cancellation token to this call.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Executes the request.
    pub async fn send(self) -> Result<FeatureCollection> {
        let mut params = Params::new();
        params.push("lat", self.lat.to_string());
        params.push("lon", self.lon.to_string());
        if let Some(limit) = self.limit {
            params.push("limit", limit.to_string());
        }
        if !self.filters.is_empty() {
            params.push("filter", self.filters.join("|"));
        }
        if !self.biases.is_empty() {
            params.push("bias", self.biases.join("|"));
        }
        if let Some(lang) = self.lang {
            params.push("lang", lang);
        }
        if let Some(format) = self.format {
            params.push("format", format.as_str());
        }
        if let Some(geometry) = self.geometry {
            params.push("geometry", geometry.as_str());
        }

        self.client
            .get("/v1/geocode/postcode", params, &self.cancel)
            .await
    }
}
