//! Places search and place details.

use crate::cancel::CancelToken;
use crate::client::{Client, Params};
use crate::error::Result;
use crate::types::FeatureCollection;

/// Access to the places API.
pub struct PlacesService {
    client: Client,
}

impl PlacesService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Starts a places request for the given categories.
    pub fn categories<I, S>(&self, categories: I) -> PlacesRequest
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PlacesRequest {
            client: self.client.clone(),
            categories: categories.into_iter().map(Into::into).collect(),
            conditions: Vec::new(),
            filters: Vec::new(),
            biases: Vec::new(),
            limit: None,
            offset: None,
            lang: None,
            name: None,
            cancel: CancelToken::new(),
        }
    }
}

/// A places request builder.
pub struct PlacesRequest {
    client: Client,
    categories: Vec<String>,
    conditions: Vec<String>,
    filters: Vec<String>,
    biases: Vec<String>,
    limit: Option<u32>,
    offset: Option<u32>,
    lang: Option<String>,
    name: Option<String>,
    cancel: CancelToken,
}

impl PlacesRequest {
    /// Adds a condition (e.g. `"internet_access"`).
    pub fn condition(mut self, value: impl Into<String>) -> Self {
        self.conditions.push(value.into());
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

    /// Sets the maximum number of results.
    pub fn limit(mut self, value: u32) -> Self {
        self.limit = Some(value);
        self
    }

    /// Sets the result offset for pagination.
    pub fn offset(mut self, value: u32) -> Self {
        self.offset = Some(value);
        self
    }

    /// Sets the response language.
    pub fn lang(mut self, value: impl Into<String>) -> Self {
        self.lang = Some(value.into());
        self
    }

    /// Filters results by name.
    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
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
        if !self.categories.is_empty() {
            params.push("categories", self.categories.join(","));
        }
        if !self.conditions.is_empty() {
            params.push("conditions", self.conditions.join(","));
        }
        if !self.filters.is_empty() {
            params.push("filter", self.filters.join("|"));
        }
        if !self.biases.is_empty() {
            params.push("bias", self.biases.join("|"));
        }
        if let Some(limit) = self.limit {
            params.push("limit", limit.to_string());
        }
        if let Some(offset) = self.offset {
            params.push("offset", offset.to_string());
        }
        if let Some(lang) = self.lang {
            params.push("lang", lang);
        }
        if let Some(name) = self.name {
            params.push("name", name);
        }

        self.client.get("/v2/places", params, &self.cancel).await
    }
}

/// Access to the place details API.
pub struct PlaceDetailsService {
    client: Client,
}

impl PlaceDetailsService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Starts a place details request by place id.
    pub fn by_id(&self, place_id: impl Into<String>) -> PlaceDetailsRequest {
        PlaceDetailsRequest {
            client: self.client.clone(),
            place_id: Some(place_id.into()),
            coordinates: None,
            features: Vec::new(),
            lang: None,
            cancel: CancelToken::new(),
        }
    }

    /// Starts a place details request by coordinates.
    pub fn by_coordinates(&self, lat: f64, lon: f64) -> PlaceDetailsRequest {
        PlaceDetailsRequest {
            client: self.client.clone(),
            place_id: None,
            coordinates: Some((lat, lon)),
            features: Vec::new(),
            lang: None,
            cancel: CancelToken::new(),
        }
    }
}

/// A place details request builder.
pub struct PlaceDetailsRequest {
    client: Client,
    place_id: Option<String>,
    coordinates: Option<(f64, f64)>,
    features: Vec<String>,
    lang: Option<String>,
    cancel: CancelToken,
}

impl PlaceDetailsRequest {
    /// Adds feature blocks to include in the response (e.g. `"details"`).
    pub fn feature(mut self, value: impl Into<String>) -> Self {
        self.features.push(value.into());
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

    /// Executes the request.
    pub async fn send(self) -> Result<FeatureCollection> {
        let mut params = Params::new();
        if let Some(place_id) = self.place_id {
            params.push("id", place_id);
        }
        if let Some((lat, lon)) = self.coordinates {
            params.push("lat", lat.to_string());
            params.push("lon", lon.to_string());
        }
        if !self.features.is_empty() {
            params.push("features", self.features.join(","));
        }
        if let Some(lang) = self.lang {
            params.push("lang", lang);
        }

        self.client
            .get("/v2/place-details", params, &self.cancel)
            .await
    }
}
