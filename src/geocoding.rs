//! Forward, reverse and autocomplete geocoding.

use serde::Deserialize;

use crate::cancel::CancelToken;
use crate::client::{Client, Params};
use crate::error::Result;
use crate::types::{Address, Format, LocationType};

/// Access to the geocoding APIs.
pub struct GeocodingService {
    client: Client,
}

impl GeocodingService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Starts a forward geocoding request for a free-form address.
    pub fn search(&self, text: impl Into<String>) -> SearchRequest {
        SearchRequest {
            client: self.client.clone(),
            text: text.into(),
            name: None,
            street: None,
            city: None,
            state: None,
            country: None,
            postcode: None,
            housenumber: None,
            location_type: None,
            lang: None,
            limit: None,
            filters: Vec::new(),
            biases: Vec::new(),
            format: None,
            cancel: CancelToken::new(),
        }
    }

    /// Starts a reverse geocoding request for the given coordinates.
    pub fn reverse(&self, lat: f64, lon: f64) -> ReverseRequest {
        ReverseRequest {
            client: self.client.clone(),
            lat,
            lon,
            location_type: None,
            lang: None,
            limit: None,
            format: None,
            cancel: CancelToken::new(),
        }
    }

    /// Starts an address autocomplete request.
    pub fn autocomplete(&self, text: impl Into<String>) -> AutocompleteRequest {
        AutocompleteRequest {
            client: self.client.clone(),
            text: text.into(),
            location_type: None,
            lang: None,
            filters: Vec::new(),
            biases: Vec::new(),
            format: None,
            cancel: CancelToken::new(),
        }
    }
}

/// The response returned by the geocoding APIs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub results: Vec<Address>,
    pub query: Option<GeocodingQuery>,
}

/// Query metadata echoed back by the API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodingQuery {
    pub text: Option<String>,
    pub parsed: Option<GeocodingParsed>,
}

/// The parsed components of a geocoding query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodingParsed {
    pub housenumber: Option<String>,
    pub street: Option<String>,
    pub postcode: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub expected_type: Option<String>,
}

/// A forward geocoding request builder.
pub struct SearchRequest {
    client: Client,
    text: String,
    name: Option<String>,
    street: Option<String>,
    city: Option<String>,
    state: Option<String>,
    country: Option<String>,
    postcode: Option<String>,
    housenumber: Option<String>,
    location_type: Option<LocationType>,
    lang: Option<String>,
    limit: Option<u32>,
    filters: Vec<String>,
    biases: Vec<String>,
    format: Option<Format>,
    cancel: CancelToken,
}

impl SearchRequest {
    /// Sets the name component of a structured query.
    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    /// Sets the street component of a structured query.
    pub fn street(mut self, value: impl Into<String>) -> Self {
        self.street = Some(value.into());
        self
    }

    /// Sets the city component of a structured query.
    pub fn city(mut self, value: impl Into<String>) -> Self {
        self.city = Some(value.into());
        self
    }

    /// Sets the state component of a structured query.
    pub fn state(mut self, value: impl Into<String>) -> Self {
        self.state = Some(value.into());
        self
    }

    /// Sets the country component of a structured query.
    pub fn country(mut self, value: impl Into<String>) -> Self {
        self.country = Some(value.into());
        self
    }

    /// Sets the postcode component of a structured query.
    pub fn postcode(mut self, value: impl Into<String>) -> Self {
        self.postcode = Some(value.into());
        self
    }

    /// Sets the house number component of a structured query.
    pub fn housenumber(mut self, value: impl Into<String>) -> Self {
        self.housenumber = Some(value.into());
        self
    }

    /// Restricts results to the given location type.
    pub fn location_type(mut self, value: LocationType) -> Self {
        self.location_type = Some(value);
        self
    }

    /// Sets the response language (two-letter ISO 639-1 code).
    pub fn lang(mut self, value: impl Into<String>) -> Self {
        self.lang = Some(value.into());
        self
    }

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

    /// Sets the response format.
    pub fn format(mut self, value: Format) -> Self {
        self.format = Some(value);
        self
    }

    /// Attaches a cancellation token to this call.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Executes the request.
    pub async fn send(self) -> Result<GeocodingResponse> {
        let mut params = Params::new();
        params.push("text", self.text);
        if let Some(name) = self.name {
            params.push("name", name);
        }
        if let Some(street) = self.street {
            params.push("street", street);
        }
        if let Some(city) = self.city {
            params.push("city", city);
        }
        if let Some(state) = self.state {
            params.push("state", state);
        }
        if let Some(country) = self.country {
            params.push("country", country);
        }
        if let Some(postcode) = self.postcode {
            params.push("postcode", postcode);
        }
        if let Some(housenumber) = self.housenumber {
            params.push("housenumber", housenumber);
        }
        if let Some(location_type) = self.location_type {
            params.push("type", location_type.as_str());
        }
        if let Some(lang) = self.lang {
            params.push("lang", lang);
        }
        if let Some(limit) = self.limit {
            params.push("limit", limit.to_string());
        }
        if !self.filters.is_empty() {
            params.push("filter", self.filters.join("|"));
        }
        if !self.biases.is_empty() {
            params.push("bias", self.biases.join("|"));
        }
        if let Some(format) = self.format {
            params.push("format", format.as_str());
        }

        self.client
            .get("/v1/geocode/search", params, &self.cancel)
            .await
    }
}

/// A reverse geocoding request builder.
pub struct ReverseRequest {
    client: Client,
    lat: f64,
    lon: f64,
    location_type: Option<LocationType>,
    lang: Option<String>,
    limit: Option<u32>,
    format: Option<Format>,
    cancel: CancelToken,
}

impl ReverseRequest {
    /// Restricts results to the given location type.
    pub fn location_type(mut self, value: LocationType) -> Self {
        self.location_type = Some(value);
        self
    }

    /// Sets the response language (two-letter ISO 639-1 code).
    pub fn lang(mut self, value: impl Into<String>) -> Self {
        self.lang = Some(value.into());
        self
    }

    /// Sets the maximum number of results.
    pub fn limit(mut self, value: u32) -> Self {
        self.limit = Some(value);
        self
    }

    /// Sets the response format.
    pub fn format(mut self, value: Format) -> Self {
        self.format = Some(value);
        self
    }

    /// Attaches a cancellation token to this call.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Executes the request.
    pub async fn send(self) -> Result<GeocodingResponse> {
        let mut params = Params::new();
        params.push("lat", self.lat.to_string());
        params.push("lon", self.lon.to_string());
        if let Some(location_type) = self.location_type {
            params.push("type", location_type.as_str());
        }
        if let Some(lang) = self.lang {
            params.push("lang", lang);
        }
        if let Some(limit) = self.limit {
            params.push("limit", limit.to_string());
        }
        if let Some(format) = self.format {
            params.push("format", format.as_str());
        }

        self.client
            .get("/v1/geocode/reverse", params, &self.cancel)
            .await
    }
}

/// An address autocomplete request builder.
pub struct AutocompleteRequest {
    client: Client,
    text: String,
    location_type: Option<LocationType>,
    lang: Option<String>,
    filters: Vec<String>,
    biases: Vec<String>,
    format: Option<Format>,
    cancel: CancelToken,
}

impl AutocompleteRequest {
    /// Restricts results to the given location type.
    pub fn location_type(mut self, value: LocationType) -> Self {
        self.location_type = Some(value);
        self
    }

    /// Sets the response language (two-letter ISO 639-1 code).
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

    /// Sets the response format.
    pub fn format(mut self, value: Format) -> Self {
        self.format = Some(value);
        self
    }

    /// Attaches a cancellation token to this call.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Executes the request.
    pub async fn send(self) -> Result<GeocodingResponse> {
        let mut params = Params::new();
        params.push("text", self.text);
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
        if let Some(format) = self.format {
            params.push("format", format.as_str());
        }

        self.client
            .get("/v1/geocode/autocomplete", params, &self.cancel)
            .await
    }
}
