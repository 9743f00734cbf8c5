//! Administrative boundary hierarchies.

use crate::cancel::CancelToken;
use crate::client::{Client, Params};
use crate::error::Result;
use crate::types::{BoundaryType, FeatureCollection, GeometryType};

/// Access to the boundaries API.
pub struct BoundariesService {
    client: Client,
}

impl BoundariesService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Finds the boundaries containing the given coordinates.
    pub fn part_of(&self, lat: f64, lon: f64) -> BoundariesPartOfRequest {
        BoundariesPartOfRequest {
            client: self.client.clone(),
            coordinates: Some((lat, lon)),
            id: None,
            boundary: None,
            geometry: None,
            lang: None,
            cancel: CancelToken::new(),
        }
    }

    /// Finds the boundaries containing the given place.
    pub fn part_of_id(&self, id: impl Into<String>) -> BoundariesPartOfRequest {
        BoundariesPartOfRequest {
            client: self.client.clone(),
            coordinates: None,
            id: Some(id.into()),
            boundary: None,
            geometry: None,
            lang: None,
            cancel: CancelToken::new(),
        }
    }

    /// Lists the sub-boundaries of the given place.
    pub fn consists_of(&self, id: impl Into<String>) -> BoundariesConsistsOfRequest {
        BoundariesConsistsOfRequest {
            client: self.client.clone(),
            id: id.into(),
            boundary: None,
            geometry: None,
            lang: None,
            sublevel: None,
            cancel: CancelToken::new(),
        }
    }
}

/// A boundaries part-of request builder.
pub struct BoundariesPartOfRequest {
    client: Client,
    coordinates: Option<(f64, f64)>,
    id: Option<String>,
    boundary: Option<BoundaryType>,
    geometry: Option<GeometryType>,
    lang: Option<String>,
    cancel: CancelToken,
}

impl BoundariesPartOfRequest {
    /// Restricts results to the given boundary type.
    pub fn boundary(mut self, value: BoundaryType) -> Self {
        self.boundary = Some(value);
        self
    }

    /// Sets the geometry resolution of the response.
    pub fn geometry(mut self, value: GeometryType) -> Self {
        self.geometry = Some(value);
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
        if let Some((lat, lon)) = self.coordinates {
            params.push("lat", lat.to_string());
            params.push("lon", lon.to_string());
        }
        if let Some(id) = self.id {
            params.push("id", id);
        }
        if let Some(boundary) = self.boundary {
            params.push("boundary", boundary.as_str());
        }
        if let Some(geometry) = self.geometry {
            params.push("geometry", geometry.as_str());
        }
        if let Some(lang) = self.lang {
            params.push("lang", lang);
        }

        self.client
            .get("/v1/boundaries/part-of", params, &self.cancel)
            .await
    }
}

/// A boundaries consists-of request builder.
pub struct BoundariesConsistsOfRequest {
    client: Client,
    id: String,
    boundary: Option<BoundaryType>,
    geometry: Option<GeometryType>,
    lang: Option<String>,
    sublevel: Option<u32>,
    cancel: CancelToken,
}

impl BoundariesConsistsOfRequest {
    /// Restricts results to the given boundary type.
    pub fn boundary(mut self, value: BoundaryType) -> Self {
        self.boundary = Some(value);
        self
    }

    /// Sets the geometry resolution of the response.
    pub fn geometry(mut self, value: GeometryType) -> Self {
        self.geometry = Some(value);
        self
    }

    /// Sets the response language.
    pub fn lang(mut self, value: impl Into<String>) -> Self {
        self.lang = Some(value.into());
        self
    }

    /// Sets how many levels of sub-boundaries to descend.
    pub fn sublevel(mut self, value: u32) -> Self {
        self.sublevel = Some(value);
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
        params.push("id", self.id);
        if let Some(boundary) = self.boundary {
            params.push("boundary", boundary.as_str());
        }
        if let Some(geometry) = self.geometry {
            params.push("geometry", geometry.as_str());
        }
        if let Some(lang) = self.lang {
            params.push("lang", lang);
        }
        if let Some(sublevel) = self.sublevel {
            params.push("sublevel", sublevel.to_string());
        }

        self.client
            .get("/v1/boundaries/consists-of", params, &self.cancel)
            .await
    }
}
