//! Snapping recorded GPS traces to the road network.

use serde::Serialize;

use crate::cancel::CancelToken;
use crate::client::{Client, Params};
use crate::error::Result;
use crate::types::{FeatureCollection, TravelMode};

/// Access to the map matching API.
pub struct MapMatchingService {
    client: Client,
}

impl MapMatchingService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Starts a map matching request.
    pub fn matching(&self) -> MapMatchingRequest {
        MapMatchingRequest {
            client: self.client.clone(),
            waypoints: Vec::new(),
            mode: None,
            cancel: CancelToken::new(),
        }
    }
}

/// A map matching request builder.
pub struct MapMatchingRequest {
    client: Client,
    waypoints: Vec<MapMatchingWaypoint>,
    mode: Option<TravelMode>,
    cancel: CancelToken,
}

impl MapMatchingRequest {
    /// Sets the recorded waypoints to match.
    pub fn waypoints<I: IntoIterator<Item = MapMatchingWaypoint>>(mut self, waypoints: I) -> Self {
        self.waypoints = waypoints.into_iter().collect();
        self
    }

    /// Sets the travel mode.
    pub fn mode(mut self, value: TravelMode) -> Self {
        self.mode = Some(value);
        self
    }

    /// Attaches a cancellation token to this call.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Executes the request.
    pub async fn send(self) -> Result<FeatureCollection> {
        let body = MapMatchingBody {
            mode: self.mode,
            waypoints: self.waypoints,
        };

        self.client
            .post("/v1/mapmatching", Params::new(), &body, &self.cancel)
            .await
    }
}

/// A recorded GPS point handed to the map matching API.
#[derive(Debug, Clone, Serialize)]
pub struct MapMatchingWaypoint {
    /// `[lon, lat]` coordinates of the sample.
    pub location: [f64; 2],
    /// RFC 3339 timestamp of the sample, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Heading in degrees, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearing: Option<f64>,
}

#[derive(Serialize)]
struct MapMatchingBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<TravelMode>,
    waypoints: Vec<MapMatchingWaypoint>,
}
