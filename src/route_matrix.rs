//! Many-to-many travel time and distance matrices.

use serde::{Deserialize, Serialize};

use crate::cancel::CancelToken;
use crate::client::{Client, Params};
use crate::error::Result;
use crate::types::{Location, RouteType, TrafficModel, TravelMode, Units};

/// Access to the route matrix API.
pub struct RouteMatrixService {
    client: Client,
}

impl RouteMatrixService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Starts a route matrix calculation.
    pub fn calculate(&self) -> RouteMatrixRequest {
        RouteMatrixRequest {
            client: self.client.clone(),
            sources: Vec::new(),
            targets: Vec::new(),
            mode: None,
            avoids: Vec::new(),
            traffic: None,
            route_type: None,
            max_speed: None,
            units: None,
            cancel: CancelToken::new(),
        }
    }
}

/// A route matrix request builder.
pub struct RouteMatrixRequest {
    client: Client,
    sources: Vec<Location>,
    targets: Vec<Location>,
    mode: Option<TravelMode>,
    avoids: Vec<RouteMatrixAvoid>,
    traffic: Option<TrafficModel>,
    route_type: Option<RouteType>,
    max_speed: Option<u32>,
    units: Option<Units>,
    cancel: CancelToken,
}

impl RouteMatrixRequest {
    /// Sets the source locations.
    pub fn sources<I: IntoIterator<Item = Location>>(mut self, locations: I) -> Self {
        self.sources = locations.into_iter().collect();
        self
    }

    /// Sets the target locations.
    pub fn targets<I: IntoIterator<Item = Location>>(mut self, locations: I) -> Self {
        self.targets = locations.into_iter().collect();
        self
    }

    /// Sets the travel mode.
    pub fn mode(mut self, value: TravelMode) -> Self {
        self.mode = Some(value);
        self
    }

    /// Adds an area or feature to avoid.
    pub fn avoid(mut self, value: RouteMatrixAvoid) -> Self {
        self.avoids.push(value);
        self
    }

    /// Sets the traffic model.
    pub fn traffic(mut self, value: TrafficModel) -> Self {
        self.traffic = Some(value);
        self
    }

    /// Sets the route optimization type.
    pub fn route_type(mut self, value: RouteType) -> Self {
        self.route_type = Some(value);
        self
    }

    /// Sets the maximum speed in km/h.
    pub fn max_speed(mut self, value: u32) -> Self {
        self.max_speed = Some(value);
        self
    }

    /// Sets the distance units.
    pub fn units(mut self, value: Units) -> Self {
        self.units = Some(value);
        self
    }

    /// Attaches a cancellation token to this call.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Executes the request.
    pub async fn send(self) -> Result<RouteMatrixResponse> {
        let body = RouteMatrixBody {
            mode: self.mode,
            sources: self.sources.iter().map(|l| MatrixLocation::from(*l)).collect(),
            targets: self.targets.iter().map(|l| MatrixLocation::from(*l)).collect(),
            avoid: self.avoids,
            traffic: self.traffic,
            route_type: self.route_type,
            max_speed: self.max_speed,
            units: self.units,
        };

        self.client
            .post("/v1/routematrix", Params::new(), &body, &self.cancel)
            .await
    }
}

/// An area or road feature the matrix calculation should avoid.
#[derive(Debug, Clone, Serialize)]
pub struct RouteMatrixAvoid {
    #[serde(rename = "type")]
    pub avoid_type: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<MatrixLocation>,
}

/// A `{"location": [lon, lat]}` entry in the request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixLocation {
    pub location: [f64; 2],
}

impl From<Location> for MatrixLocation {
    fn from(location: Location) -> Self {
        Self {
            location: location.lon_lat(),
        }
    }
}

#[derive(Serialize)]
struct RouteMatrixBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<TravelMode>,
    sources: Vec<MatrixLocation>,
    targets: Vec<MatrixLocation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    avoid: Vec<RouteMatrixAvoid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    traffic: Option<TrafficModel>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    route_type: Option<RouteType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_speed: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    units: Option<Units>,
}

/// The response from the route matrix API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteMatrixResponse {
    #[serde(default)]
    pub sources: Vec<RouteMatrixWaypoint>,
    #[serde(default)]
    pub targets: Vec<RouteMatrixWaypoint>,
    #[serde(default)]
    pub sources_to_targets: Vec<Vec<RouteMatrixEntry>>,
}

/// A waypoint snapped to the road network in the matrix response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteMatrixWaypoint {
    #[serde(default)]
    pub original_location: [f64; 2],
    #[serde(default)]
    pub location: [f64; 2],
}

/// A single source-to-target result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteMatrixEntry {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub source_index: u32,
    #[serde(default)]
    pub target_index: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_serializes_locations_as_lon_lat_pairs() {
        let body = RouteMatrixBody {
            mode: Some(TravelMode::Drive),
            sources: vec![MatrixLocation::from(Location::new(52.5, 13.4))],
            targets: vec![MatrixLocation::from(Location::new(48.1, 11.6))],
            avoid: Vec::new(),
            traffic: None,
            route_type: None,
            max_speed: None,
            units: None,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["mode"], "drive");
        assert_eq!(json["sources"][0]["location"][0], 13.4);
        assert_eq!(json["sources"][0]["location"][1], 52.5);
        assert!(json.get("traffic").is_none());
        assert!(json.get("avoid").is_none());
    }
}
