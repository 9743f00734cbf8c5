//! Turn-by-turn routing between waypoints.

use serde::Deserialize;

use crate::cancel::CancelToken;
use crate::client::{Client, Params};
use crate::error::Result;
use crate::types::{Format, Location, RouteDetail, RouteType, TrafficModel, TravelMode, Units};

/// Access to the routing API.
pub struct RoutingService {
    client: Client,
}

impl RoutingService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Starts a routing request through the given waypoints, in order.
    pub fn waypoints<I: IntoIterator<Item = Location>>(&self, waypoints: I) -> RoutingRequest {
        RoutingRequest {
            client: self.client.clone(),
            waypoints: waypoints.into_iter().collect(),
            mode: None,
            route_type: None,
            units: None,
            lang: None,
            avoids: Vec::new(),
            details: Vec::new(),
            traffic: None,
            max_speed: None,
            format: None,
            cancel: CancelToken::new(),
        }
    }
}

/// A routing request builder.
pub struct RoutingRequest {
    client: Client,
    waypoints: Vec<Location>,
    mode: Option<TravelMode>,
    route_type: Option<RouteType>,
    units: Option<Units>,
    lang: Option<String>,
    avoids: Vec<String>,
    details: Vec<RouteDetail>,
    traffic: Option<TrafficModel>,
    max_speed: Option<u32>,
    format: Option<Format>,
    cancel: CancelToken,
}

impl RoutingRequest {
    /// Sets the travel mode.
    pub fn mode(mut self, value: TravelMode) -> Self {
        self.mode = Some(value);
        self
    }

    /// Sets the route optimization type.
    pub fn route_type(mut self, value: RouteType) -> Self {
        self.route_type = Some(value);
        self
    }

    /// Sets the distance units.
    pub fn units(mut self, value: Units) -> Self {
        self.units = Some(value);
        self
    }

    /// Sets the response language.
    pub fn lang(mut self, value: impl Into<String>) -> Self {
        self.lang = Some(value.into());
        self
    }

    /// Adds a road feature to avoid.
    pub fn avoid(mut self, value: impl Into<String>) -> Self {
        self.avoids.push(value.into());
        self
    }

    /// Adds a detail block to include in the response.
    pub fn detail(mut self, value: RouteDetail) -> Self {
        self.details.push(value);
        self
    }

    /// Sets the traffic model.
    pub fn traffic(mut self, value: TrafficModel) -> Self {
        self.traffic = Some(value);
        self
    }

    /// Sets the maximum speed in km/h.
    pub fn max_speed(mut self, value: u32) -> Self {
        self.max_speed = Some(value);
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
    pub async fn send(self) -> Result<RoutingResponse> {
        let mut params = Params::new();

        // Waypoints serialize as pipe-separated lat,lon pairs.
        let waypoints: Vec<String> = self
            .waypoints
            .iter()
            .map(|wp| format!("{},{}", wp.lat, wp.lon))
            .collect();
        params.push("waypoints", waypoints.join("|"));

        if let Some(mode) = self.mode {
            params.push("mode", mode.as_str());
        }
        if let Some(route_type) = self.route_type {
            params.push("type", route_type.as_str());
        }
        if let Some(units) = self.units {
            params.push("units", units.as_str());
        }
        if let Some(lang) = self.lang {
            params.push("lang", lang);
        }
        if !self.avoids.is_empty() {
            params.push("avoid", self.avoids.join("|"));
        }
        if !self.details.is_empty() {
            let details: Vec<&str> = self.details.iter().map(|d| d.as_str()).collect();
            params.push("details", details.join(","));
        }
        if let Some(traffic) = self.traffic {
            params.push("traffic", traffic.as_str());
        }
        if let Some(max_speed) = self.max_speed {
            params.push("max_speed", max_speed.to_string());
        }
        if let Some(format) = self.format {
            params.push("format", format.as_str());
        }

        self.client.get("/v1/routing", params, &self.cancel).await
    }
}

/// The response from the routing API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutingResponse {
    #[serde(default)]
    pub results: Vec<Route>,
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,
}

/// A single route result.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub distance: f64,
    pub distance_units: Option<String>,
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub toll: bool,
    #[serde(default)]
    pub ferry: bool,
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
}

/// A leg of a route between two consecutive waypoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteLeg {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub steps: Vec<LegStep>,
    pub elevation: Option<Vec<f64>>,
    pub elevation_range: Option<Vec<Vec<f64>>>,
    pub country_code: Option<Vec<String>>,
}

/// A step within a route leg.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegStep {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub time: f64,
    #[serde(default)]
    pub from_index: u32,
    #[serde(default)]
    pub to_index: u32,
    #[serde(default)]
    pub toll: bool,
    #[serde(default)]
    pub ferry: bool,
    #[serde(default)]
    pub tunnel: bool,
    #[serde(default)]
    pub bridge: bool,
    #[serde(default)]
    pub roundabout: bool,
    pub speed: Option<f64>,
    pub speed_limit: Option<f64>,
    pub truck_limit: Option<f64>,
    pub surface: Option<String>,
    pub lane_count: Option<u32>,
    pub road_class: Option<String>,
    pub name: Option<String>,
    pub instruction: Option<StepInstruction>,
}

/// Turn-by-turn instruction details for a step.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepInstruction {
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub instruction_type: Option<String>,
}
