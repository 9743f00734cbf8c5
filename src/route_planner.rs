//! Route planner (vehicle routing problem) API.

use serde::{Deserialize, Serialize};

use crate::cancel::CancelToken;
use crate::client::{Client, Params};
use crate::error::Result;
use crate::route_matrix::RouteMatrixAvoid;
use crate::types::{RouteType, TrafficModel, TravelMode, Units};

/// Access to the route planner API.
pub struct RoutePlannerService {
    client: Client,
}

impl RoutePlannerService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Starts a route planner request.
    pub fn plan(&self) -> RoutePlannerRequest {
        RoutePlannerRequest {
            client: self.client.clone(),
            agents: Vec::new(),
            jobs: Vec::new(),
            shipments: Vec::new(),
            locations: Vec::new(),
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

/// A route planner request builder.
pub struct RoutePlannerRequest {
    client: Client,
    agents: Vec<PlannerAgent>,
    jobs: Vec<PlannerJob>,
    shipments: Vec<PlannerShipment>,
    locations: Vec<PlannerLocation>,
    mode: Option<TravelMode>,
    avoids: Vec<RouteMatrixAvoid>,
    traffic: Option<TrafficModel>,
    route_type: Option<RouteType>,
    max_speed: Option<u32>,
    units: Option<Units>,
    cancel: CancelToken,
}

impl RoutePlannerRequest {
    /// Sets the agents (vehicles or drivers).
    pub fn agents<I: IntoIterator<Item = PlannerAgent>>(mut self, agents: I) -> Self {
        self.agents = agents.into_iter().collect();
        self
    }

    /// Sets the jobs to be assigned.
    pub fn jobs<I: IntoIterator<Item = PlannerJob>>(mut self, jobs: I) -> Self {
        self.jobs = jobs.into_iter().collect();
        self
    }

    /// Sets the shipments to be assigned.
    pub fn shipments<I: IntoIterator<Item = PlannerShipment>>(mut self, shipments: I) -> Self {
        self.shipments = shipments.into_iter().collect();
        self
    }

    /// Sets the reusable locations referenced by index.
    pub fn locations<I: IntoIterator<Item = PlannerLocation>>(mut self, locations: I) -> Self {
        self.locations = locations.into_iter().collect();
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
    pub async fn send(self) -> Result<RoutePlannerResponse> {
        let body = RoutePlannerBody {
            mode: self.mode,
            agents: self.agents,
            jobs: self.jobs,
            shipments: self.shipments,
            locations: self.locations,
            avoid: self.avoids,
            traffic: self.traffic,
            route_type: self.route_type,
            max_speed: self.max_speed,
            units: self.units,
        };

        self.client
            .post("/v1/routeplanner", Params::new(), &body, &self.cancel)
            .await
    }
}

#[derive(Serialize)]
struct RoutePlannerBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<TravelMode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    agents: Vec<PlannerAgent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    jobs: Vec<PlannerJob>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    shipments: Vec<PlannerShipment>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    locations: Vec<PlannerLocation>,
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

/// A vehicle or driver in the route planner.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlannerAgent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_location: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_location_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_location: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_location_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_capacity: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub time_windows: Vec<[u32; 2]>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub breaks: Vec<PlannerBreak>,
}

/// A break window for an agent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlannerBreak {
    pub duration: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub time_windows: Vec<[u32; 2]>,
}

/// A job to be assigned to an agent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlannerJob {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_amount: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_amount: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub time_windows: Vec<[u32; 2]>,
}

/// A shipment with pickup and delivery stops.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlannerShipment {
    pub id: String,
    pub pickup: PlannerShipmentStop,
    pub delivery: PlannerShipmentStop,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u32>,
}

/// A pickup or delivery stop of a shipment.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlannerShipmentStop {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub time_windows: Vec<[u32; 2]>,
}

/// A reusable location referenced by index from agents, jobs or shipments.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PlannerLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub location: [f64; 2],
}

/// The response from the route planner API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutePlannerResponse {
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    pub agents: Vec<PlannerAgentResult>,
}

/// The planned route for a single agent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlannerAgentResult {
    #[serde(default)]
    pub agent_index: u32,
    #[serde(default)]
    pub route: Vec<PlannerRouteStep>,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub time: f64,
}

/// A step in an agent's planned route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlannerRouteStep {
    #[serde(rename = "type")]
    pub step_type: Option<String>,
    pub job_index: Option<u32>,
    pub distance: Option<f64>,
    pub time: Option<f64>,
}
