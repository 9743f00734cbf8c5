//! Isoline (reachability) calculations.

use crate::cancel::CancelToken;
use crate::client::{Client, Params};
use crate::error::Result;
use crate::types::{FeatureCollection, IsolineType, RouteType, TrafficModel, TravelMode, Units};

/// Access to the isoline API.
pub struct IsolinesService {
    client: Client,
}

impl IsolinesService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Starts an isoline request centered on the given coordinates.
    pub fn at(&self, lat: f64, lon: f64) -> IsolineRequest {
        IsolineRequest {
            client: self.client.clone(),
            origin: IsolineOrigin::Coordinates { lat, lon },
            isoline_type: None,
            mode: None,
            ranges: Vec::new(),
            avoids: Vec::new(),
            traffic: None,
            route_type: None,
            max_speed: None,
            units: None,
            cancel: CancelToken::new(),
        }
    }

    /// Starts a request to retrieve a previously generated isoline by id.
    pub fn by_id(&self, id: impl Into<String>) -> IsolineRequest {
        IsolineRequest {
            client: self.client.clone(),
            origin: IsolineOrigin::Id(id.into()),
            isoline_type: None,
            mode: None,
            ranges: Vec::new(),
            avoids: Vec::new(),
            traffic: None,
            route_type: None,
            max_speed: None,
            units: None,
            cancel: CancelToken::new(),
        }
    }
}

enum IsolineOrigin {
    Coordinates { lat: f64, lon: f64 },
    Id(String),
}

/// An isoline request builder.
pub struct IsolineRequest {
    client: Client,
    origin: IsolineOrigin,
    isoline_type: Option<IsolineType>,
    mode: Option<TravelMode>,
    ranges: Vec<u32>,
    avoids: Vec<String>,
    traffic: Option<TrafficModel>,
    route_type: Option<RouteType>,
    max_speed: Option<u32>,
    units: Option<Units>,
    cancel: CancelToken,
}

impl IsolineRequest {
    /// Sets the isoline type (time or distance).
    pub fn isoline_type(mut self, value: IsolineType) -> Self {
        self.isoline_type = Some(value);
        self
    }

    /// Sets the travel mode.
    pub fn mode(mut self, value: TravelMode) -> Self {
        self.mode = Some(value);
        self
    }

    /// Adds range values (seconds for time isolines, meters for distance).
    pub fn range<I: IntoIterator<Item = u32>>(mut self, values: I) -> Self {
        self.ranges.extend(values);
        self
    }

    /// Adds a road feature to avoid.
    pub fn avoid(mut self, value: impl Into<String>) -> Self {
        self.avoids.push(value.into());
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
    pub async fn send(self) -> Result<FeatureCollection> {
        let mut params = Params::new();
        match &self.origin {
            IsolineOrigin::Id(id) => params.push("id", id.clone()),
            IsolineOrigin::Coordinates { lat, lon } => {
                params.push("lat", lat.to_string());
                params.push("lon", lon.to_string());
            }
        }
        if let Some(isoline_type) = self.isoline_type {
            params.push("type", isoline_type.as_str());
        }
        if let Some(mode) = self.mode {
            params.push("mode", mode.as_str());
        }
        if !self.ranges.is_empty() {
            let ranges: Vec<String> = self.ranges.iter().map(u32::to_string).collect();
            params.push("range", ranges.join(","));
        }
        if !self.avoids.is_empty() {
            params.push("avoid", self.avoids.join("|"));
        }
        if let Some(traffic) = self.traffic {
            params.push("traffic", traffic.as_str());
        }
        if let Some(route_type) = self.route_type {
            params.push("route_type", route_type.as_str());
        }
        if let Some(max_speed) = self.max_speed {
            params.push("max_speed", max_speed.to_string());
        }
        if let Some(units) = self.units {
            params.push("units", units.as_str());
        }

        self.client.get("/v1/isoline", params, &self.cancel).await
    }
}
