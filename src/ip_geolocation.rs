//! IP address geolocation.

use serde::Deserialize;

use crate::cancel::CancelToken;
use crate::client::{Client, Params};
use crate::error::Result;

/// Access to the IP geolocation API.
pub struct IpGeolocationService {
    client: Client,
}

impl IpGeolocationService {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Starts a lookup. Without an explicit [`ip`](IpGeolocationRequest::ip)
    /// the API resolves the address of the caller.
    pub fn lookup(&self) -> IpGeolocationRequest {
        IpGeolocationRequest {
            client: self.client.clone(),
            ip: None,
            cancel: CancelToken::new(),
        }
    }
}

/// An IP geolocation request builder.
pub struct IpGeolocationRequest {
    client: Client,
    ip: Option<String>,
    cancel: CancelToken,
}

impl IpGeolocationRequest {
    /// Sets a specific IP address to look up.
    pub fn ip(mut self, value: impl Into<String>) -> Self {
        self.ip = Some(value.into());
        self
    }

    /// Attaches a cancellation token to this call.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Executes the request.
    pub async fn send(self) -> Result<IpGeolocationResponse> {
        let mut params = Params::new();
        if let Some(ip) = self.ip {
            params.push("ip", ip);
        }

        self.client.get("/v1/ipinfo", params, &self.cancel).await
    }
}

/// The response from the IP geolocation API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IpGeolocationResponse {
    pub ip: Option<String>,
    pub city: Option<IpCity>,
    pub state: Option<IpState>,
    pub country: Option<IpCountry>,
    pub continent: Option<IpContinent>,
    pub location: Option<IpCoordinates>,
}

/// City information for an IP address.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IpCity {
    pub name: Option<String>,
}

/// State or subdivision information for an IP address.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IpState {
    pub name: Option<String>,
}

/// Country information for an IP address.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IpCountry {
    pub name: Option<String>,
    pub name_native: Option<String>,
    pub iso_code: Option<String>,
    pub phone_code: Option<String>,
    pub capital: Option<String>,
    pub flag: Option<String>,
    #[serde(default)]
    pub languages: Vec<IpLanguage>,
    pub currency: Option<String>,
}

/// A language spoken in the resolved country.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IpLanguage {
    pub iso_code: Option<String>,
    pub name: Option<String>,
    pub name_native: Option<String>,
}

/// Continent information for an IP address.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IpContinent {
    pub name: Option<String>,
    pub code: Option<String>,
}

/// Geographic coordinates for an IP address.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IpCoordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
