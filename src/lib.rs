//! # geoapify - a client for the Geoapify Location Platform
//!
//! This crate wraps the Geoapify REST APIs (geocoding, places, routing,
//! isolines, boundaries, batch geocoding and more) behind per-endpoint
//! request builders that all share one execution core: URL construction
//! with the API key appended as a query parameter, JSON body handling,
//! typed error classification, and an optional retry policy with
//! exponential backoff and jitter.
//!
//! ## Quick Start
//!
//! ```no_run
//! use geoapify::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), geoapify::Error> {
//!     let client = Client::new("YOUR_API_KEY")?;
//!
//!     let response = client
//!         .geocoding()
//!         .search("1313 Broadway, Tacoma, WA")
//!         .limit(5)
//!         .send()
//!         .await?;
//!
//!     for address in &response.results {
//!         println!(
//!             "{} ({}, {})",
//!             address.formatted.as_deref().unwrap_or("<unnamed>"),
//!             address.lat,
//!             address.lon,
//!         );
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Retries
//!
//! Without a retry configuration every call performs a single attempt.
//! Attaching a [`RetryConfig`] makes the client transparently retry
//! rate-limited (429) and server-error (5xx) responses with exponential
//! backoff, jitter, and support for the `Retry-After` header; any other
//! failure still surfaces immediately:
//!
//! ```no_run
//! use geoapify::{Client, RetryConfig};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), geoapify::Error> {
//! let client = Client::builder("YOUR_API_KEY")
//!     .retry(RetryConfig::new(
//!         3,
//!         Duration::from_millis(500),
//!         Duration::from_secs(30),
//!     ))
//!     .build()?;
//! # let _ = client;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Non-2xx API responses surface as [`Error::Api`] carrying the status
//! code, a best-effort message, and the raw body. Transport,
//! serialization and cancellation failures are separate variants, so a
//! `match` tells them apart:
//!
//! ```no_run
//! use geoapify::{Client, Error};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::new("YOUR_API_KEY")?;
//! match client.geocoding().search("Berlin").send().await {
//!     Ok(response) => println!("{} results", response.results.len()),
//!     Err(Error::Api(api_error)) if api_error.status.as_u16() == 401 => {
//!         eprintln!("check your API key: {}", api_error.message);
//!     }
//!     Err(Error::Cancelled) => eprintln!("call was cancelled"),
//!     Err(other) => eprintln!("request failed: {other}"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Cancellation
//!
//! Every request builder accepts a [`CancelToken`]. Firing the token
//! aborts the in-flight network call or any pending retry wait and the
//! call returns [`Error::Cancelled`]. The library imposes no implicit
//! timeouts; configure them on the injected [`reqwest::Client`] or
//! through a token you fire yourself.

mod batch;
mod boundaries;
mod cancel;
mod client;
mod error;
mod geocoding;
mod ip_geolocation;
mod isolines;
mod map_matching;
mod places;
mod postcode;
mod retry;
mod route_matrix;
mod route_planner;
mod routing;
mod types;

pub use batch::{
    BatchForwardRequest, BatchGeocodingService, BatchJob, BatchResult, BatchResultRequest,
    BatchReverseRequest,
};
pub use boundaries::{BoundariesConsistsOfRequest, BoundariesPartOfRequest, BoundariesService};
pub use cancel::CancelToken;
pub use client::{Client, ClientBuilder};
pub use error::{ApiError, Error, Result};
pub use geocoding::{
    AutocompleteRequest, GeocodingParsed, GeocodingQuery, GeocodingResponse, GeocodingService,
    ReverseRequest, SearchRequest,
};
pub use ip_geolocation::{
    IpCity, IpContinent, IpCoordinates, IpCountry, IpGeolocationRequest, IpGeolocationResponse,
    IpGeolocationService, IpLanguage, IpState,
};
pub use isolines::{IsolineRequest, IsolinesService};
pub use map_matching::{MapMatchingRequest, MapMatchingService, MapMatchingWaypoint};
pub use places::{PlaceDetailsRequest, PlaceDetailsService, PlacesRequest, PlacesService};
pub use postcode::{PostcodeRequest, PostcodeService};
pub use retry::RetryConfig;
pub use route_matrix::{
    MatrixLocation, RouteMatrixAvoid, RouteMatrixEntry, RouteMatrixRequest, RouteMatrixResponse,
    RouteMatrixService, RouteMatrixWaypoint,
};
pub use route_planner::{
    PlannerAgent, PlannerAgentResult, PlannerBreak, PlannerJob, PlannerLocation,
    PlannerRouteStep, PlannerShipment, PlannerShipmentStop, RoutePlannerRequest,
    RoutePlannerResponse, RoutePlannerService,
};
pub use routing::{
    LegStep, Route, RouteLeg, RoutingRequest, RoutingResponse, RoutingService, StepInstruction,
};
pub use types::*;
