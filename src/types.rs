//! Shared request vocabulary and response models.
//!
//! The string-typed enums in this module carry the exact wire values the
//! API expects; [`filter`] and [`bias`] build the composite filter strings
//! accepted by the geocoding and places endpoints.

use serde::{Deserialize, Serialize};

/// Defines an enum whose variants map one-to-one onto API wire values.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Returns the wire value sent to the API.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

wire_enum! {
    /// Response format requested from the API.
    Format {
        Json => "json",
        GeoJson => "geojson",
        Xml => "xml",
    }
}

wire_enum! {
    /// Location type filter for geocoding results.
    LocationType {
        Country => "country",
        State => "state",
        City => "city",
        Postcode => "postcode",
        Street => "street",
        Amenity => "amenity",
        Locality => "locality",
    }
}

wire_enum! {
    /// Travel or transportation mode.
    TravelMode {
        Drive => "drive",
        LightTruck => "light_truck",
        MediumTruck => "medium_truck",
        Truck => "truck",
        HeavyTruck => "heavy_truck",
        TruckDangerousGoods => "truck_dangerous_goods",
        LongTruck => "long_truck",
        Bus => "bus",
        Scooter => "scooter",
        Motorcycle => "motorcycle",
        Bicycle => "bicycle",
        MountainBike => "mountain_bike",
        RoadBike => "road_bike",
        Walk => "walk",
        Hike => "hike",
        Transit => "transit",
        ApproximatedTransit => "approximated_transit",
    }
}

wire_enum! {
    /// Route optimization type.
    RouteType {
        Balanced => "balanced",
        Short => "short",
        LessManeuvers => "less_maneuvers",
    }
}

wire_enum! {
    /// Distance units.
    Units {
        Metric => "metric",
        Imperial => "imperial",
    }
}

wire_enum! {
    /// Traffic model used for route calculations.
    TrafficModel {
        FreeFlow => "free_flow",
        Approximated => "approximated",
    }
}

wire_enum! {
    /// Additional detail blocks available in routing responses.
    RouteDetail {
        InstructionDetails => "instruction_details",
        RouteDetails => "route_details",
        Elevation => "elevation",
    }
}

wire_enum! {
    /// Isoline calculation type.
    IsolineType {
        Time => "time",
        Distance => "distance",
    }
}

wire_enum! {
    /// Boundary type for the boundaries API.
    BoundaryType {
        Administrative => "administrative",
        PostalCode => "postal_code",
        Political => "political",
        LowEmissionZone => "low_emission_zone",
    }
}

wire_enum! {
    /// Geometry resolution for boundary and postcode responses.
    GeometryType {
        Point => "point",
        Geometry1000 => "geometry_1000",
        Geometry5000 => "geometry_5000",
        Geometry10000 => "geometry_10000",
    }
}

/// A geographic coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    /// Creates a location from latitude and longitude.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Returns the `[lon, lat]` pair used in JSON request bodies.
    pub(crate) fn lon_lat(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

/// Builders for the `filter` query parameter of geocoding and places calls.
pub mod filter {
    /// Restricts results to the given ISO country codes.
    pub fn country(codes: &[&str]) -> String {
        format!("countrycode:{}", codes.join(","))
    }

    /// Restricts results to a circle around `lon`/`lat` with the given radius.
    pub fn circle(lon: f64, lat: f64, radius_meters: f64) -> String {
        format!("circle:{lon},{lat},{radius_meters}")
    }

    /// Restricts results to a bounding rectangle.
    pub fn rect(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> String {
        format!("rect:{lon1},{lat1},{lon2},{lat2}")
    }

    /// Restricts results to a place boundary by place id.
    pub fn place(place_id: &str) -> String {
        format!("place:{place_id}")
    }
}

/// Builders for the `bias` query parameter of geocoding and places calls.
pub mod bias {
    /// Prefers results close to the given point.
    pub fn proximity(lon: f64, lat: f64) -> String {
        format!("proximity:{lon},{lat}")
    }

    /// Prefers results within a circle around `lon`/`lat`.
    pub fn circle(lon: f64, lat: f64, radius_meters: f64) -> String {
        format!("circle:{lon},{lat},{radius_meters}")
    }

    /// Prefers results within a bounding rectangle.
    pub fn rect(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> String {
        format!("rect:{lon1},{lat1},{lon2},{lat2}")
    }

    /// Prefers results from the given ISO country codes.
    pub fn country(codes: &[&str]) -> String {
        format!("countrycode:{}", codes.join(","))
    }
}

/// A geocoded address result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    pub name: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub state: Option<String>,
    pub state_code: Option<String>,
    pub county: Option<String>,
    pub county_code: Option<String>,
    pub postcode: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub housenumber: Option<String>,
    pub suburb: Option<String>,
    pub district: Option<String>,
    #[serde(default)]
    pub lon: f64,
    #[serde(default)]
    pub lat: f64,
    pub formatted: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub result_type: Option<String>,
    pub distance: Option<f64>,
    pub place_id: Option<String>,
    pub category: Option<String>,
    pub rank: Option<Rank>,
    pub timezone: Option<Timezone>,
    pub datasource: Option<Datasource>,
}

/// Confidence and match information for a geocoding result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Rank {
    pub importance: Option<f64>,
    pub popularity: Option<f64>,
    pub confidence: Option<f64>,
    pub confidence_city_level: Option<f64>,
    pub confidence_street_level: Option<f64>,
    pub confidence_building_level: Option<f64>,
    pub match_type: Option<String>,
}

/// Timezone information attached to a geocoding result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timezone {
    pub name: Option<String>,
    pub name_alt: Option<String>,
    #[serde(rename = "offset_STD")]
    pub offset_std: Option<String>,
    #[serde(rename = "offset_STD_seconds")]
    pub offset_std_seconds: Option<i32>,
    #[serde(rename = "offset_DST")]
    pub offset_dst: Option<String>,
    #[serde(rename = "offset_DST_seconds")]
    pub offset_dst_seconds: Option<i32>,
    #[serde(rename = "abbreviation_STD")]
    pub abbreviation_std: Option<String>,
    #[serde(rename = "abbreviation_DST")]
    pub abbreviation_dst: Option<String>,
}

/// Attribution for the data source of a result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Datasource {
    pub sourcename: Option<String>,
    pub attribution: Option<String>,
    pub license: Option<String>,
    pub url: Option<String>,
}

/// A GeoJSON feature collection, as returned by the places, isoline,
/// boundaries and postcode endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type", default)]
    pub collection_type: String,
    #[serde(default)]
    pub features: Vec<Feature>,
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,
}

/// A GeoJSON feature.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type", default)]
    pub feature_type: String,
    pub geometry: Option<Geometry>,
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,
}

/// A GeoJSON geometry with untyped coordinates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type", default)]
    pub geometry_type: String,
    #[serde(default)]
    pub coordinates: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_match_the_api() {
        assert_eq!(Format::GeoJson.as_str(), "geojson");
        assert_eq!(LocationType::Amenity.as_str(), "amenity");
        assert_eq!(TravelMode::TruckDangerousGoods.as_str(), "truck_dangerous_goods");
        assert_eq!(RouteType::LessManeuvers.as_str(), "less_maneuvers");
        assert_eq!(TrafficModel::FreeFlow.as_str(), "free_flow");
        assert_eq!(RouteDetail::InstructionDetails.as_str(), "instruction_details");
        assert_eq!(GeometryType::Geometry1000.as_str(), "geometry_1000");
        assert_eq!(BoundaryType::LowEmissionZone.as_str(), "low_emission_zone");
    }

    #[test]
    fn wire_enums_serialize_as_plain_strings() {
        assert_eq!(serde_json::to_string(&TravelMode::Drive).unwrap(), r#""drive""#);
        assert_eq!(serde_json::to_string(&Units::Imperial).unwrap(), r#""imperial""#);
    }

    #[test]
    fn filter_and_bias_strings() {
        assert_eq!(filter::country(&["de", "at"]), "countrycode:de,at");
        assert_eq!(filter::circle(13.4, 52.5, 5000.0), "circle:13.4,52.5,5000");
        assert_eq!(filter::rect(-1.0, 50.0, 1.0, 52.0), "rect:-1,50,1,52");
        assert_eq!(filter::place("abc123"), "place:abc123");
        assert_eq!(bias::proximity(13.4, 52.5), "proximity:13.4,52.5");
        assert_eq!(bias::country(&["us"]), "countrycode:us");
    }

    #[test]
    fn address_decodes_with_partial_fields() {
        let address: Address = serde_json::from_str(
            r#"{"city":"Tacoma","lon":-122.44,"lat":47.25,"formatted":"1313 Broadway"}"#,
        )
        .unwrap();
        assert_eq!(address.city.as_deref(), Some("Tacoma"));
        assert_eq!(address.lat, 47.25);
        assert!(address.rank.is_none());
    }

    #[test]
    fn location_body_order_is_lon_lat() {
        let location = Location::new(47.25, -122.44);
        assert_eq!(location.lon_lat(), [-122.44, 47.25]);
    }
}
