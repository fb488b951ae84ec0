//! Record types evaluated by the search pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

pub type RecordId = String;

/// A WGS84 coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self { Self { lat, lng } }

    /// Both components finite and inside `[-90, 90]` / `[-180, 180]`.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite() && (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

#[derive(Deserialize)]
struct PartialPoint {
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lng: Option<f64>,
}

/// A stored pair missing either half reads as no coordinates at all.
fn partial_point<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<GeoPoint>, D::Error> {
    let stored = Option::<PartialPoint>::deserialize(deserializer)?;
    Ok(stored.and_then(|p| Some(GeoPoint::new(p.lat?, p.lng?))))
}

/// The searchable entity types of the marketplace.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Provider,
    Listing,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Provider => "provider",
            EntityKind::Listing => "listing",
        }
    }

    /// Directory under the catalog root holding records of this kind.
    pub fn catalog_dir(self) -> &'static str {
        match self {
            EntityKind::Provider => "providers",
            EntityKind::Listing => "listings",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "provider" | "providers" | "cook" | "cooks" => Ok(EntityKind::Provider),
            "listing" | "listings" | "dish" | "dishes" => Ok(EntityKind::Listing),
            other => Err(Error::NotFound(format!("entity kind '{}'", other))),
        }
    }
}

/// A home cook offering dishes on the marketplace.
///
/// `price` is the cook's typical dish price; `rating`/`review_count` are the
/// aggregate review figures maintained by the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRecord {
    pub id: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(default, deserialize_with = "partial_point", skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
    pub created_at: DateTime<Utc>,
}

/// A prepared dish offered by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub id: RecordId,
    pub provider_id: RecordId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub dietary: Vec<String>,
    #[serde(default)]
    pub allergens: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(default, deserialize_with = "partial_point", skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<GeoPoint>,
    pub created_at: DateTime<Utc>,
}

/// A surviving candidate, borrowed for the duration of one request.
///
/// The distance lives here and never on the record itself. It serializes as
/// the record's own fields plus `distance` when one was computed.
#[derive(Debug, Serialize)]
pub struct Hit<'a, C> {
    #[serde(flatten)]
    pub record: &'a C,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl<'a, C> Hit<'a, C> {
    pub fn new(record: &'a C) -> Self { Self { record, distance: None } }

    pub fn with_distance(record: &'a C, distance: Option<f64>) -> Self { Self { record, distance } }
}

impl<C: Clone> Hit<'_, C> {
    pub fn into_owned(self) -> Ranked<C> { Ranked { record: self.record.clone(), distance: self.distance } }
}

impl<C> Clone for Hit<'_, C> {
    fn clone(&self) -> Self { *self }
}

impl<C> Copy for Hit<'_, C> {}

/// Owned form of [`Hit`], returned when the records were fetched inside the call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<C> {
    #[serde(flatten)]
    pub record: C,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}
