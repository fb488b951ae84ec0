//! The normalized, immutable query descriptor and its building blocks.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::profile::EntityProfile;
use crate::types::{EntityKind, GeoPoint};

/// Numeric attributes usable in range filters and sorts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumericField {
    Price,
    Rating,
    ReviewCount,
}

/// Multi-valued string attributes usable in categorical and exclusion filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TagField {
    Cuisine,
    Category,
    Dietary,
    Allergens,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    RelevanceDesc,
    PriceAsc,
    PriceDesc,
    RatingDesc,
    ReviewsDesc,
    NameAsc,
    Newest,
    DistanceAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::RelevanceDesc,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::RatingDesc,
        SortKey::ReviewsDesc,
        SortKey::NameAsc,
        SortKey::Newest,
        SortKey::DistanceAsc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::RelevanceDesc => "relevance-desc",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::RatingDesc => "rating-desc",
            SortKey::ReviewsDesc => "reviews-desc",
            SortKey::NameAsc => "name-asc",
            SortKey::Newest => "newest",
            SortKey::DistanceAsc => "distance-asc",
        }
    }

    /// Case-insensitive lookup by wire name. Unknown names yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.into_iter().find(|k| k.as_str().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Inclusive bounds; an absent side imposes no constraint.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NumericRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn is_unbounded(&self) -> bool { self.min.is_none() && self.max.is_none() }

    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Reference point plus optional distance ceiling in kilometres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoFilter {
    pub origin: GeoPoint,
    pub max_distance_km: Option<f64>,
}

/// Values of `field` that disqualify a candidate. Stored lowercased.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exclusion {
    pub field: TagField,
    pub values: BTreeSet<String>,
}

/// A validated search request. Only obtainable through [`QueryBuilder`], so
/// every instance is internally consistent and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryDescriptor {
    kind: EntityKind,
    text_term: Option<String>,
    categorical: BTreeMap<TagField, BTreeSet<String>>,
    ranges: BTreeMap<NumericField, NumericRange>,
    exclusion: Option<Exclusion>,
    geo: Option<GeoFilter>,
    sort: SortKey,
}

impl QueryDescriptor {
    pub fn builder(profile: &EntityProfile) -> QueryBuilder { QueryBuilder::new(profile) }

    pub fn kind(&self) -> EntityKind { self.kind }

    /// Lowercased search term, if any.
    pub fn text_term(&self) -> Option<&str> { self.text_term.as_deref() }

    pub fn categorical(&self) -> &BTreeMap<TagField, BTreeSet<String>> { &self.categorical }

    pub fn ranges(&self) -> &BTreeMap<NumericField, NumericRange> { &self.ranges }

    pub fn exclusion(&self) -> Option<&Exclusion> { self.exclusion.as_ref() }

    pub fn geo(&self) -> Option<&GeoFilter> { self.geo.as_ref() }

    pub fn sort(&self) -> SortKey { self.sort }

    /// The structural subset a backing store may apply before handing over candidates.
    pub fn coarse(&self) -> CoarseFilter<'_> {
        CoarseFilter { kind: self.kind, categorical: &self.categorical, ranges: &self.ranges }
    }
}

/// Categorical and numeric predicates of a query, borrowed for a candidate source.
#[derive(Debug, Clone, Copy)]
pub struct CoarseFilter<'a> {
    pub kind: EntityKind,
    pub categorical: &'a BTreeMap<TagField, BTreeSet<String>>,
    pub ranges: &'a BTreeMap<NumericField, NumericRange>,
}

/// Accumulates constraints, dropping any that are empty or not representable.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    profile: EntityProfile,
    text_term: Option<String>,
    categorical: BTreeMap<TagField, BTreeSet<String>>,
    ranges: BTreeMap<NumericField, NumericRange>,
    exclusion: Option<Exclusion>,
    geo: Option<GeoFilter>,
    sort: Option<SortKey>,
}

impl QueryBuilder {
    pub fn new(profile: &EntityProfile) -> Self {
        Self {
            profile: *profile,
            text_term: None,
            categorical: BTreeMap::new(),
            ranges: BTreeMap::new(),
            exclusion: None,
            geo: None,
            sort: None,
        }
    }

    pub fn text(mut self, term: &str) -> Self {
        let term = term.trim();
        self.text_term = if term.is_empty() { None } else { Some(term.to_lowercase()) };
        self
    }

    /// Accept any of `values` for `field`. An empty set leaves the field unconstrained.
    pub fn accept<I, S>(mut self, field: TagField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: BTreeSet<String> = values.into_iter().map(Into::<String>::into).filter(|v| !v.is_empty()).collect();
        if values.is_empty() {
            self.categorical.remove(&field);
        } else {
            self.categorical.insert(field, values);
        }
        self
    }

    pub fn min(mut self, field: NumericField, value: f64) -> Self {
        if value.is_finite() {
            self.ranges.entry(field).or_default().min = Some(value);
        }
        self
    }

    pub fn max(mut self, field: NumericField, value: f64) -> Self {
        if value.is_finite() {
            self.ranges.entry(field).or_default().max = Some(value);
        }
        self
    }

    pub fn exclude<I, S>(mut self, field: TagField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values: BTreeSet<String> = values.into_iter().map(|v| v.as_ref().trim().to_lowercase()).filter(|v| !v.is_empty()).collect();
        self.exclusion = if values.is_empty() { None } else { Some(Exclusion { field, values }) };
        self
    }

    /// Restrict to a reference point. Out-of-range points disable the geo filter;
    /// a negative or non-finite ceiling is dropped while the point is kept.
    pub fn near(mut self, origin: GeoPoint, max_distance_km: Option<f64>) -> Self {
        self.geo = origin.is_valid().then(|| GeoFilter {
            origin,
            max_distance_km: max_distance_km.filter(|d| d.is_finite() && *d >= 0.0),
        });
        self
    }

    /// Keys the profile does not allow fall back to its default.
    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort = self.profile.allows(key).then_some(key);
        self
    }

    pub fn build(self) -> QueryDescriptor {
        let mut ranges = self.ranges;
        ranges.retain(|_, r| !r.is_unbounded());
        QueryDescriptor {
            kind: self.profile.kind,
            text_term: self.text_term,
            categorical: self.categorical,
            ranges,
            exclusion: self.exclusion,
            geo: self.geo,
            sort: self.sort.unwrap_or(self.profile.default_sort),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{LISTING_PROFILE, PROVIDER_PROFILE};

    #[test]
    fn sort_key_names_round_trip_through_parse() {
        for key in SortKey::ALL {
            assert_eq!(SortKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(SortKey::parse(" Price-ASC "), Some(SortKey::PriceAsc));
        assert_eq!(SortKey::parse("cheapest"), None);
    }

    #[test]
    fn builder_defaults_sort_per_profile() {
        assert_eq!(QueryDescriptor::builder(&PROVIDER_PROFILE).build().sort(), SortKey::RatingDesc);
        assert_eq!(QueryDescriptor::builder(&LISTING_PROFILE).build().sort(), SortKey::NameAsc);
    }

    #[test]
    fn builder_drops_empty_and_non_finite_constraints() {
        let q = QueryDescriptor::builder(&LISTING_PROFILE)
            .text("   ")
            .accept(TagField::Cuisine, Vec::<String>::new())
            .min(NumericField::Price, f64::NAN)
            .max(NumericField::Rating, f64::INFINITY)
            .exclude(TagField::Allergens, [" ", ""])
            .near(GeoPoint::new(91.0, 0.0), Some(5.0))
            .build();
        assert!(q.text_term().is_none());
        assert!(q.categorical().is_empty());
        assert!(q.ranges().is_empty());
        assert!(q.exclusion().is_none());
        assert!(q.geo().is_none());
    }

    #[test]
    fn builder_keeps_point_when_ceiling_is_negative() {
        let q = QueryDescriptor::builder(&PROVIDER_PROFILE).near(GeoPoint::new(10.0, 20.0), Some(-1.0)).build();
        let geo = q.geo().expect("geo filter");
        assert_eq!(geo.origin, GeoPoint::new(10.0, 20.0));
        assert!(geo.max_distance_km.is_none());
    }

    #[test]
    fn range_contains_is_inclusive() {
        let r = NumericRange { min: Some(10.0), max: Some(20.0) };
        assert!(r.contains(10.0));
        assert!(r.contains(20.0));
        assert!(!r.contains(9.99));
        assert!(!r.contains(20.01));
        assert!(NumericRange { min: None, max: Some(5.0) }.contains(-100.0));
    }
}
