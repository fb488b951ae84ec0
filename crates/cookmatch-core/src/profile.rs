//! Per-entity search configuration and the `Candidate` impls that expose
//! record fields to the generic pipeline.

use chrono::{DateTime, Utc};

use crate::query::{NumericField, SortKey, TagField};
use crate::traits::Candidate;
use crate::types::{EntityKind, GeoPoint, ListingRecord, ProviderRecord};

/// Which raw parameters an entity type understands and how it sorts by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityProfile {
    pub kind: EntityKind,
    /// Comma-separated parameter name → categorical field.
    pub categorical_params: &'static [(&'static str, TagField)],
    /// Parameter name → lower bound of a numeric field.
    pub min_params: &'static [(&'static str, NumericField)],
    /// Parameter name → upper bound of a numeric field.
    pub max_params: &'static [(&'static str, NumericField)],
    /// Comma-separated parameter name → field whose values disqualify a candidate.
    pub exclusion_param: Option<(&'static str, TagField)>,
    pub sort_keys: &'static [SortKey],
    pub default_sort: SortKey,
}

const NUMERIC_MIN_PARAMS: &[(&str, NumericField)] = &[
    ("minPrice", NumericField::Price),
    ("minRating", NumericField::Rating),
    ("minReviews", NumericField::ReviewCount),
];

const NUMERIC_MAX_PARAMS: &[(&str, NumericField)] = &[("maxPrice", NumericField::Price)];

// Text relevance only applies to dish search.
const PROVIDER_SORT_KEYS: &[SortKey] = &[
    SortKey::PriceAsc,
    SortKey::PriceDesc,
    SortKey::RatingDesc,
    SortKey::ReviewsDesc,
    SortKey::NameAsc,
    SortKey::Newest,
    SortKey::DistanceAsc,
];

pub const PROVIDER_PROFILE: EntityProfile = EntityProfile {
    kind: EntityKind::Provider,
    categorical_params: &[("cuisine", TagField::Cuisine)],
    min_params: NUMERIC_MIN_PARAMS,
    max_params: NUMERIC_MAX_PARAMS,
    exclusion_param: None,
    sort_keys: PROVIDER_SORT_KEYS,
    default_sort: SortKey::RatingDesc,
};

pub const LISTING_PROFILE: EntityProfile = EntityProfile {
    kind: EntityKind::Listing,
    categorical_params: &[
        ("cuisine", TagField::Cuisine),
        ("category", TagField::Category),
        ("dietary", TagField::Dietary),
    ],
    min_params: NUMERIC_MIN_PARAMS,
    max_params: NUMERIC_MAX_PARAMS,
    exclusion_param: Some(("excludeAllergens", TagField::Allergens)),
    sort_keys: &SortKey::ALL,
    default_sort: SortKey::NameAsc,
};

impl EntityProfile {
    pub fn for_kind(kind: EntityKind) -> &'static EntityProfile {
        match kind {
            EntityKind::Provider => &PROVIDER_PROFILE,
            EntityKind::Listing => &LISTING_PROFILE,
        }
    }

    pub fn allows(&self, key: SortKey) -> bool { self.sort_keys.contains(&key) }

    /// Copy of this profile with another default sort, if that key is allowed.
    pub fn with_default_sort(self, key: SortKey) -> Option<Self> {
        self.allows(key).then_some(Self { default_sort: key, ..self })
    }
}

impl Candidate for ProviderRecord {
    fn profile() -> &'static EntityProfile { &PROVIDER_PROFILE }

    fn id(&self) -> &str { &self.id }

    fn display_name(&self) -> &str { &self.name }

    fn searchable_text(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.bio.as_deref());
        fields.extend(self.location.as_deref());
        fields.extend(self.cuisines.iter().map(String::as_str));
        fields
    }

    fn numeric(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::Price => self.price,
            NumericField::Rating => self.rating,
            NumericField::ReviewCount => self.review_count.map(f64::from),
        }
    }

    fn tags(&self, field: TagField) -> &[String] {
        match field {
            TagField::Cuisine => &self.cuisines,
            TagField::Category | TagField::Dietary | TagField::Allergens => &[],
        }
    }

    fn coordinates(&self) -> Option<GeoPoint> { self.coordinates }

    fn created_at(&self) -> DateTime<Utc> { self.created_at }
}

impl Candidate for ListingRecord {
    fn profile() -> &'static EntityProfile { &LISTING_PROFILE }

    fn id(&self) -> &str { &self.id }

    fn display_name(&self) -> &str { &self.title }

    fn searchable_text(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        fields.extend(self.description.as_deref());
        fields.extend(self.location.as_deref());
        fields.extend(self.cuisine.as_deref());
        fields.extend(self.category.as_deref());
        fields
    }

    fn numeric(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::Price => self.price,
            NumericField::Rating => self.rating,
            NumericField::ReviewCount => self.review_count.map(f64::from),
        }
    }

    fn tags(&self, field: TagField) -> &[String] {
        match field {
            TagField::Cuisine => self.cuisine.as_slice(),
            TagField::Category => self.category.as_slice(),
            TagField::Dietary => &self.dietary,
            TagField::Allergens => &self.allergens,
        }
    }

    fn coordinates(&self) -> Option<GeoPoint> { self.coordinates }

    fn created_at(&self) -> DateTime<Utc> { self.created_at }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_default_sort_keeps_everything_else() {
        let p = PROVIDER_PROFILE.with_default_sort(SortKey::Newest).expect("allowed");
        assert_eq!(p.default_sort, SortKey::Newest);
        assert_eq!(p.kind, EntityKind::Provider);
        assert_eq!(p.categorical_params, PROVIDER_PROFILE.categorical_params);
    }

    #[test]
    fn default_sort_must_be_an_allowed_key() {
        assert!(PROVIDER_PROFILE.with_default_sort(SortKey::RelevanceDesc).is_none());
        let listing = LISTING_PROFILE.with_default_sort(SortKey::RelevanceDesc).expect("allowed");
        assert_eq!(listing.default_sort, SortKey::RelevanceDesc);
    }

    #[test]
    fn profiles_are_found_by_kind() {
        assert_eq!(EntityProfile::for_kind(EntityKind::Listing).default_sort, SortKey::NameAsc);
        assert!(EntityProfile::for_kind(EntityKind::Provider).exclusion_param.is_none());
    }
}
