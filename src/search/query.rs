use super::types::{
    normalize_choice, normalize_text, PageRequest, PriceRange, Requirement, SearchFilters, SortBy,
    TriState,
};
use crate::error::SearchError;
use crate::models::{Amenity, Classification, PropertyType};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A `priceMax` at or above this value means "no upper bound"
pub const UNBOUNDED_PRICE_MAX: f64 = 1_000_000_000.0;

/// Search parameters as they arrive from a query string or JSON body.
///
/// Every field is optional, and an empty value (`priceMin=` from a blank
/// form input) counts as absent. [`SearchQuery::into_request`] turns it into typed
/// [`SearchFilters`] and a [`PageRequest`], resolving the sentinels callers
/// send for "no filter": `"all"` for type and category, `0` for minimums,
/// `priceMin <= 0` and `priceMax >= UNBOUNDED_PRICE_MAX` for open price bounds,
/// and `false` for amenities.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchQuery {
    pub property_type: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub keywords: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub price_min: Option<f64>,
    #[serde(deserialize_with = "empty_as_none")]
    pub price_max: Option<f64>,
    #[serde(deserialize_with = "empty_as_none")]
    pub bedrooms: Option<u32>,
    #[serde(deserialize_with = "empty_as_none")]
    pub bathrooms: Option<u32>,

    #[serde(deserialize_with = "empty_as_none")]
    pub furnished: Option<bool>,
    #[serde(deserialize_with = "empty_as_none")]
    pub parking: Option<bool>,
    #[serde(deserialize_with = "empty_as_none")]
    pub garden: Option<bool>,
    #[serde(deserialize_with = "empty_as_none")]
    pub pool: Option<bool>,
    #[serde(deserialize_with = "empty_as_none")]
    pub gym: Option<bool>,
    #[serde(deserialize_with = "empty_as_none")]
    pub verified: Option<bool>,
    #[serde(deserialize_with = "empty_as_none")]
    pub serviced: Option<bool>,
    #[serde(deserialize_with = "empty_as_none")]
    pub electricity: Option<bool>,
    #[serde(deserialize_with = "empty_as_none")]
    pub water_supply: Option<bool>,
    #[serde(deserialize_with = "empty_as_none")]
    pub security: Option<bool>,
    #[serde(deserialize_with = "empty_as_none")]
    pub balcony: Option<bool>,
    #[serde(deserialize_with = "empty_as_none")]
    pub is_chain_free: Option<bool>,
    #[serde(deserialize_with = "empty_as_none")]
    pub has_reduced_price: Option<bool>,
    #[serde(deserialize_with = "empty_as_none")]
    pub is_under_offer: Option<bool>,

    pub retirement_homes: Option<String>,
    pub shared_ownership: Option<String>,
    pub auctions: Option<String>,
    pub new_build: Option<String>,
    pub off_plan: Option<String>,

    pub sort_by: Option<String>,
    #[serde(deserialize_with = "empty_as_none")]
    pub page: Option<u32>,
    #[serde(deserialize_with = "empty_as_none")]
    pub page_size: Option<u32>,
}

impl SearchQuery {
    /// Validate and normalize into filters plus a page request
    pub fn into_request(
        self,
        default_page_size: u32,
        max_page_size: u32,
    ) -> Result<(SearchFilters, PageRequest), SearchError> {
        let page = PageRequest::bounded(
            self.page.unwrap_or(1),
            self.page_size.unwrap_or(default_page_size),
            max_page_size,
        )?;
        let filters = self.into_filters()?;
        Ok((filters, page))
    }

    pub fn into_filters(self) -> Result<SearchFilters, SearchError> {
        let property_type = match self.property_type.as_deref().and_then(normalize_choice) {
            Some(value) => Some(
                value
                    .parse::<PropertyType>()
                    .map_err(SearchError::UnknownPropertyType)?,
            ),
            None => None,
        };

        let sort_by = match self.sort_by.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => value.parse::<SortBy>()?,
            _ => SortBy::default(),
        };

        let price = PriceRange {
            min: price_min(self.price_min)?,
            max: price_max(self.price_max)?,
        };

        let amenities = [
            (Amenity::Furnished, self.furnished),
            (Amenity::Parking, self.parking),
            (Amenity::Garden, self.garden),
            (Amenity::Pool, self.pool),
            (Amenity::Gym, self.gym),
            (Amenity::Verified, self.verified),
            (Amenity::Serviced, self.serviced),
            (Amenity::Electricity, self.electricity),
            (Amenity::WaterSupply, self.water_supply),
            (Amenity::Security, self.security),
            (Amenity::Balcony, self.balcony),
            (Amenity::ChainFree, self.is_chain_free),
            (Amenity::ReducedPrice, self.has_reduced_price),
            (Amenity::UnderOffer, self.is_under_offer),
        ]
        .into_iter()
        .map(|(amenity, requested)| (amenity, Requirement::from(requested)))
        .filter(|(_, requirement)| *requirement == Requirement::MustBeTrue)
        .collect();

        let classifications = [
            ("retirementHomes", Classification::RetirementHome, &self.retirement_homes),
            ("sharedOwnership", Classification::SharedOwnership, &self.shared_ownership),
            ("auctions", Classification::Auction, &self.auctions),
            ("newBuild", Classification::NewBuild, &self.new_build),
            ("offPlan", Classification::OffPlan, &self.off_plan),
        ]
        .into_iter()
        .filter_map(|(field, classification, value)| {
            value
                .as_deref()
                .map(|v| TriState::parse(field, v).map(|state| (classification, state)))
        })
        .collect::<Result<_, _>>()?;

        Ok(SearchFilters {
            property_type,
            category: self.category.as_deref().and_then(normalize_choice),
            location: self.location.as_deref().and_then(normalize_text),
            keywords: self.keywords.as_deref().and_then(normalize_text),
            min_bedrooms: self.bedrooms.filter(|n| *n > 0),
            min_bathrooms: self.bathrooms.filter(|n| *n > 0),
            price,
            amenities,
            classifications,
            sort_by,
        })
    }
}

/// Query strings carry every value as text while JSON bodies carry typed values;
/// accept both.
#[derive(Deserialize)]
#[serde(untagged)]
enum TextOr<T> {
    Text(String),
    Value(T),
}

fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: Display,
{
    match Option::<TextOr<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(TextOr::Value(value)) => Ok(Some(value)),
        Some(TextOr::Text(text)) => match text.trim() {
            "" => Ok(None),
            trimmed => trimmed.parse().map(Some).map_err(de::Error::custom),
        },
    }
}

fn price_min(value: Option<f64>) -> Result<Option<f64>, SearchError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(SearchError::InvalidPrice {
            bound: "minimum",
            value: v,
        }),
        Some(v) if v > 0.0 => Ok(Some(v)),
        _ => Ok(None),
    }
}

fn price_max(value: Option<f64>) -> Result<Option<f64>, SearchError> {
    match value {
        Some(v) if v.is_nan() || v < 0.0 => Err(SearchError::InvalidPrice {
            bound: "maximum",
            value: v,
        }),
        Some(v) if v < UNBOUNDED_PRICE_MAX => Ok(Some(v)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::types::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

    fn request(query: SearchQuery) -> Result<(SearchFilters, PageRequest), SearchError> {
        query.into_request(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)
    }

    #[test]
    fn test_empty_query_is_default_filters() {
        let (filters, page) = request(SearchQuery::default()).unwrap();
        assert_eq!(filters, SearchFilters::default());
        assert_eq!(page, PageRequest::default());
    }

    #[test]
    fn test_sentinels_are_unset() {
        let (filters, _) = request(SearchQuery {
            property_type: Some("all".to_string()),
            category: Some(" All ".to_string()),
            price_min: Some(0.0),
            price_max: Some(UNBOUNDED_PRICE_MAX),
            bedrooms: Some(0),
            bathrooms: Some(0),
            pool: Some(false),
            auctions: Some("include".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(filters.property_type, None);
        assert_eq!(filters.category, None);
        assert_eq!(filters.price, PriceRange::default());
        assert_eq!(filters.min_bedrooms, None);
        assert_eq!(filters.min_bathrooms, None);
        assert_eq!(filters.requirement(Amenity::Pool), Requirement::Unset);
        assert_eq!(filters.tri_state(Classification::Auction), TriState::Include);
    }

    #[test]
    fn test_values_are_typed() {
        let (filters, page) = request(SearchQuery {
            property_type: Some("Rent-To-Own".to_string()),
            location: Some("  Lekki Phase 1 ".to_string()),
            price_min: Some(150_000.0),
            price_max: Some(999_999_999.0),
            bedrooms: Some(3),
            water_supply: Some(true),
            off_plan: Some("show-only".to_string()),
            sort_by: Some("price-low".to_string()),
            page: Some(2),
            page_size: Some(6),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(filters.property_type, Some(PropertyType::RentToOwn));
        assert_eq!(filters.location.as_deref(), Some("lekki phase 1"));
        assert_eq!(filters.price.min, Some(150_000.0));
        assert_eq!(filters.price.max, Some(999_999_999.0));
        assert_eq!(filters.min_bedrooms, Some(3));
        assert_eq!(filters.requirement(Amenity::WaterSupply), Requirement::MustBeTrue);
        assert_eq!(filters.tri_state(Classification::OffPlan), TriState::Only);
        assert_eq!(filters.sort_by, SortBy::PriceLow);
        assert_eq!(page, PageRequest::new(2, 6).unwrap());
    }

    #[test]
    fn test_malformed_input_is_rejected() {
        assert_eq!(
            request(SearchQuery {
                page: Some(0),
                ..Default::default()
            }),
            Err(SearchError::InvalidPage(0))
        );
        assert!(matches!(
            request(SearchQuery {
                price_min: Some(f64::NAN),
                ..Default::default()
            }),
            Err(SearchError::InvalidPrice { bound: "minimum", .. })
        ));
        assert!(matches!(
            request(SearchQuery {
                price_max: Some(-5.0),
                ..Default::default()
            }),
            Err(SearchError::InvalidPrice { bound: "maximum", .. })
        ));
        assert_eq!(
            request(SearchQuery {
                property_type: Some("castle".to_string()),
                ..Default::default()
            }),
            Err(SearchError::UnknownPropertyType("castle".to_string()))
        );
        assert!(matches!(
            request(SearchQuery {
                new_build: Some("sometimes".to_string()),
                ..Default::default()
            }),
            Err(SearchError::UnknownTriState { field: "newBuild", .. })
        ));
        assert!(request(SearchQuery {
            sort_by: Some("cheapest".to_string()),
            ..Default::default()
        })
        .is_err());
    }

    #[test]
    fn test_blank_text_values_are_absent() {
        let query: SearchQuery = serde_json::from_value(serde_json::json!({
            "priceMin": "",
            "bedrooms": " ",
            "pool": "",
            "priceMax": "250000",
            "parking": "true"
        }))
        .unwrap();

        assert_eq!(query.price_min, None);
        assert_eq!(query.bedrooms, None);
        assert_eq!(query.pool, None);
        assert_eq!(query.price_max, Some(250_000.0));
        assert_eq!(query.parking, Some(true));

        let bad = serde_json::from_value::<SearchQuery>(serde_json::json!({ "bedrooms": "abc" }));
        assert!(bad.is_err());
    }

    #[test]
    fn test_deserializes_camel_case_json() {
        let query: SearchQuery = serde_json::from_value(serde_json::json!({
            "propertyType": "buy",
            "priceMax": 500000,
            "isChainFree": true,
            "sharedOwnership": "exclude",
            "pageSize": 24
        }))
        .unwrap();

        assert_eq!(query.property_type.as_deref(), Some("buy"));
        assert_eq!(query.price_max, Some(500_000.0));
        assert_eq!(query.is_chain_free, Some(true));
        assert_eq!(query.shared_ownership.as_deref(), Some("exclude"));
        assert_eq!(query.page_size, Some(24));
    }
}
