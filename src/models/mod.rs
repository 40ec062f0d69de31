use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a listing is offered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    Rent,
    Buy,
    ServiceApartment,
    RentToOwn,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::Rent,
        PropertyType::Buy,
        PropertyType::ServiceApartment,
        PropertyType::RentToOwn,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Rent => "rent",
            PropertyType::Buy => "buy",
            PropertyType::ServiceApartment => "service-apartment",
            PropertyType::RentToOwn => "rent-to-own",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| s.to_string())
    }
}

/// Amenity flags a listing can advertise
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Amenity {
    Furnished,
    Parking,
    Garden,
    Pool,
    Gym,
    Verified,
    Serviced,
    Electricity,
    WaterSupply,
    Security,
    Balcony,
    ChainFree,
    ReducedPrice,
    UnderOffer,
}

impl Amenity {
    pub const ALL: [Amenity; 14] = [
        Amenity::Furnished,
        Amenity::Parking,
        Amenity::Garden,
        Amenity::Pool,
        Amenity::Gym,
        Amenity::Verified,
        Amenity::Serviced,
        Amenity::Electricity,
        Amenity::WaterSupply,
        Amenity::Security,
        Amenity::Balcony,
        Amenity::ChainFree,
        Amenity::ReducedPrice,
        Amenity::UnderOffer,
    ];
}

/// Classification flags that searches can include, exclude or isolate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Classification {
    RetirementHome,
    SharedOwnership,
    Auction,
    NewBuild,
    OffPlan,
}

impl Classification {
    pub const ALL: [Classification; 5] = [
        Classification::RetirementHome,
        Classification::SharedOwnership,
        Classification::Auction,
        Classification::NewBuild,
        Classification::OffPlan,
    ];
}

/// Amenity flags of a listing, flattened into the listing JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Amenities {
    pub furnished: bool,
    pub parking: bool,
    pub garden: bool,
    pub pool: bool,
    pub gym: bool,
    pub verified: bool,
    pub serviced: bool,
    pub electricity: bool,
    pub water_supply: bool,
    pub security: bool,
    pub balcony: bool,
    pub is_chain_free: bool,
    pub has_reduced_price: bool,
    pub is_under_offer: bool,
}

impl Amenities {
    pub fn has(&self, amenity: Amenity) -> bool {
        match amenity {
            Amenity::Furnished => self.furnished,
            Amenity::Parking => self.parking,
            Amenity::Garden => self.garden,
            Amenity::Pool => self.pool,
            Amenity::Gym => self.gym,
            Amenity::Verified => self.verified,
            Amenity::Serviced => self.serviced,
            Amenity::Electricity => self.electricity,
            Amenity::WaterSupply => self.water_supply,
            Amenity::Security => self.security,
            Amenity::Balcony => self.balcony,
            Amenity::ChainFree => self.is_chain_free,
            Amenity::ReducedPrice => self.has_reduced_price,
            Amenity::UnderOffer => self.is_under_offer,
        }
    }

    /// Human-readable labels of the amenities that are set
    pub fn labels(&self) -> Vec<&'static str> {
        Amenity::ALL
            .into_iter()
            .filter(|a| self.has(*a))
            .map(|a| match a {
                Amenity::Furnished => "Furnished",
                Amenity::Parking => "Parking",
                Amenity::Garden => "Garden",
                Amenity::Pool => "Pool",
                Amenity::Gym => "Gym",
                Amenity::Verified => "Verified",
                Amenity::Serviced => "Serviced",
                Amenity::Electricity => "Electricity",
                Amenity::WaterSupply => "Water supply",
                Amenity::Security => "Security",
                Amenity::Balcony => "Balcony",
                Amenity::ChainFree => "Chain free",
                Amenity::ReducedPrice => "Reduced price",
                Amenity::UnderOffer => "Under offer",
            })
            .collect()
    }
}

/// Classification flags of a listing, flattened into the listing JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Classifications {
    pub is_retirement_home: bool,
    pub is_shared_ownership: bool,
    pub is_auction: bool,
    pub is_new_build: bool,
    pub is_off_plan: bool,
}

impl Classifications {
    pub fn is(&self, classification: Classification) -> bool {
        match classification {
            Classification::RetirementHome => self.is_retirement_home,
            Classification::SharedOwnership => self.is_shared_ownership,
            Classification::Auction => self.is_auction,
            Classification::NewBuild => self.is_new_build,
            Classification::OffPlan => self.is_off_plan,
        }
    }
}

/// Core property listing model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: u64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub property_type: PropertyType,
    pub category: String,
    pub location: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub price: f64,
    pub currency: String,
    #[serde(default)]
    pub featured: bool,
    pub date_added: DateTime<Utc>,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    #[serde(flatten)]
    pub amenities: Amenities,
    #[serde(flatten)]
    pub classifications: Classifications,
}

/// Listing submitted by a landlord or agent, before it gets an id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub property_type: PropertyType,
    pub category: String,
    pub location: String,
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub address: String,
    pub price: f64,
    pub currency: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    #[serde(flatten)]
    pub amenities: Amenities,
    #[serde(flatten)]
    pub classifications: Classifications,
}

impl NewListing {
    /// Turn the submission into a catalog record
    pub fn into_property(self, id: u64, date_added: DateTime<Utc>) -> Property {
        Property {
            id,
            title: self.title,
            description: self.description,
            keywords: self.keywords,
            property_type: self.property_type,
            category: self.category,
            location: self.location,
            city: self.city,
            state: self.state,
            address: self.address,
            price: self.price,
            currency: self.currency,
            featured: self.featured,
            date_added,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            amenities: self.amenities,
            classifications: self.classifications,
        }
    }
}

/// Price and status edits to an existing listing. Absent fields are left alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingUpdate {
    pub price: Option<f64>,
    pub featured: Option<bool>,
    pub verified: Option<bool>,
    pub has_reduced_price: Option<bool>,
    pub is_under_offer: Option<bool>,
}

impl ListingUpdate {
    pub fn apply(&self, property: &mut Property) {
        if let Some(price) = self.price {
            property.price = price;
        }
        if let Some(featured) = self.featured {
            property.featured = featured;
        }
        if let Some(verified) = self.verified {
            property.amenities.verified = verified;
        }
        if let Some(reduced) = self.has_reduced_price {
            property.amenities.has_reduced_price = reduced;
        }
        if let Some(under_offer) = self.is_under_offer {
            property.amenities.is_under_offer = under_offer;
        }
    }
}

/// A price is usable when it is a finite, non-negative number
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_type_round_trips_through_kebab_case() {
        assert_eq!(
            serde_json::to_value(PropertyType::ServiceApartment).unwrap(),
            json!("service-apartment")
        );
        assert_eq!("Rent-To-Own".parse::<PropertyType>(), Ok(PropertyType::RentToOwn));
        assert!("condo".parse::<PropertyType>().is_err());
    }

    #[test]
    fn test_property_json_is_flat() {
        let value = json!({
            "id": 7,
            "title": "Garden flat",
            "description": "Quiet street",
            "keywords": ["garden"],
            "propertyType": "rent",
            "category": "flat",
            "location": "Lekki",
            "city": "Lagos",
            "state": "Lagos",
            "address": "4 Admiralty Way",
            "price": 250000.0,
            "currency": "NGN",
            "featured": true,
            "dateAdded": "2024-03-01T00:00:00Z",
            "bedrooms": 2,
            "bathrooms": 1,
            "garden": true,
            "waterSupply": true,
            "isNewBuild": true
        });

        let property: Property = serde_json::from_value(value).unwrap();
        assert!(property.amenities.garden);
        assert!(property.amenities.has(Amenity::WaterSupply));
        assert!(!property.amenities.has(Amenity::Pool));
        assert!(property.classifications.is(Classification::NewBuild));

        let back = serde_json::to_value(&property).unwrap();
        assert_eq!(back["isNewBuild"], json!(true));
        assert_eq!(back["isUnderOffer"], json!(false));
    }

    #[test]
    fn test_listing_update_only_touches_given_fields() {
        let mut property = NewListing {
            title: "Loft".to_string(),
            description: String::new(),
            keywords: vec![],
            property_type: PropertyType::Buy,
            category: "loft".to_string(),
            location: "Ikoyi".to_string(),
            city: "Lagos".to_string(),
            state: "Lagos".to_string(),
            address: String::new(),
            price: 1_000.0,
            currency: "NGN".to_string(),
            featured: true,
            bedrooms: 1,
            bathrooms: 1,
            amenities: Amenities::default(),
            classifications: Classifications::default(),
        }
        .into_property(1, Utc::now());

        ListingUpdate {
            price: Some(900.0),
            is_under_offer: Some(true),
            ..Default::default()
        }
        .apply(&mut property);

        assert_eq!(property.price, 900.0);
        assert!(property.amenities.is_under_offer);
        assert!(property.featured);
    }

    #[test]
    fn test_price_validity() {
        assert!(is_valid_price(0.0));
        assert!(!is_valid_price(-1.0));
        assert!(!is_valid_price(f64::NAN));
        assert!(!is_valid_price(f64::INFINITY));
    }
}
