use crate::models::{Amenities, Classifications, Property, PropertyType};
use chrono::{DateTime, TimeZone, Utc};

/// Built-in catalog of 15 listings used when no catalog file is configured.
///
/// Five rentals are priced between 120 000 and 300 000; ids run 1..=15 in catalog order.
pub fn sample_catalog() -> Vec<Property> {
    let mut catalog = Vec::with_capacity(15);

    let mut p = listing(1, "Furnished two bedroom flat", PropertyType::Rent, "apartment", 120_000.0);
    p.description = "Bright flat with a sea view balcony, walking distance to the beach".to_string();
    p.keywords = keywords(&["sea view", "furnished", "balcony"]);
    p.location = "Victoria Island".to_string();
    p.address = "12 Ahmadu Bello Way".to_string();
    p.featured = true;
    p.date_added = date(2024, 3, 2);
    p.bedrooms = 2;
    p.amenities = Amenities {
        furnished: true,
        balcony: true,
        electricity: true,
        water_supply: true,
        verified: true,
        ..Default::default()
    };
    catalog.push(p);

    let mut p = listing(2, "Five bedroom detached duplex", PropertyType::Buy, "duplex", 450_000_000.0);
    p.description = "Newly completed duplex with pool, garden and staff quarters".to_string();
    p.keywords = keywords(&["duplex", "pool", "new build"]);
    p.location = "Lekki Phase 1".to_string();
    p.address = "7 Admiralty Way".to_string();
    p.date_added = date(2024, 5, 18);
    p.bedrooms = 5;
    p.bathrooms = 6;
    p.amenities = Amenities {
        pool: true,
        garden: true,
        parking: true,
        security: true,
        is_chain_free: true,
        ..Default::default()
    };
    p.classifications.is_new_build = true;
    catalog.push(p);

    let mut p = listing(3, "Mini flat close to the university", PropertyType::Rent, "apartment", 150_000.0);
    p.description = "Compact self-contained flat, ideal for students".to_string();
    p.keywords = keywords(&["student", "self contain"]);
    p.location = "Yaba".to_string();
    p.address = "3 Herbert Macaulay Way".to_string();
    p.date_added = date(2024, 1, 14);
    p.amenities.water_supply = true;
    catalog.push(p);

    let mut p = listing(4, "Serviced studio with gym access", PropertyType::ServiceApartment, "studio", 85_000.0);
    p.description = "Fully serviced studio with daily cleaning and 24 hour power".to_string();
    p.keywords = keywords(&["serviced", "short let", "gym"]);
    p.location = "Ikoyi".to_string();
    p.address = "22 Bourdillon Road".to_string();
    p.featured = true;
    p.date_added = date(2024, 6, 1);
    p.amenities = Amenities {
        furnished: true,
        serviced: true,
        gym: true,
        electricity: true,
        water_supply: true,
        security: true,
        verified: true,
        ..Default::default()
    };
    catalog.push(p);

    let mut p = listing(5, "Terrace house for auction", PropertyType::Buy, "terrace", 38_000_000.0);
    p.description = "Three bedroom terrace sold by auction, needs modernisation".to_string();
    p.keywords = keywords(&["auction", "renovation"]);
    p.location = "Surulere".to_string();
    p.address = "41 Adeniran Ogunsanya Street".to_string();
    p.date_added = date(2024, 2, 9);
    p.bedrooms = 3;
    p.bathrooms = 2;
    p.amenities.parking = true;
    p.classifications.is_auction = true;
    catalog.push(p);

    let mut p = listing(6, "Three bedroom flat with parking", PropertyType::Rent, "apartment", 200_000.0);
    p.description = "Spacious flat in a gated estate with borehole water".to_string();
    p.keywords = keywords(&["gated estate", "family"]);
    p.location = "Gbagada".to_string();
    p.address = "Phase 2 Estate, Block C".to_string();
    p.date_added = date(2024, 4, 22);
    p.bedrooms = 3;
    p.bathrooms = 2;
    p.amenities = Amenities {
        parking: true,
        security: true,
        water_supply: true,
        ..Default::default()
    };
    catalog.push(p);

    let mut p = listing(7, "Rent to own bungalow", PropertyType::RentToOwn, "bungalow", 2_500_000.0);
    p.description = "Pay monthly towards ownership of a three bedroom bungalow".to_string();
    p.keywords = keywords(&["rent to own", "bungalow", "garden"]);
    p.city = "Abuja".to_string();
    p.state = "FCT".to_string();
    p.location = "Lugbe".to_string();
    p.address = "Plot 14 Airport Road".to_string();
    p.featured = true;
    p.date_added = date(2024, 3, 30);
    p.bedrooms = 3;
    p.bathrooms = 2;
    p.amenities.garden = true;
    catalog.push(p);

    let mut p = listing(8, "Off-plan four bedroom semi-detached", PropertyType::Buy, "semi-detached", 95_000_000.0);
    p.description = "Off-plan unit, completion expected next year, flexible payment plan".to_string();
    p.keywords = keywords(&["off plan", "payment plan"]);
    p.location = "Ajah".to_string();
    p.address = "Abraham Adesanya Estate".to_string();
    p.date_added = date(2024, 6, 12);
    p.bedrooms = 4;
    p.bathrooms = 4;
    p.classifications.is_new_build = true;
    p.classifications.is_off_plan = true;
    catalog.push(p);

    let mut p = listing(9, "Two bedroom flat in Wuse", PropertyType::Rent, "apartment", 250_000.0);
    p.description = "Well finished flat near the market with constant electricity".to_string();
    p.keywords = keywords(&["central", "electricity"]);
    p.city = "Abuja".to_string();
    p.state = "FCT".to_string();
    p.location = "Wuse 2".to_string();
    p.address = "5 Aminu Kano Crescent".to_string();
    p.date_added = date(2024, 5, 3);
    p.bedrooms = 2;
    p.bathrooms = 2;
    p.amenities = Amenities {
        electricity: true,
        parking: true,
        has_reduced_price: true,
        ..Default::default()
    };
    catalog.push(p);

    let mut p = listing(10, "Two bedroom serviced apartment", PropertyType::ServiceApartment, "apartment", 180_000.0);
    p.description = "Serviced apartment with pool and concierge".to_string();
    p.keywords = keywords(&["serviced", "pool", "concierge"]);
    p.location = "Lekki Phase 1".to_string();
    p.address = "18 Fola Osibo Road".to_string();
    p.featured = true;
    p.date_added = date(2024, 2, 27);
    p.bedrooms = 2;
    p.bathrooms = 2;
    p.amenities = Amenities {
        furnished: true,
        serviced: true,
        pool: true,
        security: true,
        ..Default::default()
    };
    catalog.push(p);

    let mut p = listing(11, "Shared ownership maisonette at auction", PropertyType::Buy, "maisonette", 27_500_000.0);
    p.description = "Half share of a maisonette, offered through auction".to_string();
    p.keywords = keywords(&["shared ownership", "auction"]);
    p.location = "Ikeja GRA".to_string();
    p.address = "9 Isaac John Street".to_string();
    p.date_added = date(2024, 1, 5);
    p.bedrooms = 3;
    p.bathrooms = 3;
    p.amenities.is_under_offer = true;
    p.classifications.is_shared_ownership = true;
    p.classifications.is_auction = true;
    catalog.push(p);

    let mut p = listing(12, "Four bedroom terrace to let", PropertyType::Rent, "terrace", 300_000.0);
    p.description = "Family terrace with garden and private parking".to_string();
    p.keywords = keywords(&["family", "garden"]);
    p.location = "Magodo".to_string();
    p.address = "Shangisha Estate".to_string();
    p.date_added = date(2024, 6, 20);
    p.bedrooms = 4;
    p.bathrooms = 3;
    p.amenities = Amenities {
        garden: true,
        parking: true,
        security: true,
        ..Default::default()
    };
    catalog.push(p);

    let mut p = listing(13, "New build rent to own shared ownership flat", PropertyType::RentToOwn, "apartment", 1_800_000.0);
    p.description = "Shared ownership new build with a rent to own plan".to_string();
    p.keywords = keywords(&["new build", "shared ownership"]);
    p.city = "Abuja".to_string();
    p.state = "FCT".to_string();
    p.location = "Gwarinpa".to_string();
    p.address = "3rd Avenue".to_string();
    p.featured = true;
    p.date_added = date(2024, 4, 8);
    p.bedrooms = 2;
    p.amenities.balcony = true;
    p.classifications.is_new_build = true;
    p.classifications.is_shared_ownership = true;
    catalog.push(p);

    let mut p = listing(14, "Retirement bungalow, off plan", PropertyType::Buy, "bungalow", 60_000_000.0);
    p.description = "Single storey retirement home in a quiet gated community".to_string();
    p.keywords = keywords(&["retirement", "quiet", "off plan"]);
    p.location = "Epe".to_string();
    p.address = "Lakeside Gardens".to_string();
    p.date_added = date(2024, 5, 29);
    p.bedrooms = 2;
    p.bathrooms = 2;
    p.amenities = Amenities {
        garden: true,
        security: true,
        is_chain_free: true,
        ..Default::default()
    };
    p.classifications.is_retirement_home = true;
    p.classifications.is_off_plan = true;
    catalog.push(p);

    let mut p = listing(15, "Executive serviced penthouse", PropertyType::ServiceApartment, "penthouse", 650_000.0);
    p.description = "Penthouse with rooftop terrace, gym and pool".to_string();
    p.keywords = keywords(&["penthouse", "luxury", "gym"]);
    p.location = "Banana Island".to_string();
    p.address = "Ocean Parade".to_string();
    p.date_added = date(2024, 6, 25);
    p.bedrooms = 3;
    p.bathrooms = 4;
    p.amenities = Amenities {
        furnished: true,
        serviced: true,
        gym: true,
        pool: true,
        balcony: true,
        security: true,
        verified: true,
        ..Default::default()
    };
    catalog.push(p);

    catalog
}

fn listing(id: u64, title: &str, property_type: PropertyType, category: &str, price: f64) -> Property {
    Property {
        id,
        title: title.to_string(),
        description: String::new(),
        keywords: Vec::new(),
        property_type,
        category: category.to_string(),
        location: String::new(),
        city: "Lagos".to_string(),
        state: "Lagos".to_string(),
        address: String::new(),
        price,
        currency: "NGN".to_string(),
        featured: false,
        date_added: date(2024, 1, 1),
        bedrooms: 1,
        bathrooms: 1,
        amenities: Amenities::default(),
        classifications: Classifications::default(),
    }
}

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0)
        .single()
        .unwrap_or_default()
}
