//! Demo listings and users loaded into a fresh store.

use chrono::{DateTime, TimeZone, Utc};

use nyumba_core::types::{Property, PropertyReview, PropertyType, User, UserRole};

fn date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn review(
    id: &str,
    tenant_id: &str,
    tenant_name: &str,
    ratings: (u8, u8, u8),
    overall_rating: f32,
    comment: &str,
    created_at: DateTime<Utc>,
) -> PropertyReview {
    let (house_condition, landlord_rating, neighborhood_rating) = ratings;
    PropertyReview {
        id: id.to_string(),
        tenant_id: tenant_id.to_string(),
        tenant_name: tenant_name.to_string(),
        house_condition,
        landlord_rating,
        neighborhood_rating,
        overall_rating,
        comment: comment.to_string(),
        created_at,
    }
}

pub fn seed_users() -> Vec<User> {
    let user = |id: &str, email: &str, name: &str, role: UserRole, phone: &str| User {
        id: id.to_string(),
        email: email.to_string(),
        name: name.to_string(),
        role,
        phone: Some(phone.to_string()),
    };
    vec![
        user("1", "john.landlord@example.com", "John Mwangi", UserRole::Landlord, "+254712345678"),
        user("2", "mary.tenant@example.com", "Mary Wanjiku", UserRole::Tenant, "+254723456789"),
        user("3", "peter.landlord@example.com", "Peter Kiprotich", UserRole::Landlord, "+254734567890"),
        user("4", "grace.tenant@example.com", "Grace Akinyi", UserRole::Tenant, "+254745678901"),
    ]
}

pub fn seed_properties() -> Vec<Property> {
    vec![
        Property {
            id: "1".to_string(),
            title: "Modern 2BR Apartment in Westlands".to_string(),
            description: "Beautiful modern apartment with great city views, fully furnished with \
                          modern amenities. Perfect for professionals working in the CBD."
                .to_string(),
            price: 45_000,
            location: "Westlands, Nairobi".to_string(),
            bedrooms: 2,
            bathrooms: 2,
            area: 85,
            property_type: PropertyType::Apartment,
            amenities: strings(&["Parking", "Security", "Gym", "Swimming Pool", "Backup Generator"]),
            images: strings(&["/modern-apartment-westlands-nairobi.png"]),
            landlord_id: "1".to_string(),
            is_available: true,
            service_charge_inclusive: true,
            service_charge_amount: Some(5_000),
            reviews: vec![
                review(
                    "r1",
                    "2",
                    "Mary W.",
                    (4, 5, 4),
                    4.3,
                    "Great apartment with responsive landlord. The gym facilities are excellent!",
                    date(2024, 1, 20),
                ),
                review(
                    "r2",
                    "4",
                    "Grace A.",
                    (4, 4, 4),
                    4.0,
                    "Modern finishes and great location. Parking can be tight during peak hours.",
                    date(2024, 1, 25),
                ),
            ],
            tenant_friendliness_score: 4.2,
            created_at: date(2024, 1, 15),
            updated_at: date(2024, 1, 15),
        },
        Property {
            id: "2".to_string(),
            title: "Spacious 3BR House in Karen".to_string(),
            description: "Family-friendly house with a large garden, perfect for families. \
                          Quiet neighborhood with excellent schools nearby."
                .to_string(),
            price: 75_000,
            location: "Karen, Nairobi".to_string(),
            bedrooms: 3,
            bathrooms: 3,
            area: 150,
            property_type: PropertyType::House,
            amenities: strings(&["Garden", "Parking", "Security", "Backup Water", "DSQ"]),
            images: strings(&["/spacious-house-karen-nairobi-garden.png"]),
            landlord_id: "1".to_string(),
            is_available: true,
            service_charge_inclusive: false,
            service_charge_amount: Some(8_000),
            reviews: vec![review(
                "r3",
                "4",
                "Grace A.",
                (5, 5, 5),
                5.0,
                "Perfect family home! The garden is amazing and the neighborhood is very safe.",
                date(2024, 1, 18),
            )],
            tenant_friendliness_score: 4.8,
            created_at: date(2024, 1, 10),
            updated_at: date(2024, 1, 10),
        },
        Property {
            id: "3".to_string(),
            title: "Cozy Studio in Kilimani".to_string(),
            description: "Perfect for young professionals, fully furnished studio apartment in \
                          the heart of Kilimani with easy access to restaurants and nightlife."
                .to_string(),
            price: 25_000,
            location: "Kilimani, Nairobi".to_string(),
            bedrooms: 1,
            bathrooms: 1,
            area: 35,
            property_type: PropertyType::Studio,
            amenities: strings(&["Furnished", "Security", "Parking", "Internet"]),
            images: strings(&["/cozy-studio-apartment-kilimani-nairobi.png"]),
            landlord_id: "3".to_string(),
            is_available: true,
            service_charge_inclusive: true,
            service_charge_amount: Some(2_500),
            reviews: vec![review(
                "r4",
                "2",
                "Mary W.",
                (3, 4, 4),
                3.7,
                "Good location but the space is quite small. Furniture could use some updating.",
                date(2024, 1, 22),
            )],
            tenant_friendliness_score: 3.8,
            created_at: date(2024, 1, 20),
            updated_at: date(2024, 1, 20),
        },
        Property {
            id: "4".to_string(),
            title: "Affordable Bedsitter in Kasarani".to_string(),
            description: "Budget-friendly bedsitter perfect for students and young professionals. \
                          Close to public transport and shopping centers."
                .to_string(),
            price: 12_000,
            location: "Kasarani, Nairobi".to_string(),
            bedrooms: 1,
            bathrooms: 1,
            area: 25,
            property_type: PropertyType::Bedsitter,
            amenities: strings(&["Security", "Water", "Parking"]),
            images: strings(&["/affordable-bedsitter-kasarani-nairobi.png"]),
            landlord_id: "3".to_string(),
            is_available: false,
            service_charge_inclusive: false,
            service_charge_amount: Some(1_500),
            reviews: vec![review(
                "r5",
                "2",
                "Mary W.",
                (4, 4, 4),
                4.0,
                "Great value for money. The landlord is very understanding and helpful.",
                date(2024, 1, 15),
            )],
            tenant_friendliness_score: 4.0,
            created_at: date(2024, 1, 5),
            updated_at: date(2024, 1, 25),
        },
    ]
}
