//! Packing Suggestion Heuristic
//!
//! A pure rule table mapping trip attributes to suggested items. No
//! state, no randomness: the same profile always yields the same list,
//! in category order (trip type, rainy, cold, hot, duration, group
//! size).

use axum::Json;
use serde::{Deserialize, Serialize};

/// One suggested packing item with the rule that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
    pub reason: String,
}

/// Request body for the suggestion endpoint
#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    #[serde(default)]
    pub trip_type: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub duration_days: u32,
    #[serde(default = "default_group_size")]
    pub group_size: u32,
}

fn default_group_size() -> u32 {
    1
}

/// Response wrapper for the suggestion endpoint
#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub suggestions: Vec<Suggestion>,
}

const TREK_ITEMS: &[(&str, &str)] = &[
    ("Tent", "Essential for overnight stays during trek"),
    ("Torch", "Necessary for visibility in dark conditions"),
    ("First Aid Kit", "Safety precaution for outdoor activities"),
    ("Energy Bars", "Quick nutrition during physical activity"),
    ("Water Bottle", "Hydration is crucial during trekking"),
    ("Hiking Boots", "Proper footwear for rough terrain"),
];

const BUSINESS_TRIP_ITEMS: &[(&str, &str)] = &[
    ("Laptop", "Essential for work and presentations"),
    ("Formal Wear", "Professional attire for meetings"),
    ("ID Cards", "Required for identification and access"),
    ("Business Cards", "Useful for networking"),
    ("Chargers", "Keep your devices powered"),
];

const COLLEGE_FEST_ITEMS: &[(&str, &str)] = &[
    ("Banners", "Visual promotion for events"),
    ("Laptops", "For presentations and managing events"),
    ("Extension Cords", "Power supply for multiple devices"),
    ("Costumes", "For performances or themed events"),
    ("Portable Speakers", "For music and announcements"),
];

const HACKATHON_ITEMS: &[(&str, &str)] = &[
    ("Laptop", "Essential for coding and development"),
    ("Chargers", "Keep your devices powered"),
    ("Power Bank", "Backup power for mobile devices"),
    ("Headphones", "For focus and concentration"),
    ("Notebook", "For sketching ideas and taking notes"),
];

const RAINY_DESTINATIONS: &[&str] = &["seattle", "london", "mumbai", "vancouver", "kerala"];
const COLD_DESTINATIONS: &[&str] = &["alaska", "helsinki", "toronto", "moscow", "oslo"];
const HOT_DESTINATIONS: &[&str] = &["dubai", "cairo", "phoenix", "las vegas", "chennai"];

const RAINY_ITEMS: &[(&str, &str)] = &[
    ("Raincoat", "Rainy weather at destination"),
    ("Umbrella", "Protection from rain"),
    ("Waterproof Bag Cover", "Keep belongings dry"),
];

const COLD_ITEMS: &[(&str, &str)] = &[
    ("Warm Jacket", "Cold weather at destination"),
    ("Gloves", "Protection for hands in cold weather"),
    ("Thermal Wear", "Layer clothing for cold climate"),
];

const HOT_ITEMS: &[(&str, &str)] = &[
    ("Sunscreen", "Protection from sun exposure"),
    ("Hat", "Shield from direct sunlight"),
    ("Sunglasses", "Eye protection in bright conditions"),
];

const LONG_TRIP_ITEMS: &[(&str, &str)] = &[
    ("Laundry Bag", "Extended stay requires laundry management"),
    ("Travel Detergent", "For washing clothes on longer trips"),
];

const LARGE_GROUP_ITEMS: &[(&str, &str)] = &[
    ("Group First Aid Kit", "Larger group needs more medical supplies"),
    ("Megaphone", "Communication in larger groups"),
];

/// Trips longer than this gain the laundry suggestions
const LONG_TRIP_DAYS: u32 = 7;
/// Groups larger than this gain the group-logistics suggestions
const LARGE_GROUP_SIZE: u32 = 5;

fn extend(suggestions: &mut Vec<Suggestion>, items: &[(&str, &str)]) {
    suggestions.extend(items.iter().map(|(title, reason)| Suggestion {
        title: title.to_string(),
        reason: reason.to_string(),
    }));
}

/// Generate packing suggestions for a trip profile
///
/// Trip types match by lowercase equality; destinations by lowercase
/// substring against the three locale lists. Duration and group-size
/// rules apply unconditionally past their thresholds.
pub fn suggest(
    trip_type: &str,
    destination: &str,
    duration_days: u32,
    group_size: u32,
) -> Vec<Suggestion> {
    let trip_type = trip_type.to_lowercase();
    let destination = destination.to_lowercase();

    let mut suggestions = Vec::new();

    match trip_type.as_str() {
        "trek" => extend(&mut suggestions, TREK_ITEMS),
        "business trip" => extend(&mut suggestions, BUSINESS_TRIP_ITEMS),
        "college fest" => extend(&mut suggestions, COLLEGE_FEST_ITEMS),
        "hackathon" => extend(&mut suggestions, HACKATHON_ITEMS),
        _ => {}
    }

    if RAINY_DESTINATIONS.iter().any(|loc| destination.contains(loc)) {
        extend(&mut suggestions, RAINY_ITEMS);
    }
    if COLD_DESTINATIONS.iter().any(|loc| destination.contains(loc)) {
        extend(&mut suggestions, COLD_ITEMS);
    }
    if HOT_DESTINATIONS.iter().any(|loc| destination.contains(loc)) {
        extend(&mut suggestions, HOT_ITEMS);
    }

    if duration_days > LONG_TRIP_DAYS {
        extend(&mut suggestions, LONG_TRIP_ITEMS);
    }
    if group_size > LARGE_GROUP_SIZE {
        extend(&mut suggestions, LARGE_GROUP_ITEMS);
    }

    suggestions
}

/// Suggestion handler for POST /api/suggestions
pub async fn get_suggestions(Json(request): Json<SuggestionRequest>) -> Json<SuggestionsResponse> {
    let suggestions = suggest(
        &request.trip_type,
        &request.destination,
        request.duration_days,
        request.group_size,
    );

    Json(SuggestionsResponse { suggestions })
}
