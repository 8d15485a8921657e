//! Crop encyclopedia
//!
//! Static husbandry notes and imagery served alongside recommendations.
//! Crops without an entry fall back to a placeholder image.

use serde::Serialize;

pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/100";

/// Reference notes for growing one crop.
#[derive(Debug, Clone, Serialize)]
pub struct CropInfo {
    pub image_url: &'static str,
    pub growth_conditions: &'static str,
    pub care_tips: &'static str,
    pub harvest_time: &'static str,
    pub pests: &'static str,
}

static TOMATO: CropInfo = CropInfo {
    image_url: "https://images.unsplash.com/photo-1598516803209-7f16c7a24135?auto=format&fit=crop&w=500&q=80",
    growth_conditions: "Tomatoes thrive in well-drained, fertile soil with a pH of 6.0-6.8. They need full sun (6-8 hours daily) and temperatures between 20°C to 30°C.",
    care_tips: "Water consistently (1-2 inches per week), use stakes or cages for support, and apply mulch to retain moisture. Fertilize with a balanced 10-10-10 fertilizer.",
    harvest_time: "60-80 days after planting, when fruits are firm and fully colored.",
    pests: "Watch for aphids, whiteflies, and tomato hornworms. Use neem oil for organic control.",
};

static RICE: CropInfo = CropInfo {
    image_url: "https://images.unsplash.com/photo-1592918319975-86a7b78c5c3d?auto=format&fit=crop&w=500&q=80",
    growth_conditions: "Rice grows best in flooded fields with clayey soil, pH 5.5-7.0, and temperatures between 20°C to 37°C.",
    care_tips: "Maintain 2-5 cm of standing water during early growth, reduce water as plants mature. Use nitrogen-rich fertilizers like urea.",
    harvest_time: "90-150 days depending on the variety, when grains are golden and firm.",
    pests: "Monitor for stem borers and leaf folders. Use organic pesticides like neem extracts.",
};

static WHEAT: CropInfo = CropInfo {
    image_url: "https://images.unsplash.com/photo-1591984472815-5b3b4b5f6c1e?auto=format&fit=crop&w=500&q=80",
    growth_conditions: "Wheat prefers well-drained loamy soil, pH 6.0-7.5, and cooler temperatures (15°C-25°C).",
    care_tips: "Sow in rows 20 cm apart, irrigate 4-5 times during the season, and apply phosphorus-based fertilizers at sowing.",
    harvest_time: "90-120 days, when grains are hard and straw turns golden.",
    pests: "Aphids and rust are common. Use resistant varieties and organic sprays.",
};

/// Husbandry notes for a crop, when the encyclopedia has an entry.
pub fn crop_info(crop: &str) -> Option<&'static CropInfo> {
    match crop {
        "Tomato" => Some(&TOMATO),
        "Rice" => Some(&RICE),
        "Wheat" => Some(&WHEAT),
        _ => None,
    }
}

/// Image URL for a crop, with a placeholder fallback.
pub fn image_url(crop: &str) -> &'static str {
    crop_info(crop).map_or(PLACEHOLDER_IMAGE_URL, |info| info.image_url)
}
