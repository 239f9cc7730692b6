//! Real central-Seoul locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap.

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

// ============================================================================
// Hotels (good for start/end anchors)
// ============================================================================

pub const HOTELS: &[Location] = &[
    Location::new("Lotte Hotel Seoul", 37.5652, 126.9810),
    Location::new("The Plaza Seoul", 37.5647, 126.9779),
    Location::new("Four Seasons Seoul", 37.5721, 126.9754),
];

// ============================================================================
// Palaces and museums
// ============================================================================

pub const SIGHTS: &[Location] = &[
    Location::new("Gyeongbokgung", 37.5796, 126.9770),
    Location::new("Changdeokgung", 37.5794, 126.9910),
    Location::new("Deoksugung", 37.5658, 126.9751),
    Location::new("National Museum of Korea", 37.5240, 126.9804),
    Location::new("Bukchon Hanok Village", 37.5826, 126.9836),
    Location::new("N Seoul Tower", 37.5512, 126.9882),
    Location::new("Dongdaemun Design Plaza", 37.5667, 127.0095),
];

// ============================================================================
// Markets and food streets
// ============================================================================

pub const MARKETS: &[Location] = &[
    Location::new("Gwangjang Market", 37.5700, 126.9996),
    Location::new("Namdaemun Market", 37.5592, 126.9776),
    Location::new("Myeongdong Street", 37.5636, 126.9850),
    Location::new("Insadong", 37.5740, 126.9850),
];
