use serde::{Deserialize, Serialize};

use blueprint_core::ValueObject;

/// Physical site of a router or switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zipcode: u32,
    pub country: String,
    pub latitude: f32,
    pub longitude: f32,
}

impl Location {
    pub fn same_country_as(&self, other: &Location) -> bool {
        self.country == other.country
    }
}

impl ValueObject for Location {}
