// src/domain/listing.rs

use serde::{Deserialize, Deserializer, Serialize};

// search result
//  ├── Hit / CondArea / TotalPage
//  └── apartments[]
//       ├── name, address, transports[], age_of_building, total_floor
//       └── rooms[]
//            ├── thumbnail, floor, madori, menseki
//            ├── rent_price, admin_price, deposit_price, gratuity_price
//            └── url
//
// Field names follow the legacy snapshot file so that old caches still decode.

/// One successful scrape of a search-results page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "Hit")]
    pub hit_count: u32,
    #[serde(rename = "CondArea")]
    pub condition_summary: String,
    #[serde(rename = "TotalPage")]
    pub total_pages: u32,
    #[serde(rename = "apartments", default, deserialize_with = "null_as_empty")]
    pub listings: Vec<Listing>,
}

impl SearchResult {
    pub fn unit_count(&self) -> usize {
        self.listings.iter().map(|l| l.units.len()).sum()
    }
}

/// One building in the result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub name: String,
    pub address: String,
    #[serde(rename = "transports", default, deserialize_with = "null_as_empty")]
    pub nearest_transit_options: Vec<String>,
    #[serde(rename = "age_of_building")]
    pub building_age: String,
    #[serde(rename = "total_floor")]
    pub total_floors: String,
    #[serde(rename = "rooms", default, deserialize_with = "null_as_empty")]
    pub units: Vec<Unit>,
}

impl Listing {
    /// Identity of a listing: name and address together.
    pub fn key(&self) -> IgnoredListingKey {
        IgnoredListingKey {
            name: self.name.clone(),
            address: self.address.clone(),
        }
    }
}

/// One rentable room inside a listing. Money and size fields stay as scraped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(
        rename = "thumbnail",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub thumbnail_url: Option<String>,
    pub floor: String,
    #[serde(rename = "madori")]
    pub layout: String,
    #[serde(rename = "menseki")]
    pub area: String,
    #[serde(rename = "rent_price")]
    pub rent: String,
    #[serde(rename = "admin_price")]
    pub management_fee: String,
    #[serde(rename = "deposit_price")]
    pub deposit: String,
    #[serde(rename = "gratuity_price")]
    pub key_money: String,
    #[serde(
        rename = "url",
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub detail_url: Option<String>,
}

/// Persisted record of a listing that was already reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IgnoredListingKey {
    pub name: String,
    pub address: String,
}

// Older caches were written with `null` for empty lists.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// ...and "" for a missing thumbnail or url.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|s| !s.is_empty()))
}
