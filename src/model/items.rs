use serde::{Deserialize, Deserializer, Serialize};

/// Ratings closer than this are equal.
pub const RATING_TOLERANCE: f64 = std::f64::consts::E;

/// Equality used when comparing a served item against its reference record.
pub trait ContentEq {
    fn content_eq(&self, reference: &Self) -> bool;
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MediaItem {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub duration: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub countries: Vec<String>,
    pub age_value: i64,
    pub year: String,
    pub logo: String,
    pub rating: f64,
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub persons: Vec<Person>,
    #[serde(deserialize_with = "null_as_default")]
    pub packages: Vec<i64>,
    #[serde(deserialize_with = "null_as_default")]
    pub asset_types: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Person {
    pub name: String,
    #[serde(rename = "type")]
    pub role: String,
}

// Persons are not part of the served contract and are skipped.
impl ContentEq for MediaItem {
    fn content_eq(&self, reference: &Self) -> bool {
        self.id == reference.id
            && self.name == reference.name
            && self.item_type == reference.item_type
            && self.duration == reference.duration
            && self.countries == reference.countries
            && self.age_value == reference.age_value
            && self.year == reference.year
            && self.logo == reference.logo
            && rating_eq(self.rating, reference.rating)
            && self.description == reference.description
            && self.genres == reference.genres
            && self.packages == reference.packages
            && self.asset_types == reference.asset_types
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EpgItem {
    pub id: i64,
    pub name: String,
    pub age_value: i64,
    pub start_time: i64,
    pub end_time: i64,
    pub genre: String,
    pub description: String,
    pub logo: String,
    pub channel: ChannelInfo,
    pub location_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChannelInfo {
    pub id: i64,
    pub name: String,
    pub logo: String,
}

impl ContentEq for EpgItem {
    fn content_eq(&self, reference: &Self) -> bool {
        self.id == reference.id
            && self.name == reference.name
            && self.age_value == reference.age_value
            && self.start_time == reference.start_time
            && self.end_time == reference.end_time
            && self.genre == reference.genre
            && self.description == reference.description
            && self.logo == reference.logo
            && self.channel.id == reference.channel.id
            && self.channel.name == reference.channel.name
            && self.channel.logo == reference.channel.logo
            && self.location_id == reference.location_id
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "rating tolerance is an absolute float difference"
)]
fn rating_eq(served: f64, reference: f64) -> bool {
    (served - reference).abs() < RATING_TOLERANCE
}

/// Treats an explicit JSON `null` the same as a missing field.
pub(super) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
