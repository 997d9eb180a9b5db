use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Serialize;

/// Presentation tag of a rendered card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Primary,
    Clicked,
    Neighbour,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Clicked => "clicked",
            Self::Neighbour => "neighbour",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Primary => "Primary",
            Self::Clicked => "Clicked",
            Self::Neighbour => "Neighbour",
        }
    }

    /// Primary and clicked cards head a resolution cycle.
    pub const fn is_lead(self) -> bool {
        matches!(self, Self::Primary | Self::Clicked)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Returns `None` when either value is outside the valid degree range.
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let valid = (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude);
        valid.then_some(Self {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// One country as returned by the restcountries v3.1 service.
///
/// Only the lookup keys are required. Every other field tolerates `null`,
/// a missing key or an unexpected shape.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CountryRecord {
    pub cca3: String,
    pub name: CountryName,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub population: Option<u64>,
    #[serde(default, deserialize_with = "ordered_entries")]
    pub languages: Vec<(String, String)>,
    #[serde(default, deserialize_with = "ordered_entries")]
    pub currencies: Vec<(String, Currency)>,
    #[serde(default)]
    pub flags: Option<Flags>,
    #[serde(default)]
    pub flag: Option<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub borders: Vec<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct CountryName {
    pub common: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Currency {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Flags {
    #[serde(default)]
    pub png: Option<String>,
    #[serde(default)]
    pub svg: Option<String>,
}

/// Payload of the reverse geocoding service.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseGeocode {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country_name: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

impl ReverseGeocode {
    pub fn country_code(&self) -> Option<&str> {
        self.country_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
    }

    pub fn describe(&self) -> String {
        let city = self.city.as_deref().filter(|c| !c.is_empty());
        let country = self.country_name.as_deref().filter(|c| !c.is_empty());
        match (city, country) {
            (Some(city), Some(country)) => format!("You are in {city}, {country}"),
            (None, Some(country)) => format!("You are in {country}"),
            (Some(city), None) => format!("You are in {city}"),
            (None, None) => "You are somewhere".to_string(),
        }
    }
}

/// A list where `null` reads as empty.
fn nullable_list<'de, D, V>(deserializer: D) -> Result<Vec<V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    Ok(Option::<Vec<V>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A non-negative count sent as an integer or a float. Anything else,
/// including negative or non-finite numbers, reads as unknown.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Count {
        Whole(u64),
        Fractional(f64),
        Other(IgnoredAny),
    }

    Ok(match Count::deserialize(deserializer)? {
        Count::Whole(count) => Some(count),
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Count::Fractional(count) if count.is_finite() && count >= 0.0 => {
            Some(count.round() as u64)
        }
        Count::Fractional(_) | Count::Other(_) => None,
    })
}

/// Keeps the key order of a JSON object, `null` reads as empty.
fn ordered_entries<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    struct Entries<V>(Vec<(String, V)>);

    struct EntriesVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
        type Value = Entries<V>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, V>()? {
                entries.push(entry);
            }
            Ok(Entries(entries))
        }
    }

    impl<'de, V: Deserialize<'de>> Deserialize<'de> for Entries<V> {
        fn deserialize<D2: Deserializer<'de>>(deserializer: D2) -> Result<Self, D2::Error> {
            deserializer.deserialize_map(EntriesVisitor(PhantomData))
        }
    }

    let entries = Option::<Entries<V>>::deserialize(deserializer)?;
    Ok(entries.map(|e| e.0).unwrap_or_default())
}
