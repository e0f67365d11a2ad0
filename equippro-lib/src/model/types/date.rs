//! Calendar dates as exchanged with the backend

use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

/// A calendar date from the API.
///
/// The backend serializes dates as `[year, month, day]` arrays and accepts
/// `YYYY-MM-DD` strings on writes. Both forms are accepted when reading.
///
/// # Example
///
/// ```
/// use equippro_lib::model::types::ApiDate;
///
/// let date: ApiDate = serde_json::from_str("[2024, 5, 1]").unwrap();
/// assert_eq!(date.to_string(), "2024-05-01");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiDate(pub NaiveDate);

impl ApiDate {
    /// Creates a date from its parts, if valid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Returns the inner date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for ApiDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for ApiDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl Serialize for ApiDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ApiDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PartsOrText {
            Parts(Vec<i64>),
            Text(String),
        }

        match PartsOrText::deserialize(deserializer)? {
            PartsOrText::Parts(parts) => {
                let [year, month, day] = parts[..] else {
                    return Err(D::Error::custom(format!(
                        "expected [year, month, day], got {} parts",
                        parts.len()
                    )));
                };
                i32::try_from(year)
                    .ok()
                    .zip(u32::try_from(month).ok())
                    .zip(u32::try_from(day).ok())
                    .and_then(|((y, m), d)| ApiDate::from_ymd(y, m, d))
                    .ok_or_else(|| {
                        D::Error::custom(format!("invalid date [{}, {}, {}]", year, month, day))
                    })
            }
            PartsOrText::Text(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d")
                .map(ApiDate)
                .map_err(|_| D::Error::custom(format!("invalid date value: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_array_and_string() {
        let a: ApiDate = serde_json::from_str("[2023, 12, 31]").unwrap();
        let b: ApiDate = serde_json::from_str("\"2023-12-31\"").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "2023-12-31");
    }

    #[test]
    fn test_rejects_invalid_dates() {
        assert!(serde_json::from_str::<ApiDate>("[2023, 13, 1]").is_err());
        assert!(serde_json::from_str::<ApiDate>("[2023, 1]").is_err());
        assert!(serde_json::from_str::<ApiDate>("\"yesterday\"").is_err());
    }

    #[test]
    fn test_serializes_as_iso_string() {
        let date = ApiDate::from_ymd(2024, 2, 29).unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2024-02-29\"");
    }
}
