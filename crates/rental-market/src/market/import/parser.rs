use super::super::domain::PropertyRecord;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug, Deserialize)]
pub(crate) struct ListingRow {
    id: String,
    #[serde(rename = "type", default)]
    property_type: String,
    price: f64,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    state: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    city: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    beds: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    furnishing: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    size: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    amenities: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
}

impl ListingRow {
    pub(crate) fn price(&self) -> f64 {
        self.price
    }

    pub(crate) fn id(&self) -> &str {
        &self.id
    }

    pub(crate) fn into_record(self) -> PropertyRecord {
        let beds = self.beds.as_deref().and_then(parse_count);
        let size = self
            .size
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|size| size.is_finite() && *size > 0.0);
        let amenities = self
            .amenities
            .as_deref()
            .map(split_amenities)
            .unwrap_or_default();
        let created_at = self.created_at.as_deref().and_then(parse_timestamp);

        PropertyRecord {
            id: self.id,
            property_type: self.property_type,
            price: self.price,
            state: self.state,
            city: self.city,
            beds,
            furnishing: self.furnishing,
            size,
            amenities,
            created_at,
        }
    }
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ListingRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader.deserialize::<ListingRow>().collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_count(value: &str) -> Option<u32> {
    let trimmed = value.trim();
    if let Ok(count) = trimmed.parse::<u32>() {
        return Some(count);
    }

    // Exports sometimes render counts as floats ("3.0").
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|count| {
            count.is_finite()
                && *count >= 0.0
                && *count <= f64::from(u32::MAX)
                && count.fract() == 0.0
        })
        .map(|count| count as u32)
}

fn split_amenities(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|amenity| !amenity.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    None
}

#[cfg(test)]
pub(crate) fn parse_timestamp_for_tests(value: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(value)
}

#[cfg(test)]
pub(crate) fn parse_count_for_tests(value: &str) -> Option<u32> {
    parse_count(value)
}
