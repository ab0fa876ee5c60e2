use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const NOT_MENTIONED: &str = "Not mentioned";

/// Snapshot of a listing as supplied by the property data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: String,
    #[serde(rename = "type", default)]
    pub property_type: String,
    pub price: f64,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub beds: Option<u32>,
    #[serde(default)]
    pub furnishing: Option<String>,
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl PropertyRecord {
    pub fn new(id: impl Into<String>, property_type: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            property_type: property_type.into(),
            price,
            state: None,
            city: None,
            beds: None,
            furnishing: None,
            size: None,
            amenities: Vec::new(),
            created_at: None,
        }
    }

    pub fn with_location(mut self, state: impl Into<String>, city: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self.city = Some(city.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_beds(mut self, beds: u32) -> Self {
        self.beds = Some(beds);
        self
    }

    pub fn with_furnishing(mut self, furnishing: impl Into<String>) -> Self {
        self.furnishing = Some(furnishing.into());
        self
    }

    pub fn with_amenities<I, S>(mut self, amenities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.amenities = amenities.into_iter().map(Into::into).collect();
        self
    }

    pub fn state_value(&self) -> Option<&str> {
        non_blank(self.state.as_deref())
    }

    pub fn city_value(&self) -> Option<&str> {
        non_blank(self.city.as_deref())
    }

    /// Raw furnishing text, or the "Not mentioned" bucket label when blank.
    pub fn furnishing_label(&self) -> &str {
        non_blank(self.furnishing.as_deref()).unwrap_or(NOT_MENTIONED)
    }

    pub fn has_amenity(&self, amenity: &str) -> bool {
        self.amenities
            .iter()
            .any(|candidate| candidate.trim().eq_ignore_ascii_case(amenity.trim()))
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.trim().is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FurnishingBucket {
    FullyFurnished,
    PartlyFurnished,
    Unfurnished,
    NotMentioned,
}

impl FurnishingBucket {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::FullyFurnished,
            Self::PartlyFurnished,
            Self::Unfurnished,
            Self::NotMentioned,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::FullyFurnished => "Fully furnished",
            Self::PartlyFurnished => "Partly furnished",
            Self::Unfurnished => "Unfurnished",
            Self::NotMentioned => NOT_MENTIONED,
        }
    }

    /// Free-form furnishing text that matches none of the fixed labels has no bucket.
    pub fn from_raw(raw: Option<&str>) -> Option<Self> {
        let Some(value) = non_blank(raw) else {
            return Some(Self::NotMentioned);
        };

        Self::ordered()
            .into_iter()
            .find(|bucket| bucket.label().eq_ignore_ascii_case(value.trim()))
    }
}
