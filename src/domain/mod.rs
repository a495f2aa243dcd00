/// Domain models for the application
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Mars rovers with a photo manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoverName {
    Curiosity,
    Opportunity,
    Spirit,
    Perseverance,
}

impl RoverName {
    pub const ALL: [RoverName; 4] = [
        RoverName::Curiosity,
        RoverName::Opportunity,
        RoverName::Spirit,
        RoverName::Perseverance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoverName::Curiosity => "Curiosity",
            RoverName::Opportunity => "Opportunity",
            RoverName::Spirit => "Spirit",
            RoverName::Perseverance => "Perseverance",
        }
    }

    /// Path segment used by the mars-photos API
    pub fn slug(&self) -> &'static str {
        match self {
            RoverName::Curiosity => "curiosity",
            RoverName::Opportunity => "opportunity",
            RoverName::Spirit => "spirit",
            RoverName::Perseverance => "perseverance",
        }
    }

    /// Number of most recent manifest entries that are not yet usable.
    pub fn cutoff_window(&self) -> usize {
        match self {
            RoverName::Curiosity => 1,
            RoverName::Spirit => 17,
            _ => 5,
        }
    }
}

impl fmt::Display for RoverName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoverName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoverName::ALL
            .iter()
            .copied()
            .find(|r| r.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| s.to_string())
    }
}

/// One sol with recorded imagery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestSol {
    pub sol: u32,
    pub earth_date: NaiveDate,
    #[serde(default)]
    pub total_photos: u64,
    #[serde(default)]
    pub cameras: Vec<String>,
}

/// Rover photo manifest, ordered ascending by sol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: RoverName,
    #[serde(default)]
    pub landing_site: Option<String>,
    pub launch_date: NaiveDate,
    pub landing_date: NaiveDate,
    pub status: String,
    #[serde(default)]
    pub max_sol: Option<u32>,
    #[serde(default)]
    pub max_date: Option<NaiveDate>,
    pub total_photos: u64,
    pub photos: Vec<ManifestSol>,
}

/// Wire shape of the manifest endpoint
#[derive(Debug, Deserialize)]
pub struct ManifestEnvelope {
    pub photo_manifest: Manifest,
}

/// Date range and gaps derived from a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoverAvailability {
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
    pub disabled_dates: BTreeSet<NaiveDate>,
    pub completed_date: NaiveDate,
    pub start_date: NaiveDate,
}

impl RoverAvailability {
    pub fn is_selectable(&self, date: NaiveDate) -> bool {
        date >= self.min_date && date <= self.max_date && !self.disabled_dates.contains(&date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
    #[serde(other)]
    Other,
}

/// Astronomy Picture of the Day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Apod {
    pub date: NaiveDate,
    pub title: String,
    pub explanation: String,
    pub url: String,
    #[serde(default)]
    pub hdurl: Option<String>,
    pub media_type: MediaType,
    #[serde(default)]
    pub copyright: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// EPIC natural-color image metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpicImage {
    pub identifier: String,
    #[serde(default)]
    pub caption: String,
    pub image: String,
    pub date: String,
    #[serde(default)]
    pub centroid_coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    pub name: String,
    pub full_name: String,
}

/// Single rover photo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoverPhoto {
    pub id: u64,
    pub sol: u32,
    pub camera: Camera,
    pub img_src: String,
    pub earth_date: NaiveDate,
}

/// Wire shape of the rover photos endpoint
#[derive(Debug, Deserialize)]
pub struct PhotosEnvelope {
    pub photos: Vec<RoverPhoto>,
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}
