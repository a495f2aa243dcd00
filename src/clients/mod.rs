/// NASA API client
use crate::config::AppConfig;
use crate::domain::{Apod, EpicImage, Manifest, ManifestEnvelope, PhotosEnvelope, RoverName, RoverPhoto};
use crate::errors::ApiResult;
use crate::utils::format_calendar_date;
use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use tracing::debug;

/// Client for APOD, EPIC and the Mars rover photo endpoints
pub struct NasaClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl NasaClient {
    pub fn new(config: &AppConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .user_agent("nasa-viewer/0.1")
            .build()?;
        Ok(Self {
            client,
            base_url: config.nasa_api_url.trim_end_matches('/').to_string(),
            api_key: config.nasa_api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "NASA API request");
        let req = self.client.get(url);
        if self.api_key.is_empty() {
            req
        } else {
            req.query(&[("api_key", &self.api_key)])
        }
    }

    /// Fetch Astronomy Picture of the Day, today's when `date` is `None`
    pub async fn fetch_apod(&self, date: Option<NaiveDate>) -> ApiResult<Apod> {
        let mut req = self.get("/planetary/apod").query(&[("thumbs", "true")]);
        if let Some(date) = date {
            req = req.query(&[("date", format_calendar_date(date))]);
        }
        let apod = req.send().await?.error_for_status()?.json().await?;
        Ok(apod)
    }

    /// Fetch metadata of the most recent EPIC natural-color images
    pub async fn fetch_epic_natural(&self) -> ApiResult<Vec<EpicImage>> {
        let images = self
            .get("/EPIC/api/natural")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(images)
    }

    /// Fetch the photo manifest of a rover
    pub async fn fetch_manifest(&self, rover: RoverName) -> ApiResult<Manifest> {
        let envelope: ManifestEnvelope = self
            .get(&format!("/mars-photos/api/v1/manifests/{}", rover.slug()))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope.photo_manifest)
    }

    /// Fetch the photos a rover took on an earth date
    pub async fn fetch_rover_photos(
        &self,
        rover: RoverName,
        date: NaiveDate,
    ) -> ApiResult<Vec<RoverPhoto>> {
        let envelope: PhotosEnvelope = self
            .get(&format!("/mars-photos/api/v1/rovers/{}/photos", rover.slug()))
            .query(&[("earth_date", format_calendar_date(date))])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope.photos)
    }
}
