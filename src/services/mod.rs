/// Imagery flows driven through the view state reducer
use crate::availability::compute_availability;
use crate::clients::NasaClient;
use crate::domain::{Manifest, RoverAvailability, RoverName};
use crate::errors::{ApiError, ApiResult};
use crate::state::{reduce, Action, ApodView, EpicView, RoverView, Section, ViewState};
use crate::utils::{epic_image_url, parse_epic_timestamp};
use chrono::NaiveDate;
use tracing::{info, warn};

pub struct ImageryService {
    client: NasaClient,
}

impl ImageryService {
    pub fn new(client: NasaClient) -> Self {
        Self { client }
    }

    /// Astronomy Picture of the Day for `date`, today's when absent
    pub async fn apod(&self, date: Option<NaiveDate>) -> ApiResult<ApodView> {
        let state = reduce(ViewState::default(), Action::Navigate(Section::Apod));
        let apod = self.client.fetch_apod(date).await?;
        info!(date = %apod.date, title = %apod.title, "APOD loaded");
        Ok(reduce(state, Action::ApodLoaded(apod)).apod_view())
    }

    /// Latest EPIC natural-color images with their archive URLs
    pub async fn epic(&self) -> ApiResult<EpicView> {
        let state = reduce(ViewState::default(), Action::Navigate(Section::Epic));
        let images = self.client.fetch_epic_natural().await?;
        info!(count = images.len(), "EPIC images loaded");
        let state = reduce(state, Action::EpicLoaded(images));

        let base_url = self.client.base_url();
        let api_key = self.client.api_key();
        Ok(state.epic_view(|image| match parse_epic_timestamp(&image.date) {
            Some(taken) => Some(epic_image_url(
                base_url,
                &image.image,
                taken.date_naive(),
                api_key,
            )),
            None => {
                warn!(image = %image.image, date = %image.date, "unparsable EPIC timestamp");
                None
            }
        }))
    }

    /// Manifest of a rover together with its availability
    pub async fn rover_manifest(&self, rover: RoverName) -> ApiResult<(Manifest, RoverAvailability)> {
        let manifest = self.client.fetch_manifest(rover).await?;
        let availability = compute_availability(&manifest)?;
        info!(
            rover = %rover,
            min_date = %availability.min_date,
            max_date = %availability.max_date,
            disabled = availability.disabled_dates.len(),
            "rover manifest loaded"
        );
        Ok((manifest, availability))
    }

    /// Photos of a rover for `date`, or for its default date when absent
    pub async fn rover_view(&self, rover: RoverName, date: Option<NaiveDate>) -> ApiResult<RoverView> {
        let state = reduce(ViewState::default(), Action::SelectRover(rover));
        let (manifest, _) = self.rover_manifest(rover).await?;
        let mut state = reduce(state, Action::ManifestLoaded(manifest));

        if let Some(date) = date {
            state = reduce(state, Action::SelectDate(date));
        }

        let selected = state
            .selected_date
            .ok_or_else(|| ApiError::Internal(format!("no date selected for {}", rover)))?;

        let state = match self.client.fetch_rover_photos(rover, selected).await {
            Ok(photos) => {
                info!(rover = %rover, date = %selected, count = photos.len(), "rover photos loaded");
                reduce(
                    state,
                    Action::PhotosLoaded {
                        date: selected,
                        photos,
                    },
                )
            }
            Err(e) => {
                warn!(rover = %rover, date = %selected, error = %e, "rover photos fetch failed");
                reduce(state, Action::Failed(e.to_string()))
            }
        };

        Ok(state.rover_view())
    }
}
