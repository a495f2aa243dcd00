/// Application state transitions and view models
use crate::availability::compute_availability;
use crate::domain::{Apod, EpicImage, Manifest, RoverAvailability, RoverName, RoverPhoto};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Apod,
    Epic,
    Rovers,
}

/// Whole viewer state. Only `reduce` produces new values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub section: Section,
    pub apod: Option<Apod>,
    pub epic: Vec<EpicImage>,
    pub rover: Option<RoverName>,
    pub manifest: Option<Manifest>,
    pub availability: Option<RoverAvailability>,
    pub selected_date: Option<NaiveDate>,
    pub photos: Vec<RoverPhoto>,
    pub notice: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Action {
    Navigate(Section),
    ApodLoaded(Apod),
    EpicLoaded(Vec<EpicImage>),
    SelectRover(RoverName),
    ManifestLoaded(Manifest),
    SelectDate(NaiveDate),
    PhotosLoaded {
        date: NaiveDate,
        photos: Vec<RoverPhoto>,
    },
    Failed(String),
}

pub fn reduce(state: ViewState, action: Action) -> ViewState {
    match action {
        Action::Navigate(section) => ViewState { section, ..state },
        Action::ApodLoaded(apod) => ViewState {
            apod: Some(apod),
            error: None,
            ..state
        },
        Action::EpicLoaded(images) => ViewState {
            epic: images,
            error: None,
            ..state
        },
        Action::SelectRover(rover) => ViewState {
            section: Section::Rovers,
            rover: Some(rover),
            manifest: None,
            availability: None,
            selected_date: None,
            photos: Vec::new(),
            notice: None,
            error: None,
            ..state
        },
        Action::ManifestLoaded(manifest) => {
            if state.rover != Some(manifest.name) {
                warn!(rover = %manifest.name, "ignoring manifest for unselected rover");
                return state;
            }
            match compute_availability(&manifest) {
                Ok(availability) => ViewState {
                    selected_date: Some(availability.start_date),
                    availability: Some(availability),
                    manifest: Some(manifest),
                    photos: Vec::new(),
                    error: None,
                    ..state
                },
                Err(e) => ViewState {
                    selected_date: None,
                    availability: None,
                    manifest: Some(manifest),
                    photos: Vec::new(),
                    error: Some(e.to_string()),
                    ..state
                },
            }
        }
        Action::SelectDate(date) => {
            let checked = state
                .availability
                .as_ref()
                .map(|a| (a.start_date, a.is_selectable(date)));
            match checked {
                Some((_, true)) => ViewState {
                    selected_date: Some(date),
                    photos: Vec::new(),
                    notice: None,
                    ..state
                },
                Some((start_date, false)) => ViewState {
                    selected_date: Some(start_date),
                    photos: Vec::new(),
                    notice: Some(format!("no imagery for {}, showing {}", date, start_date)),
                    ..state
                },
                None => ViewState {
                    notice: Some("no rover manifest loaded".to_string()),
                    ..state
                },
            }
        }
        Action::PhotosLoaded { date, photos } => {
            if state.selected_date != Some(date) {
                return state;
            }
            ViewState {
                photos,
                error: None,
                ..state
            }
        }
        Action::Failed(message) => ViewState {
            error: Some(message),
            ..state
        },
    }
}

#[derive(Debug, Serialize)]
pub struct ApodView {
    pub section: Section,
    pub apod: Option<Apod>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EpicImageView {
    #[serde(flatten)]
    pub image: EpicImage,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EpicView {
    pub section: Section,
    pub images: Vec<EpicImageView>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RoverSummary {
    pub name: RoverName,
    pub status: String,
    pub launch_date: NaiveDate,
    pub landing_date: NaiveDate,
    pub total_photos: u64,
}

#[derive(Debug, Serialize)]
pub struct RoverView {
    pub section: Section,
    pub rover: Option<RoverSummary>,
    pub availability: Option<RoverAvailability>,
    pub selected_date: Option<NaiveDate>,
    pub photos: Vec<RoverPhoto>,
    pub notice: Option<String>,
    pub error: Option<String>,
}

impl ViewState {
    pub fn apod_view(&self) -> ApodView {
        ApodView {
            section: self.section,
            apod: self.apod.clone(),
            error: self.error.clone(),
        }
    }

    /// `image_url` maps an EPIC record to its archive URL when its date parses
    pub fn epic_view(&self, image_url: impl Fn(&EpicImage) -> Option<String>) -> EpicView {
        EpicView {
            section: self.section,
            images: self
                .epic
                .iter()
                .map(|image| EpicImageView {
                    image_url: image_url(image),
                    image: image.clone(),
                })
                .collect(),
            error: self.error.clone(),
        }
    }

    pub fn rover_view(&self) -> RoverView {
        RoverView {
            section: self.section,
            rover: self.manifest.as_ref().map(|m| RoverSummary {
                name: m.name,
                status: m.status.clone(),
                launch_date: m.launch_date,
                landing_date: m.landing_date,
                total_photos: m.total_photos,
            }),
            availability: self.availability.clone(),
            selected_date: self.selected_date,
            photos: self.photos.clone(),
            notice: self.notice.clone(),
            error: self.error.clone(),
        }
    }
}
