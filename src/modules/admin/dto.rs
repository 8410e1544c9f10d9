use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::modules::catalog::dto::MovieCard;
use crate::modules::catalog::model::{Episode, MovieRow};

pub const MOVIE_REQUIRED: &str = "Title and synopsis are required.";
pub const EPISODE_REQUIRED: &str = "Episode title and video URL are required.";

/// HTML checkboxes submit "1"/"on" when ticked and nothing otherwise.
fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(matches!(
        raw.as_deref().map(str::trim),
        Some("1" | "on" | "true" | "yes")
    ))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct MovieForm {
    #[validate(length(min = 1, message = "Title and synopsis are required."))]
    pub title: String,
    #[validate(length(min = 1, message = "Title and synopsis are required."))]
    pub synopsis: String,
    pub year: String,
    pub rating: String,
    pub maturity_badge: String,
    pub runtime: String,
    pub spotlight_title: String,
    pub spotlight_tagline: String,
    pub thumbnail_url: String,
    pub hero_url: String,
    pub background_url: String,
    pub trailer_url: String,
    pub video_url: String,
    pub categories: String,
    #[serde(deserialize_with = "checkbox")]
    pub is_series: bool,
}

impl MovieForm {
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.title,
            &mut self.synopsis,
            &mut self.year,
            &mut self.rating,
            &mut self.maturity_badge,
            &mut self.runtime,
            &mut self.spotlight_title,
            &mut self.spotlight_tagline,
            &mut self.thumbnail_url,
            &mut self.hero_url,
            &mut self.background_url,
            &mut self.trailer_url,
            &mut self.video_url,
            &mut self.categories,
        ] {
            *field = field.trim().to_string();
        }
        self
    }
}

impl From<&MovieRow> for MovieForm {
    fn from(row: &MovieRow) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        Self {
            title: row.title.clone(),
            synopsis: row.synopsis.clone(),
            year: row.year.to_string(),
            rating: text(&row.rating),
            maturity_badge: text(&row.maturity_badge),
            runtime: text(&row.runtime),
            spotlight_title: text(&row.spotlight_title),
            spotlight_tagline: text(&row.spotlight_tagline),
            thumbnail_url: text(&row.thumbnail_url),
            hero_url: text(&row.hero_url),
            background_url: text(&row.background_url),
            trailer_url: text(&row.trailer_url),
            video_url: text(&row.video_url),
            categories: text(&row.categories),
            is_series: row.is_series,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct EpisodeForm {
    pub season_number: String,
    pub episode_number: String,
    #[validate(length(min = 1, message = "Episode title and video URL are required."))]
    pub title: String,
    pub synopsis: String,
    pub runtime: String,
    #[validate(length(min = 1, message = "Episode title and video URL are required."))]
    pub video_url: String,
}

impl EpisodeForm {
    pub fn blank() -> Self {
        Self {
            season_number: "1".to_string(),
            episode_number: "1".to_string(),
            ..Default::default()
        }
    }

    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.season_number,
            &mut self.episode_number,
            &mut self.title,
            &mut self.synopsis,
            &mut self.runtime,
            &mut self.video_url,
        ] {
            *field = field.trim().to_string();
        }
        self
    }
}

impl From<&Episode> for EpisodeForm {
    fn from(ep: &Episode) -> Self {
        Self {
            season_number: ep.season_number.to_string(),
            episode_number: ep.episode_number.to_string(),
            title: ep.title.clone(),
            synopsis: ep.synopsis.clone().unwrap_or_default(),
            runtime: ep.runtime.clone().unwrap_or_default(),
            video_url: ep.video_url.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EpisodeListQuery {
    pub setup: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EpisodeManager {
    pub movie: MovieCard,
    pub episodes: Vec<Episode>,
    /// Set right after a series is created and still has no episodes.
    pub setup: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EpisodeFormPage {
    pub movie: MovieCard,
    pub form: EpisodeForm,
}
