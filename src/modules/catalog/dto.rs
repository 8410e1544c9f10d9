use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::model::{parse_categories, Episode, Movie, MovieRow};

/// Display fields of a title for listing rails; never carries playback URLs.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MovieCard {
    pub id: i64,
    pub title: String,
    pub synopsis: String,
    pub year: i64,
    pub rating: Option<String>,
    pub maturity_badge: Option<String>,
    pub runtime: Option<String>,
    pub spotlight_title: Option<String>,
    pub spotlight_tagline: Option<String>,
    pub thumbnail_url: Option<String>,
    pub hero_url: Option<String>,
    pub background_url: Option<String>,
    pub trailer_url: Option<String>,
    pub categories: Vec<String>,
    pub is_series: bool,
}

impl From<MovieRow> for MovieCard {
    fn from(row: MovieRow) -> Self {
        Self {
            id: row.id,
            categories: parse_categories(row.categories.as_deref()),
            title: row.title,
            synopsis: row.synopsis,
            year: row.year,
            rating: row.rating,
            maturity_badge: row.maturity_badge,
            runtime: row.runtime,
            spotlight_title: row.spotlight_title,
            spotlight_tagline: row.spotlight_tagline,
            thumbnail_url: row.thumbnail_url,
            hero_url: row.hero_url,
            background_url: row.background_url,
            trailer_url: row.trailer_url,
            is_series: row.is_series,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategorySection {
    pub name: String,
    pub movies: Vec<MovieCard>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HomePage {
    pub spotlight: Option<MovieCard>,
    pub new_releases: Vec<MovieCard>,
    pub trending: Vec<MovieCard>,
    pub categories: Vec<CategorySection>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SeasonGroup {
    pub season_number: i64,
    pub episodes: Vec<Episode>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MovieDetail {
    pub movie: Movie,
    pub primary_video_url: Option<String>,
    pub seasons: Vec<SeasonGroup>,
    pub related: Vec<MovieCard>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResults {
    pub query: String,
    pub results: Vec<MovieCard>,
}
