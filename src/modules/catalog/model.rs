use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use utoipa::ToSchema;

/// Flattened `movies` row exactly as stored.
#[derive(Debug, Clone, FromRow)]
pub struct MovieRow {
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
    pub video_url: Option<String>,
    pub categories: Option<String>,
    pub is_series: bool,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Episode {
    pub id: i64,
    pub movie_id: i64,
    pub season_number: i64,
    pub episode_number: i64,
    pub title: String,
    pub synopsis: Option<String>,
    pub runtime: Option<String>,
    pub video_url: String,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
}

/// How a title is played back.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Format {
    Film {
        video_url: String,
    },
    Series {
        video_url: Option<String>,
        #[serde(skip_serializing)]
        episodes: Vec<Episode>,
    },
}

impl Format {
    pub fn from_columns(is_series: bool, video_url: Option<String>, episodes: Vec<Episode>) -> Self {
        if is_series {
            Format::Series { video_url, episodes }
        } else {
            // The CHECK constraint on `movies` guarantees a film has a URL.
            Format::Film {
                video_url: video_url.unwrap_or_default(),
            }
        }
    }

    /// `(is_series, video_url)` as written to the `movies` row.
    pub fn to_columns(&self) -> (bool, Option<&str>) {
        match self {
            Format::Film { video_url } => (false, Some(video_url.as_str())),
            Format::Series { video_url, .. } => (true, video_url.as_deref()),
        }
    }

    pub fn is_series(&self) -> bool {
        matches!(self, Format::Series { .. })
    }

    /// The URL a viewer actually streams: a film's own file, a series' own
    /// file if it has one, else its earliest episode by season then number.
    pub fn primary_video_url(&self) -> Option<&str> {
        match self {
            Format::Film { video_url } => Some(video_url.as_str()),
            Format::Series { video_url: Some(url), .. } if !url.is_empty() => Some(url.as_str()),
            Format::Series { episodes, .. } => episodes
                .iter()
                .min_by_key(|ep| (ep.season_number, ep.episode_number))
                .map(|ep| ep.video_url.as_str()),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Movie {
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
    pub format: Format,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: OffsetDateTime,
}

impl Movie {
    pub fn from_row(row: MovieRow, episodes: Vec<Episode>) -> Self {
        let categories = parse_categories(row.categories.as_deref());
        Self {
            id: row.id,
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
            categories,
            format: Format::from_columns(row.is_series, row.video_url, episodes),
            created_at: row.created_at,
        }
    }

    pub fn primary_video_url(&self) -> Option<&str> {
        self.format.primary_video_url()
    }
}

/// Validated input for inserting or updating a `movies` row.
#[derive(Debug, Clone)]
pub struct MovieDraft {
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
    pub categories: Option<String>,
    pub format: Format,
}

#[derive(Debug, Clone)]
pub struct EpisodeDraft {
    pub season_number: i64,
    pub episode_number: i64,
    pub title: String,
    pub synopsis: Option<String>,
    pub runtime: Option<String>,
    pub video_url: String,
}

/// Rows removed by a movie delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletedMovie {
    pub episodes: u64,
}

impl DeletedMovie {
    pub fn total_rows(&self) -> u64 {
        self.episodes + 1
    }
}

/// Splits the free-text category string on commas, dropping blank segments.
pub fn parse_categories(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
