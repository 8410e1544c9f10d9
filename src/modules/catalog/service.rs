use super::dto::{CategorySection, HomePage, MovieCard, MovieDetail, SearchResults, SeasonGroup};
use super::model::{Episode, Movie, MovieRow};
use super::repository::CatalogRepository;
use crate::common::error::{AppError, AppResult};
use crate::state::AppState;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

pub const RAIL_SIZE: i64 = 8;
pub const RELATED_SIZE: i64 = 6;

pub struct CatalogService;

impl CatalogService {
    pub async fn home(state: &AppState) -> AppResult<HomePage> {
        let new_releases: Vec<MovieCard> = CatalogRepository::latest(&state.db, RAIL_SIZE)
            .await?
            .into_iter()
            .map(MovieCard::from)
            .collect();
        let trending = CatalogRepository::top_rated(&state.db, RAIL_SIZE)
            .await?
            .into_iter()
            .map(MovieCard::from)
            .collect();

        Ok(HomePage {
            spotlight: new_releases.first().cloned(),
            new_releases,
            trending,
            categories: Self::categories(state).await?,
        })
    }

    pub async fn detail(state: &AppState, id: i64) -> AppResult<MovieDetail> {
        let row = CatalogRepository::find_movie(&state.db, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Title not found".to_string()))?;

        let episodes = if row.is_series {
            CatalogRepository::list_episodes(&state.db, row.id).await?
        } else {
            Vec::new()
        };
        let seasons = group_by_season(&episodes);
        let related = CatalogRepository::related(&state.db, row.id, RELATED_SIZE)
            .await?
            .into_iter()
            .map(MovieCard::from)
            .collect();

        let movie = Movie::from_row(row, episodes);
        debug!("Assembled detail for movie {} ({} seasons)", movie.id, seasons.len());

        Ok(MovieDetail {
            primary_video_url: movie.primary_video_url().map(str::to_string),
            movie,
            seasons,
            related,
        })
    }

    /// A blank query returns nothing rather than the whole catalog.
    pub async fn search(state: &AppState, query: &str) -> AppResult<SearchResults> {
        let query = query.trim();
        let results = if query.is_empty() {
            Vec::new()
        } else {
            CatalogRepository::search_titles(&state.db, query)
                .await?
                .into_iter()
                .map(MovieCard::from)
                .collect()
        };

        Ok(SearchResults {
            query: query.to_string(),
            results,
        })
    }

    pub async fn categories(state: &AppState) -> AppResult<Vec<CategorySection>> {
        let rows = CatalogRepository::list_movies(&state.db).await?;
        Ok(group_by_category(rows))
    }
}

/// Buckets movies under every tag they carry. Sections appear in first-seen
/// order and keep the input order inside each section.
pub fn group_by_category(rows: Vec<MovieRow>) -> Vec<CategorySection> {
    let mut sections: Vec<CategorySection> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for card in rows.into_iter().map(MovieCard::from) {
        for tag in &card.categories {
            let slot = *index.entry(tag.clone()).or_insert_with(|| {
                sections.push(CategorySection {
                    name: tag.clone(),
                    movies: Vec::new(),
                });
                sections.len() - 1
            });
            sections[slot].movies.push(card.clone());
        }
    }

    sections
}

/// Seasons ascending, episodes ascending within each season.
pub fn group_by_season(episodes: &[Episode]) -> Vec<SeasonGroup> {
    let mut seasons: BTreeMap<i64, Vec<Episode>> = BTreeMap::new();
    for episode in episodes {
        seasons.entry(episode.season_number).or_default().push(episode.clone());
    }

    seasons
        .into_iter()
        .map(|(season_number, mut episodes)| {
            episodes.sort_by_key(|ep| ep.episode_number);
            SeasonGroup {
                season_number,
                episodes,
            }
        })
        .collect()
}
