use super::dto::{EpisodeForm, MovieForm, EPISODE_REQUIRED, MOVIE_REQUIRED};
use crate::common::error::{is_foreign_key_violation, is_unique_violation, AppError, AppResult};
use crate::modules::catalog::dto::MovieCard;
use crate::modules::catalog::model::{DeletedMovie, Episode, EpisodeDraft, Format, MovieDraft, MovieRow};
use crate::modules::catalog::repository::CatalogRepository;
use crate::state::AppState;
use tracing::{info, warn};
use validator::Validate;

pub const FILM_NEEDS_VIDEO: &str = "A film needs a main video URL.";
pub const EPISODES_NEED_SERIES: &str = "Episodes can only be added to a series.";
const TITLE_NOT_FOUND: &str = "Title not found";
const EPISODE_NOT_FOUND: &str = "Episode not found for this title";

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Season and episode numbers fall back to 1 when missing, garbled or below 1.
pub fn parse_slot(raw: &str) -> i64 {
    raw.trim().parse::<i64>().ok().filter(|n| *n >= 1).unwrap_or(1)
}

/// Turns a submitted movie form into a storage draft, or explains which rule
/// it broke. Nothing is written here.
pub fn validate_movie(form: MovieForm) -> AppResult<MovieDraft> {
    let form = form.normalized();
    if form.validate().is_err() {
        return Err(AppError::Validation(MOVIE_REQUIRED.to_string()));
    }

    let video_url = non_blank(&form.video_url);
    let format = if form.is_series {
        Format::Series {
            video_url,
            episodes: Vec::new(),
        }
    } else {
        match video_url {
            Some(video_url) => Format::Film { video_url },
            None => return Err(AppError::Validation(FILM_NEEDS_VIDEO.to_string())),
        }
    };

    Ok(MovieDraft {
        year: form.year.parse::<i64>().unwrap_or(0),
        rating: non_blank(&form.rating),
        maturity_badge: non_blank(&form.maturity_badge),
        runtime: non_blank(&form.runtime),
        spotlight_title: non_blank(&form.spotlight_title),
        spotlight_tagline: non_blank(&form.spotlight_tagline),
        thumbnail_url: non_blank(&form.thumbnail_url),
        hero_url: non_blank(&form.hero_url),
        background_url: non_blank(&form.background_url),
        trailer_url: non_blank(&form.trailer_url),
        categories: non_blank(&form.categories),
        title: form.title,
        synopsis: form.synopsis,
        format,
    })
}

pub fn validate_episode(form: EpisodeForm) -> AppResult<EpisodeDraft> {
    let form = form.normalized();
    if form.validate().is_err() {
        return Err(AppError::Validation(EPISODE_REQUIRED.to_string()));
    }

    Ok(EpisodeDraft {
        season_number: parse_slot(&form.season_number),
        episode_number: parse_slot(&form.episode_number),
        synopsis: non_blank(&form.synopsis),
        runtime: non_blank(&form.runtime),
        title: form.title,
        video_url: form.video_url,
    })
}

fn slot_taken(draft: &EpisodeDraft) -> AppError {
    AppError::Validation(format!(
        "Season {} episode {} already exists for this title.",
        draft.season_number, draft.episode_number
    ))
}

/// Parent lookup for the episode screens, which bounce films elsewhere.
#[derive(Debug)]
pub enum SeriesLookup {
    Series(MovieRow),
    Film(MovieRow),
}

pub struct AdminService;

impl AdminService {
    // --- MOVIES ---

    pub async fn dashboard(state: &AppState) -> AppResult<Vec<MovieCard>> {
        Ok(CatalogRepository::list_movies(&state.db)
            .await?
            .into_iter()
            .map(MovieCard::from)
            .collect())
    }

    pub async fn movie(state: &AppState, id: i64) -> AppResult<MovieRow> {
        CatalogRepository::find_movie(&state.db, id)
            .await?
            .ok_or_else(|| AppError::NotFound(TITLE_NOT_FOUND.to_string()))
    }

    pub async fn create_movie(state: &AppState, form: MovieForm) -> AppResult<MovieRow> {
        let draft = validate_movie(form)?;
        let row = CatalogRepository::insert_movie(&state.db, &draft).await?;
        info!("Created {} {} (id {})", if row.is_series { "series" } else { "film" }, row.title, row.id);
        Ok(row)
    }

    pub async fn update_movie(state: &AppState, id: i64, form: MovieForm) -> AppResult<MovieRow> {
        Self::movie(state, id).await?;
        let draft = validate_movie(form)?;
        let row = CatalogRepository::update_movie(&state.db, id, &draft)
            .await?
            .ok_or_else(|| AppError::NotFound(TITLE_NOT_FOUND.to_string()))?;
        info!("Updated movie {} (id {})", row.title, row.id);
        Ok(row)
    }

    /// A second delete of the same id is reported as not found.
    pub async fn delete_movie(state: &AppState, id: i64) -> AppResult<DeletedMovie> {
        let deleted = CatalogRepository::delete_movie(&state.db, id)
            .await?
            .ok_or_else(|| AppError::NotFound(TITLE_NOT_FOUND.to_string()))?;
        info!("Deleted movie {} and {} episode(s)", id, deleted.episodes);
        Ok(deleted)
    }

    // --- EPISODES ---

    pub async fn series(state: &AppState, movie_id: i64) -> AppResult<SeriesLookup> {
        let row = Self::movie(state, movie_id).await?;
        Ok(if row.is_series {
            SeriesLookup::Series(row)
        } else {
            SeriesLookup::Film(row)
        })
    }

    pub async fn episodes(state: &AppState, movie_id: i64) -> AppResult<Vec<Episode>> {
        Ok(CatalogRepository::list_episodes(&state.db, movie_id).await?)
    }

    /// The episode must belong to `movie_id`; a match under another title is
    /// treated exactly like a missing episode. Returns the parent row with it.
    pub async fn episode(state: &AppState, movie_id: i64, episode_id: i64) -> AppResult<(MovieRow, Episode)> {
        let movie = Self::movie(state, movie_id).await?;
        match CatalogRepository::find_episode(&state.db, episode_id).await? {
            Some(ep) if ep.movie_id == movie_id => Ok((movie, ep)),
            Some(ep) => {
                warn!("Episode {} belongs to movie {}, not {}", ep.id, ep.movie_id, movie_id);
                Err(AppError::NotFound(EPISODE_NOT_FOUND.to_string()))
            }
            None => Err(AppError::NotFound(EPISODE_NOT_FOUND.to_string())),
        }
    }

    pub async fn create_episode(state: &AppState, movie_id: i64, form: EpisodeForm) -> AppResult<Episode> {
        if let SeriesLookup::Film(_) = Self::series(state, movie_id).await? {
            return Err(AppError::Validation(EPISODES_NEED_SERIES.to_string()));
        }
        let draft = validate_episode(form)?;

        let episode = CatalogRepository::insert_episode(&state.db, movie_id, &draft)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    slot_taken(&draft)
                } else if is_foreign_key_violation(&e) {
                    AppError::NotFound(TITLE_NOT_FOUND.to_string())
                } else {
                    AppError::Database(e)
                }
            })?;

        info!(
            "Added S{}E{} to movie {} (episode id {})",
            episode.season_number, episode.episode_number, movie_id, episode.id
        );
        Ok(episode)
    }

    pub async fn update_episode(
        state: &AppState,
        movie_id: i64,
        episode_id: i64,
        form: EpisodeForm,
    ) -> AppResult<Episode> {
        let (movie, _) = Self::episode(state, movie_id, episode_id).await?;
        if !movie.is_series {
            return Err(AppError::Validation(EPISODES_NEED_SERIES.to_string()));
        }
        let draft = validate_episode(form)?;

        CatalogRepository::update_episode(&state.db, movie_id, episode_id, &draft)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    slot_taken(&draft)
                } else {
                    AppError::Database(e)
                }
            })?
            .ok_or_else(|| AppError::NotFound(EPISODE_NOT_FOUND.to_string()))
    }

    pub async fn delete_episode(state: &AppState, movie_id: i64, episode_id: i64) -> AppResult<()> {
        Self::movie(state, movie_id).await?;
        if !CatalogRepository::delete_episode(&state.db, movie_id, episode_id).await? {
            return Err(AppError::NotFound(EPISODE_NOT_FOUND.to_string()));
        }
        info!("Deleted episode {} of movie {}", episode_id, movie_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_app_state;

    fn film_form(title: &str, video_url: &str) -> MovieForm {
        MovieForm {
            title: title.into(),
            synopsis: "Synopsis".into(),
            year: "2020".into(),
            video_url: video_url.into(),
            ..Default::default()
        }
    }

    fn series_form(title: &str) -> MovieForm {
        MovieForm {
            title: title.into(),
            synopsis: "Synopsis".into(),
            is_series: true,
            ..Default::default()
        }
    }

    fn episode_form(season: &str, number: &str, title: &str) -> EpisodeForm {
        EpisodeForm {
            season_number: season.into(),
            episode_number: number.into(),
            title: title.into(),
            video_url: format!("https://cdn.example/{title}.mp4"),
            ..Default::default()
        }
    }

    #[test]
    fn slot_numbers_default_to_one() {
        assert_eq!(parse_slot(""), 1);
        assert_eq!(parse_slot("abc"), 1);
        assert_eq!(parse_slot("0"), 1);
        assert_eq!(parse_slot("-3"), 1);
        assert_eq!(parse_slot(" 4 "), 4);
    }

    #[test]
    fn film_draft_requires_video_but_series_does_not() {
        let err = validate_movie(film_form("Heat", "   ")).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == FILM_NEEDS_VIDEO));

        let draft = validate_movie(series_form("Dark")).unwrap();
        assert!(draft.format.is_series());
    }

    #[test]
    fn blank_optional_fields_become_null_and_bad_year_zero() {
        let mut form = film_form("Heat", "heat.mp4");
        form.year = "nineteen".into();
        form.rating = "  ".into();
        let draft = validate_movie(form).unwrap();
        assert_eq!(draft.year, 0);
        assert_eq!(draft.rating, None);
    }

    #[tokio::test]
    async fn film_without_video_persists_nothing() {
        let state = setup_test_app_state().await;
        let err = AdminService::create_movie(&state, film_form("Heat", "")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(CatalogRepository::count_movies(&state.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn missing_title_or_synopsis_persists_nothing() {
        let state = setup_test_app_state().await;
        let mut form = film_form("  ", "heat.mp4");
        let err = AdminService::create_movie(&state, form.clone()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == MOVIE_REQUIRED));

        form.title = "Heat".into();
        form.synopsis = String::new();
        assert!(AdminService::create_movie(&state, form).await.is_err());
        assert_eq!(CatalogRepository::count_movies(&state.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failed_edit_leaves_the_row_untouched() {
        let state = setup_test_app_state().await;
        let row = AdminService::create_movie(&state, film_form("Heat", "heat.mp4")).await.unwrap();

        let err = AdminService::update_movie(&state, row.id, film_form("Heat 2", "")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let stored = AdminService::movie(&state, row.id).await.unwrap();
        assert_eq!(stored.title, "Heat");
        assert_eq!(stored.video_url.as_deref(), Some("heat.mp4"));
    }

    #[tokio::test]
    async fn editing_a_missing_movie_is_not_found() {
        let state = setup_test_app_state().await;
        let err = AdminService::update_movie(&state, 77, film_form("Heat", "h.mp4")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_episode_surfaces_as_validation_error() {
        let state = setup_test_app_state().await;
        let series = AdminService::create_movie(&state, series_form("Dark")).await.unwrap();
        let first = AdminService::create_episode(&state, series.id, episode_form("1", "1", "Secrets"))
            .await
            .unwrap();

        let err = AdminService::create_episode(&state, series.id, episode_form("1", "1", "Lies"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("Season 1 episode 1")));

        let episodes = AdminService::episodes(&state, series.id).await.unwrap();
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].id, first.id);
        assert_eq!(episodes[0].title, "Secrets");
    }

    #[tokio::test]
    async fn moving_an_episode_onto_a_taken_slot_is_rejected() {
        let state = setup_test_app_state().await;
        let series = AdminService::create_movie(&state, series_form("Dark")).await.unwrap();
        AdminService::create_episode(&state, series.id, episode_form("1", "1", "One")).await.unwrap();
        let two = AdminService::create_episode(&state, series.id, episode_form("1", "2", "Two"))
            .await
            .unwrap();

        let err = AdminService::update_episode(&state, series.id, two.id, episode_form("1", "1", "Two"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let (_, stored) = AdminService::episode(&state, series.id, two.id).await.unwrap();
        assert_eq!(stored.episode_number, 2);
    }

    #[tokio::test]
    async fn episodes_are_refused_for_films() {
        let state = setup_test_app_state().await;
        let film = AdminService::create_movie(&state, film_form("Heat", "heat.mp4")).await.unwrap();
        let err = AdminService::create_episode(&state, film.id, episode_form("1", "1", "Nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == EPISODES_NEED_SERIES));
        assert!(matches!(
            AdminService::series(&state, film.id).await.unwrap(),
            SeriesLookup::Film(_)
        ));
    }

    #[tokio::test]
    async fn episodes_of_a_series_turned_film_cannot_be_edited() {
        let state = setup_test_app_state().await;
        let series = AdminService::create_movie(&state, series_form("Dark")).await.unwrap();
        let ep = AdminService::create_episode(&state, series.id, episode_form("1", "1", "Secrets"))
            .await
            .unwrap();
        AdminService::update_movie(&state, series.id, film_form("Dark", "dark.mp4"))
            .await
            .unwrap();

        let err = AdminService::update_episode(&state, series.id, ep.id, episode_form("2", "3", "Lies"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == EPISODES_NEED_SERIES));
        let (_, stored) = AdminService::episode(&state, series.id, ep.id).await.unwrap();
        assert_eq!((stored.season_number, stored.episode_number), (1, 1));
        assert_eq!(stored.title, "Secrets");
    }

    #[tokio::test]
    async fn episode_needs_title_and_video() {
        let state = setup_test_app_state().await;
        let series = AdminService::create_movie(&state, series_form("Dark")).await.unwrap();
        let mut form = episode_form("1", "1", "Pilot");
        form.video_url = " ".into();
        let err = AdminService::create_episode(&state, series.id, form).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == EPISODE_REQUIRED));
    }

    #[tokio::test]
    async fn delete_movie_cascades_and_second_delete_is_not_found() {
        let state = setup_test_app_state().await;
        let series = AdminService::create_movie(&state, series_form("Dark")).await.unwrap();
        let mut episode_ids = Vec::new();
        for n in ["1", "2"] {
            let ep = AdminService::create_episode(&state, series.id, episode_form("1", n, "Ep"))
                .await
                .unwrap();
            episode_ids.push(ep.id);
        }

        let deleted = AdminService::delete_movie(&state, series.id).await.unwrap();
        assert_eq!(deleted.total_rows(), 3);
        for id in episode_ids {
            assert!(CatalogRepository::find_episode(&state.db, id).await.unwrap().is_none());
        }
        let again = AdminService::delete_movie(&state, series.id).await.unwrap_err();
        assert!(matches!(again, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn episode_cannot_be_deleted_through_another_title() {
        let state = setup_test_app_state().await;
        let owner = AdminService::create_movie(&state, series_form("Owner")).await.unwrap();
        let other = AdminService::create_movie(&state, series_form("Other")).await.unwrap();
        let ep = AdminService::create_episode(&state, owner.id, episode_form("1", "1", "Pilot"))
            .await
            .unwrap();

        let err = AdminService::delete_episode(&state, other.id, ep.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        let err = AdminService::episode(&state, other.id, ep.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(CatalogRepository::find_episode(&state.db, ep.id).await.unwrap().is_some());

        AdminService::delete_episode(&state, owner.id, ep.id).await.unwrap();
        assert!(CatalogRepository::find_episode(&state.db, ep.id).await.unwrap().is_none());
    }
}
