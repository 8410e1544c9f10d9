use super::model::{DeletedMovie, Episode, EpisodeDraft, MovieDraft, MovieRow};
use crate::infrastructure::db::pool::DbPool;
use time::OffsetDateTime;

const MOVIE_COLUMNS: &str = "id, title, synopsis, year, rating, maturity_badge, runtime, \
    spotlight_title, spotlight_tagline, thumbnail_url, hero_url, background_url, trailer_url, \
    video_url, categories, is_series, created_at";

const EPISODE_COLUMNS: &str =
    "id, movie_id, season_number, episode_number, title, synopsis, runtime, video_url, created_at";

/// Storage for movies and their episodes.
///
/// "Newest first" orders by `id`: ids come from AUTOINCREMENT and are handed
/// out in insertion order, so they follow `created_at` without depending on
/// how the timestamp text sorts.
pub struct CatalogRepository;

impl CatalogRepository {
    // --- MOVIE ---

    pub async fn insert_movie(pool: &DbPool, draft: &MovieDraft) -> Result<MovieRow, sqlx::Error> {
        let (is_series, video_url) = draft.format.to_columns();
        let sql = format!(
            r#"
            INSERT INTO movies (
                title, synopsis, year, rating, maturity_badge, runtime,
                spotlight_title, spotlight_tagline, thumbnail_url, hero_url,
                background_url, trailer_url, video_url, categories, is_series, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {MOVIE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, MovieRow>(&sql)
            .bind(&draft.title)
            .bind(&draft.synopsis)
            .bind(draft.year)
            .bind(&draft.rating)
            .bind(&draft.maturity_badge)
            .bind(&draft.runtime)
            .bind(&draft.spotlight_title)
            .bind(&draft.spotlight_tagline)
            .bind(&draft.thumbnail_url)
            .bind(&draft.hero_url)
            .bind(&draft.background_url)
            .bind(&draft.trailer_url)
            .bind(video_url)
            .bind(&draft.categories)
            .bind(is_series)
            .bind(OffsetDateTime::now_utc())
            .fetch_one(pool)
            .await
    }

    /// `None` when no movie has this id.
    pub async fn update_movie(
        pool: &DbPool,
        id: i64,
        draft: &MovieDraft,
    ) -> Result<Option<MovieRow>, sqlx::Error> {
        let (is_series, video_url) = draft.format.to_columns();
        let sql = format!(
            r#"
            UPDATE movies
            SET
                title = ?, synopsis = ?, year = ?, rating = ?, maturity_badge = ?, runtime = ?,
                spotlight_title = ?, spotlight_tagline = ?, thumbnail_url = ?, hero_url = ?,
                background_url = ?, trailer_url = ?, video_url = ?, categories = ?, is_series = ?
            WHERE id = ?
            RETURNING {MOVIE_COLUMNS}
            "#
        );

        sqlx::query_as::<_, MovieRow>(&sql)
            .bind(&draft.title)
            .bind(&draft.synopsis)
            .bind(draft.year)
            .bind(&draft.rating)
            .bind(&draft.maturity_badge)
            .bind(&draft.runtime)
            .bind(&draft.spotlight_title)
            .bind(&draft.spotlight_tagline)
            .bind(&draft.thumbnail_url)
            .bind(&draft.hero_url)
            .bind(&draft.background_url)
            .bind(&draft.trailer_url)
            .bind(video_url)
            .bind(&draft.categories)
            .bind(is_series)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Removes the movie and its episodes in one transaction. `None` when the
    /// movie does not exist, in which case nothing is touched.
    pub async fn delete_movie(pool: &DbPool, id: i64) -> Result<Option<DeletedMovie>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let episodes = sqlx::query("DELETE FROM episodes WHERE movie_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let movies = sqlx::query("DELETE FROM movies WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if movies == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(DeletedMovie { episodes }))
    }

    pub async fn find_movie(pool: &DbPool, id: i64) -> Result<Option<MovieRow>, sqlx::Error> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id = ?");
        sqlx::query_as::<_, MovieRow>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_movies(pool: &DbPool) -> Result<Vec<MovieRow>, sqlx::Error> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies ORDER BY id DESC");
        sqlx::query_as::<_, MovieRow>(&sql).fetch_all(pool).await
    }

    pub async fn latest(pool: &DbPool, limit: i64) -> Result<Vec<MovieRow>, sqlx::Error> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies ORDER BY id DESC LIMIT ?");
        sqlx::query_as::<_, MovieRow>(&sql)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Orders on the rating text as stored ("9/10" sorts above "10/10").
    /// Unrated titles come last.
    pub async fn top_rated(pool: &DbPool, limit: i64) -> Result<Vec<MovieRow>, sqlx::Error> {
        let sql = format!(
            "SELECT {MOVIE_COLUMNS} FROM movies ORDER BY rating IS NULL, rating DESC, id DESC LIMIT ?"
        );
        sqlx::query_as::<_, MovieRow>(&sql)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn related(pool: &DbPool, exclude_id: i64, limit: i64) -> Result<Vec<MovieRow>, sqlx::Error> {
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies WHERE id <> ? ORDER BY id DESC LIMIT ?");
        sqlx::query_as::<_, MovieRow>(&sql)
            .bind(exclude_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Case-insensitive substring match on the title, folded with Unicode
    /// lowercasing on both sides. SQLite's `LOWER` and `LIKE` only fold ASCII,
    /// so the filtering happens here; the needle never reaches SQL, so `%` and
    /// `_` match literally.
    pub async fn search_titles(pool: &DbPool, needle: &str) -> Result<Vec<MovieRow>, sqlx::Error> {
        let needle = needle.to_lowercase();
        let sql = format!("SELECT {MOVIE_COLUMNS} FROM movies ORDER BY title ASC, id ASC");
        let rows = sqlx::query_as::<_, MovieRow>(&sql).fetch_all(pool).await?;
        Ok(rows
            .into_iter()
            .filter(|row| row.title.to_lowercase().contains(&needle))
            .collect())
    }

    pub async fn count_movies(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM movies")
            .fetch_one(pool)
            .await
    }

    // --- EPISODES ---

    pub async fn insert_episode(
        pool: &DbPool,
        movie_id: i64,
        draft: &EpisodeDraft,
    ) -> Result<Episode, sqlx::Error> {
        let sql = format!(
            r#"
            INSERT INTO episodes (movie_id, season_number, episode_number, title, synopsis, runtime, video_url, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {EPISODE_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Episode>(&sql)
            .bind(movie_id)
            .bind(draft.season_number)
            .bind(draft.episode_number)
            .bind(&draft.title)
            .bind(&draft.synopsis)
            .bind(&draft.runtime)
            .bind(&draft.video_url)
            .bind(OffsetDateTime::now_utc())
            .fetch_one(pool)
            .await
    }

    /// Only touches the episode if it belongs to `movie_id`.
    pub async fn update_episode(
        pool: &DbPool,
        movie_id: i64,
        id: i64,
        draft: &EpisodeDraft,
    ) -> Result<Option<Episode>, sqlx::Error> {
        let sql = format!(
            r#"
            UPDATE episodes
            SET season_number = ?, episode_number = ?, title = ?, synopsis = ?, runtime = ?, video_url = ?
            WHERE id = ? AND movie_id = ?
            RETURNING {EPISODE_COLUMNS}
            "#
        );
        sqlx::query_as::<_, Episode>(&sql)
            .bind(draft.season_number)
            .bind(draft.episode_number)
            .bind(&draft.title)
            .bind(&draft.synopsis)
            .bind(&draft.runtime)
            .bind(&draft.video_url)
            .bind(id)
            .bind(movie_id)
            .fetch_optional(pool)
            .await
    }

    /// `false` when no episode with this id belongs to `movie_id`.
    pub async fn delete_episode(pool: &DbPool, movie_id: i64, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM episodes WHERE id = ? AND movie_id = ?")
            .bind(id)
            .bind(movie_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_episode(pool: &DbPool, id: i64) -> Result<Option<Episode>, sqlx::Error> {
        let sql = format!("SELECT {EPISODE_COLUMNS} FROM episodes WHERE id = ?");
        sqlx::query_as::<_, Episode>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_episodes(pool: &DbPool, movie_id: i64) -> Result<Vec<Episode>, sqlx::Error> {
        let sql = format!(
            "SELECT {EPISODE_COLUMNS} FROM episodes WHERE movie_id = ? ORDER BY season_number ASC, episode_number ASC"
        );
        sqlx::query_as::<_, Episode>(&sql)
            .bind(movie_id)
            .fetch_all(pool)
            .await
    }
}
