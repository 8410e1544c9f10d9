use crate::common::security;
use crate::config::settings::{AppConfig, DEFAULT_ADMIN_PASSWORD};
use crate::infrastructure::db::pool::DbPool;
use crate::modules::auth::repository::AuthRepository;
use crate::modules::catalog::model::{EpisodeDraft, Format, MovieDraft};
use crate::modules::catalog::repository::CatalogRepository;
use tracing::{info, warn};

const ADMIN_USERNAME: &str = "admin";
const ADMIN_EMAIL: &str = "admin@example.com";

pub async fn run_seeders(pool: &DbPool, config: &AppConfig) -> anyhow::Result<()> {
    seed_admin(pool, &config.seed_admin_password).await?;
    seed_catalog(pool).await?;
    Ok(())
}

/// Creates the bootstrap administrator when no account exists yet.
pub async fn seed_admin(pool: &DbPool, password: &str) -> anyhow::Result<bool> {
    if AuthRepository::count_users(pool).await? > 0 {
        return Ok(false);
    }

    let password_hash = security::hash_password(password)?;
    AuthRepository::create_user(pool, ADMIN_USERNAME, ADMIN_EMAIL, &password_hash, true).await?;
    info!("🚀 Created admin account '{}'", ADMIN_USERNAME);
    if password == DEFAULT_ADMIN_PASSWORD {
        warn!("⚠️ Admin account uses the default password; set SEED_ADMIN_PASSWORD or change it");
    }
    Ok(true)
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

struct SeedTitle {
    draft: MovieDraft,
    episodes: Vec<EpisodeDraft>,
}

fn episode(season: i64, number: i64, title: &str, runtime: &str, video_url: &str) -> EpisodeDraft {
    EpisodeDraft {
        season_number: season,
        episode_number: number,
        title: title.to_string(),
        synopsis: None,
        runtime: text(runtime),
        video_url: video_url.to_string(),
    }
}

fn demo_catalog() -> Vec<SeedTitle> {
    vec![
        SeedTitle {
            draft: MovieDraft {
                title: "Money Heist: Part 4".to_string(),
                synopsis: "As the Professor races to save Lisbon, members of the crew deal with their own crises."
                    .to_string(),
                year: 2020,
                rating: text("8.8/10"),
                maturity_badge: text("16+"),
                runtime: text("4 Parts"),
                spotlight_title: text("La Casa de Papel"),
                spotlight_tagline: text("No plan survives first contact with reality."),
                thumbnail_url: text("https://source.unsplash.com/480x720/?heist"),
                hero_url: text("https://source.unsplash.com/1280x720/?money,heist"),
                background_url: text("https://source.unsplash.com/1980x1080/?dark,heist"),
                trailer_url: text("https://www.youtube.com/watch?v=p_PJbmrX4uk"),
                categories: text("Action, Thriller"),
                format: Format::Film {
                    video_url: "https://archive.org/download/sample-video-file/mp4/sample_960x540.mp4".to_string(),
                },
            },
            episodes: Vec::new(),
        },
        SeedTitle {
            draft: MovieDraft {
                title: "The Witcher".to_string(),
                synopsis: "Geralt of Rivia, a solitary monster hunter, struggles to find his place in a world."
                    .to_string(),
                year: 2019,
                rating: text("8.2/10"),
                maturity_badge: text("18+"),
                runtime: text("3 Seasons"),
                spotlight_title: text("Destiny is a beast."),
                spotlight_tagline: text("Destinies collide in the Continent."),
                thumbnail_url: text("https://source.unsplash.com/480x720/?witcher"),
                hero_url: text("https://source.unsplash.com/1280x720/?fantasy,warrior"),
                background_url: text("https://source.unsplash.com/1980x1080/?fantasy,dark"),
                trailer_url: text("https://www.youtube.com/watch?v=ndl1W4ltcmg"),
                categories: text("Fantasy, Drama"),
                format: Format::Series {
                    video_url: None,
                    episodes: Vec::new(),
                },
            },
            episodes: vec![
                episode(1, 1, "The End's Beginning", "61m", "https://archive.org/download/BigBuckBunny_328/BigBuckBunny_512kb.mp4"),
                episode(1, 2, "Four Marks", "61m", "https://archive.org/download/ElephantsDream/ed_1024_512kb.mp4"),
                episode(2, 1, "A Grain of Truth", "59m", "https://archive.org/download/sample-video-file/mp4/sample_960x540.mp4"),
            ],
        },
        SeedTitle {
            draft: MovieDraft {
                title: "Stranger Things".to_string(),
                synopsis: "When a young boy vanishes, a small town uncovers a mystery involving secret experiments."
                    .to_string(),
                year: 2016,
                rating: text("8.7/10"),
                maturity_badge: text("16+"),
                runtime: text("4 Seasons"),
                spotlight_title: text("The Upside Down awaits."),
                spotlight_tagline: text("Friends don't lie."),
                thumbnail_url: text("https://source.unsplash.com/480x720/?stranger-things"),
                hero_url: text("https://source.unsplash.com/1280x720/?neon,forest"),
                background_url: text("https://source.unsplash.com/1980x1080/?mystery,neon"),
                trailer_url: text("https://www.youtube.com/watch?v=mnd7sFt5c3A"),
                categories: text("Sci-Fi, Mystery"),
                format: Format::Series {
                    video_url: None,
                    episodes: Vec::new(),
                },
            },
            episodes: vec![
                episode(1, 1, "The Vanishing of Will Byers", "48m", "https://archive.org/download/ElephantsDream/ed_1024_512kb.mp4"),
                episode(1, 2, "The Weirdo on Maple Street", "55m", "https://archive.org/download/BigBuckBunny_328/BigBuckBunny_512kb.mp4"),
            ],
        },
    ]
}

/// Inserts the demo titles when the catalog is empty.
pub async fn seed_catalog(pool: &DbPool) -> anyhow::Result<bool> {
    if CatalogRepository::count_movies(pool).await? > 0 {
        return Ok(false);
    }

    for title in demo_catalog() {
        let row = CatalogRepository::insert_movie(pool, &title.draft).await?;
        for ep in &title.episodes {
            CatalogRepository::insert_episode(pool, row.id, ep).await?;
        }
    }
    info!("✅ Seeded demo catalog");
    Ok(true)
}
