use crate::modules::catalog::repository::CatalogRepository;
use crate::test_utils::{
    body_json, cookie_from, create_user, episode_draft, film_draft, form_request, get_request, login_cookie,
    series_draft, setup_test_app,
};
use axum::http::{header, StatusCode};
use tower::ServiceExt;

fn location<B>(response: &axum::http::Response<B>) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup_test_app().await;
    let response = app.oneshot(get_request("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_anonymous_admin_requests_are_sent_to_login() {
    let (app, _) = setup_test_app().await;

    let response = app.clone().oneshot(get_request("/admin/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/login?next=%2Fadmin%2F");

    let response = app.oneshot(get_request("/admin/movies/new", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/login?next=%2Fadmin%2Fmovies%2Fnew");
}

#[tokio::test]
async fn test_admin_guard_runs_before_the_handler() {
    let (app, state) = setup_test_app().await;
    let film = CatalogRepository::insert_movie(&state.db, &film_draft("Heat", "heat.mp4"))
        .await
        .unwrap();

    let response = app
        .oneshot(form_request("POST", &format!("/admin/movies/{}/delete", film.id), "", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(CatalogRepository::find_movie(&state.db, film.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_regular_user_cannot_reach_admin() {
    let (app, state) = setup_test_app().await;
    create_user(&state, "neo", false).await;
    let cookie = login_cookie(&app, "neo").await;

    let response = app.oneshot(get_request("/admin/", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(location(&response).starts_with("/auth/login?next="));
    assert!(cookie_from(&response, "flash").is_some());
}

#[tokio::test]
async fn test_admin_login_reaches_dashboard() {
    let (app, state) = setup_test_app().await;
    create_user(&state, "morpheus", true).await;
    CatalogRepository::insert_movie(&state.db, &film_draft("Heat", "heat.mp4"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(form_request(
            "POST",
            "/auth/login?next=%2Fadmin%2F",
            "username=morpheus&password=correct+horse",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin/");
    let cookie = cookie_from(&response, "session").unwrap();

    let response = app.oneshot(get_request("/admin", Some(&cookie))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["title"], "Heat");
}

#[tokio::test]
async fn test_login_ignores_offsite_next() {
    let (app, state) = setup_test_app().await;
    create_user(&state, "neo", false).await;

    let response = app
        .oneshot(form_request(
            "POST",
            "/auth/login?next=https%3A%2F%2Fevil.example",
            "username=neo&password=correct+horse",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn test_register_then_login() {
    let (app, _) = setup_test_app().await;

    let response = app
        .clone()
        .oneshot(form_request(
            "POST",
            "/auth/register",
            "username=trinity&email=t%40example.com&password=correct+horse&confirm=correct+horse",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/auth/login");

    let cookie = login_cookie(&app, "trinity").await;
    assert!(cookie.starts_with("session="));
}

#[tokio::test]
async fn test_register_duplicate_email_is_rejected() {
    let (app, state) = setup_test_app().await;
    create_user(&state, "neo", false).await;

    let response = app
        .oneshot(form_request(
            "POST",
            "/auth/register",
            "username=other&email=neo%40example.com&password=pw&confirm=pw",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["status"], "error");
    assert_eq!(body["data"]["email"], "neo@example.com");
    assert!(body["data"].get("password").is_none());
}

#[tokio::test]
async fn test_login_failures_look_the_same() {
    let (app, state) = setup_test_app().await;
    create_user(&state, "neo", false).await;

    let wrong_password = app
        .clone()
        .oneshot(form_request("POST", "/auth/login", "username=neo&password=nope", None))
        .await
        .unwrap();
    let unknown_user = app
        .oneshot(form_request("POST", "/auth/login", "username=ghost&password=nope", None))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    assert!(cookie_from(&wrong_password, "session").is_none());
    let a = body_json(wrong_password).await;
    let b = body_json(unknown_user).await;
    assert_eq!(a["message"], b["message"]);
    assert_eq!(a["message"], "Invalid username or password.");
}

#[tokio::test]
async fn test_missing_movie_is_not_found() {
    let (app, _) = setup_test_app().await;
    let response = app.oneshot(get_request("/movie/999", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_and_detail() {
    let (app, state) = setup_test_app().await;
    let series = CatalogRepository::insert_movie(&state.db, &series_draft("The Witcher"))
        .await
        .unwrap();
    CatalogRepository::insert_movie(&state.db, &film_draft("Heat", "heat.mp4"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(get_request("/search?q=WITCH", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["results"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["results"][0]["id"], series.id);

    let response = app
        .oneshot(get_request(&format!("/movie/{}", series.id), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["data"]["primary_video_url"].is_null());
}

#[tokio::test]
async fn test_admin_film_without_video_is_rejected() {
    let (app, state) = setup_test_app().await;
    create_user(&state, "morpheus", true).await;
    let cookie = login_cookie(&app, "morpheus").await;

    let response = app
        .oneshot(form_request(
            "POST",
            "/admin/movies/new",
            "title=Heat&synopsis=Robbers&year=1995",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["message"], "A film needs a main video URL.");
    assert_eq!(body["data"]["title"], "Heat");
    assert_eq!(CatalogRepository::count_movies(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_admin_series_flow() {
    let (app, state) = setup_test_app().await;
    create_user(&state, "morpheus", true).await;
    let cookie = login_cookie(&app, "morpheus").await;

    let response = app
        .clone()
        .oneshot(form_request(
            "POST",
            "/admin/movies/new",
            "title=Dark&synopsis=Time+travel&year=2017&is_series=1",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let series = CatalogRepository::list_movies(&state.db).await.unwrap().remove(0);
    assert!(series.is_series);
    assert_eq!(
        location(&response),
        format!("/admin/movies/{}/episodes?setup=1", series.id)
    );

    let episodes_url = format!("/admin/movies/{}/episodes/new", series.id);
    let response = app
        .clone()
        .oneshot(form_request(
            "POST",
            &episodes_url,
            "season_number=1&episode_number=1&title=Secrets&video_url=https%3A%2F%2Fcdn.example%2F1.mp4",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .clone()
        .oneshot(form_request(
            "POST",
            &episodes_url,
            "season_number=1&episode_number=1&title=Lies&video_url=https%3A%2F%2Fcdn.example%2F2.mp4",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let response = app
        .oneshot(get_request(&format!("/movie/{}", series.id), None))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["data"]["primary_video_url"], "https://cdn.example/1.mp4");
}

#[tokio::test]
async fn test_episode_screens_bounce_films() {
    let (app, state) = setup_test_app().await;
    create_user(&state, "morpheus", true).await;
    let cookie = login_cookie(&app, "morpheus").await;
    let film = CatalogRepository::insert_movie(&state.db, &film_draft("Heat", "heat.mp4"))
        .await
        .unwrap();

    let response = app
        .oneshot(get_request(&format!("/admin/movies/{}/episodes", film.id), Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/admin/movies/{}/edit", film.id));
}

#[tokio::test]
async fn test_episode_edits_bounce_once_series_becomes_film() {
    let (app, state) = setup_test_app().await;
    create_user(&state, "morpheus", true).await;
    let cookie = login_cookie(&app, "morpheus").await;
    let series = CatalogRepository::insert_movie(&state.db, &series_draft("Dark"))
        .await
        .unwrap();
    let ep = CatalogRepository::insert_episode(&state.db, series.id, &episode_draft(1, 1, "Secrets"))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(form_request(
            "POST",
            &format!("/admin/movies/{}/edit", series.id),
            "title=Dark&synopsis=Time+travel&video_url=dark.mp4",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let edit_episode = format!("/admin/movies/{}/episodes/{}/edit", series.id, ep.id);
    let response = app
        .clone()
        .oneshot(get_request(&edit_episode, Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/admin/movies/{}/edit", series.id));

    let response = app
        .oneshot(form_request(
            "POST",
            &edit_episode,
            "season_number=2&episode_number=3&title=Lies&video_url=lies.mp4",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), format!("/admin/movies/{}/edit", series.id));
    assert!(cookie_from(&response, "flash").is_some());

    let stored = CatalogRepository::find_episode(&state.db, ep.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "Secrets");
    assert_eq!((stored.season_number, stored.episode_number), (1, 1));
}
