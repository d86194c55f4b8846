//! Commands that span several invocations, against a mocked backend

use serde_json::json;
use std::io::Cursor;
use sunohub_cli::{App, CliConfig, CliError};
use sunohub_core::SongId;
use sunohub_playback::RepeatMode;
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn row(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "suno_id": format!("suno-{id}"),
        "title": format!("Song {id}"),
        "artist": "Luna",
        "plays_count": 3,
        "lyrics": "First line\nSecond line"
    })
}

/// Backend serving songs `a`, `b` and `c` and accepting play counts
async fn backend() -> MockServer {
    let server = MockServer::start().await;
    for id in ["a", "b", "c"] {
        Mock::given(method("GET"))
            .and(path("/rest/v1/songs"))
            .and(query_param("id", format!("eq.{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([row(id)])))
            .mount(&server)
            .await;
    }
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/songs"))
        .and(body_string_contains("plays_count"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    server
}

fn config(server: &MockServer, dir: &TempDir) -> CliConfig {
    let mut config = CliConfig::default();
    config.backend.url = server.uri();
    config.backend.anon_key = "anon".to_string();
    config.storage.state_path = dir.path().join("state.json");
    config
}

#[tokio::test]
async fn test_custom_repeat_advances_across_invocations() {
    let server = backend().await;
    let dir = TempDir::new().unwrap();
    let config = config(&server, &dir);

    {
        let mut app = App::open(config.clone()).unwrap();
        for id in ["a", "b", "c"] {
            app.queue_add(&SongId::new(id)).await.unwrap();
        }
        for _ in 0..3 {
            app.toggle_repeat().unwrap();
        }
        assert_eq!(app.controller().repeat_mode(), RepeatMode::OneCustom);
        app.queue_play(0).await.unwrap();
    }

    {
        let mut app = App::open(config.clone()).unwrap();
        assert_eq!(app.controller().position(), Some(0));
        app.next(None).await.unwrap();
        assert_eq!(app.controller().position(), Some(0), "first next replays");
        assert_eq!(app.controller().play_count(), 1);
    }

    let mut app = App::open(config).unwrap();
    assert_eq!(app.controller().play_count(), 1);
    app.next(None).await.unwrap();
    assert_eq!(app.controller().position(), Some(1), "second next moves on");
    assert_eq!(app.controller().play_count(), 0);
}

#[tokio::test]
async fn test_jumping_in_the_queue_restarts_the_replay_count() {
    let server = backend().await;
    let dir = TempDir::new().unwrap();
    let config = config(&server, &dir);

    {
        let mut app = App::open(config.clone()).unwrap();
        for id in ["a", "b"] {
            app.queue_add(&SongId::new(id)).await.unwrap();
        }
        for _ in 0..3 {
            app.toggle_repeat().unwrap();
        }
        app.queue_play(0).await.unwrap();
        app.next(None).await.unwrap();
        assert_eq!(app.controller().play_count(), 1);
        app.queue_play(1).await.unwrap();
    }

    let app = App::open(config).unwrap();
    assert_eq!(app.controller().play_count(), 0);
    assert_eq!(app.controller().position(), Some(1));
}

#[tokio::test]
async fn test_sync_lyrics_saves_lrc() {
    let server = backend().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/songs"))
        .and(query_param("id", "eq.a"))
        .and(body_string_contains("] Second line"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let app = App::open(config(&server, &dir)).unwrap();

    app.sync_lyrics(&SongId::new("a"), Cursor::new("\n\n"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_sync_lyrics_abandoned_saves_nothing() {
    let server = backend().await;
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/songs"))
        .and(body_string_contains("lyrics"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let app = App::open(config(&server, &dir)).unwrap();

    app.sync_lyrics(&SongId::new("a"), Cursor::new("\n"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_review_requires_user() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let app = App::open(config(&server, &dir)).unwrap();

    let err = app.review(&SongId::new("a"), 5, None).await.unwrap_err();

    assert!(matches!(err, CliError::SignInRequired(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_review_submits_as_configured_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/reviews"))
        .and(body_string_contains(r#""user_id":"user-1""#))
        .and(body_string_contains(r#""user_email":"luna@example.com""#))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let mut config = config(&server, &dir);
    config.backend.user_id = Some("user-1".to_string());
    config.backend.user_email = Some("luna@example.com".to_string());
    let app = App::open(config).unwrap();

    app.review(&SongId::new("a"), 4, Some("great"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_drops_songs_from_queue() {
    let server = backend().await;
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/songs"))
        .and(query_param("id", "in.(a,b)"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();
    let mut app = App::open(config(&server, &dir)).unwrap();
    for id in ["a", "b", "c"] {
        app.queue_add(&SongId::new(id)).await.unwrap();
    }

    app.delete(&[SongId::new("a"), SongId::new("b")])
        .await
        .unwrap();

    let remaining: Vec<_> = app
        .controller()
        .queue()
        .iter()
        .map(|song| song.queue_key().to_string())
        .collect();
    assert_eq!(remaining, vec!["c".to_string()]);
}
