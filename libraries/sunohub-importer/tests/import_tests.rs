//! Importer tests against captured page shapes and a mock server.

use sunohub_importer::{parse_song_page, ImportError, Importer, DEFAULT_CATEGORY};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const APP_ROUTER_PAGE: &str = include_str!("fixtures/app_router_page.html");
const LEGACY_PAGE: &str = include_str!("fixtures/legacy_next_data.html");

const APP_ROUTER_ID: &str = "7d3c9a10-5b2e-4f6a-9c1d-2e8f4a6b0c11";
const LEGACY_ID: &str = "2b4d6f80-1a3c-4e5f-8a9b-0c1d2e3f4a5b";

// =============================================================================
// Page Parsing Tests
// =============================================================================

mod parsing {
    use super::*;

    #[test]
    fn test_app_router_page_from_short_link() {
        let song = parse_song_page("https://suno.com/s/AbCdEf", APP_ROUTER_PAGE).unwrap();

        assert_eq!(song.suno_id, APP_ROUTER_ID);
        assert_eq!(song.title, "Café Nights");
        assert_eq!(song.artist, "lunawaves");
        assert!(song.image_url.starts_with("https://cdn2.suno.ai/image_large_"));
        assert_eq!(
            song.audio_url,
            format!("https://cdn1.suno.ai/{}.mp3", APP_ROUTER_ID)
        );
        assert_eq!(song.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_app_router_lyrics_chunk_wins() {
        let song = parse_song_page("https://suno.com/s/AbCdEf", APP_ROUTER_PAGE).unwrap();
        let lyrics = song.lyrics.unwrap();

        assert!(lyrics.starts_with("[Intro]\n[Verse 1]\nRain on the glass"));
        assert!(lyrics.ends_with("Until the morning light"));
        assert!(!lyrics.contains("function"));
    }

    #[test]
    fn test_legacy_next_data_page() {
        let song = parse_song_page("https://suno.com/s/XyZ", LEGACY_PAGE).unwrap();

        assert_eq!(song.suno_id, LEGACY_ID);
        assert_eq!(song.title, "Old Times");
        assert_eq!(song.artist, "Vintage");
        assert_eq!(song.lyrics.as_deref(), Some("[Verse]\nold school\n\nline two"));
        assert_eq!(
            song.image_url,
            format!("https://cdn1.suno.ai/image_{}.png", LEGACY_ID)
        );
    }

    #[test]
    fn test_link_id_beats_page_id() {
        let link = format!("https://suno.com/song/{}", LEGACY_ID);
        let song = parse_song_page(&link, APP_ROUTER_PAGE).unwrap();
        assert_eq!(song.suno_id, LEGACY_ID);
    }

    #[test]
    fn test_entity_encoded_metadata() {
        let link = format!("https://suno.com/song/{}", APP_ROUTER_ID);
        let html = r#"<meta property="og:title" content="Rock &amp; Roll by DJ &#39;Q&#39;">"#;
        let song = parse_song_page(&link, html).unwrap();
        assert_eq!(song.title, "Rock & Roll");
        assert_eq!(song.artist, "DJ 'Q'");
    }
}

// =============================================================================
// Fetch Tests
// =============================================================================

mod fetching {
    use super::*;

    #[tokio::test]
    async fn test_fetch_song_adds_cache_buster() {
        let server = MockServer::start().await;
        let page_path = format!("/song/{}", APP_ROUTER_ID);

        Mock::given(method("GET"))
            .and(path(page_path.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_string(APP_ROUTER_PAGE))
            .expect(1)
            .mount(&server)
            .await;

        let importer = Importer::new().unwrap();
        let link = format!("{}{}", server.uri(), page_path);
        let song = importer.fetch_song(&link).await.unwrap();
        assert_eq!(song.suno_id, APP_ROUTER_ID);
        assert_eq!(song.title, "Café Nights");

        let requests = server.received_requests().await.unwrap();
        let has_buster = requests[0].url.query_pairs().any(|(key, _)| key == "t");
        assert!(has_buster, "Expected cache-busting t= parameter");
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let importer = Importer::new().unwrap();
        let link = format!("{}/song/{}", server.uri(), APP_ROUTER_ID);

        match importer.fetch_song(&link).await {
            Err(ImportError::Http(status)) => assert_eq!(status, 404),
            other => panic!("Expected Http error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_page_without_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/s/short"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gone</html>"))
            .mount(&server)
            .await;

        let importer = Importer::new().unwrap();
        let result = importer
            .fetch_song(&format!("{}/s/short", server.uri()))
            .await;
        assert!(matches!(result, Err(ImportError::SongIdNotFound)));
    }

    #[tokio::test]
    async fn test_fetch_invalid_link() {
        let importer = Importer::new().unwrap();
        let result = importer.fetch_song("suno song please").await;
        assert!(matches!(result, Err(ImportError::InvalidUrl(_))));
    }
}
