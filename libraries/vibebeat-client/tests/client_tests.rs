//! Tests for the VibeBeat client library.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a real backend.

use serde_json::json;
use std::time::Duration;
use vibebeat_client::{ClientConfig, ClientError, MusicBackend, RetryPolicy, VibeClient};
use vibebeat_core::ErrorKind;
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> VibeClient {
    VibeClient::new(ClientConfig::new(server.uri()).with_retry(RetryPolicy::none())).unwrap()
}

fn fast_client_for(server: &MockServer, retry: RetryPolicy) -> VibeClient {
    VibeClient::new(
        ClientConfig::new(server.uri())
            .with_request_timeout(Duration::from_millis(200))
            .with_retry(retry),
    )
    .unwrap()
}

// =============================================================================
// Songs
// =============================================================================

mod songs {
    use super::*;

    #[tokio::test]
    async fn test_list_songs() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/songs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "songs": [
                    {"_id": "65f0c1", "filename": "a.mp3"},
                    {"filename": "b.mp3", "path": "/play/b.mp3"}
                ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let songs = client.songs().list().await.unwrap();

        assert_eq!(songs.len(), 2);
        assert_eq!(songs[0].filename, "a.mp3");
        assert_eq!(
            client.media_url(&songs[0]),
            format!("{}/play/65f0c1", server.uri())
        );
        assert_eq!(
            client.media_url(&songs[1]),
            format!("{}/play/b.mp3", server.uri())
        );
    }

    #[tokio::test]
    async fn test_list_songs_backend_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/songs"))
            .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
            .mount(&server)
            .await;

        let err = client_for(&server).songs().list().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::BackendFailure);
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_list_songs_malformed_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/songs"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client_for(&server).songs().list().await.unwrap_err();
        assert!(matches!(err, ClientError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_file_field() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/upload_song/"))
            .and(body_string_contains("name=\"file\""))
            .and(body_string_contains("filename=\"new.mp3\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .songs()
            .upload("new.mp3", b"ID3fake".to_vec())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_upload_file_missing() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();

        let err = client_for(&server)
            .songs()
            .upload_file(&dir.path().join("missing.mp3"))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_upload_file_uses_file_name() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("track.mp3");
        std::fs::write(&file, b"data").unwrap();

        Mock::given(method("POST"))
            .and(path("/upload_song/"))
            .and(body_string_contains("filename=\"track.mp3\""))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let name = client_for(&server).songs().upload_file(&file).await.unwrap();
        assert_eq!(name, "track.mp3");
    }

    #[tokio::test]
    async fn test_legacy_playlist() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/playlist"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "playlist": [{"file_id": "1", "filename": "a.mp3"}]
            })))
            .mount(&server)
            .await;

        let entries = client_for(&server).songs().legacy_playlist().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].filename, "a.mp3");
    }
}

// =============================================================================
// Playlists
// =============================================================================

mod playlists {
    use super::*;

    #[tokio::test]
    async fn test_list_playlists() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/playlists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "playlists": [
                    {"id": 1, "name": "Mix", "description": "", "songs": ["a.mp3", "a.mp3"]},
                    {"id": 2, "name": "Empty"}
                ]
            })))
            .mount(&server)
            .await;

        let playlists = client_for(&server).playlists().list().await.unwrap();

        assert_eq!(playlists.len(), 2);
        assert_eq!(playlists[0].occurrences("a.mp3"), 2);
        assert!(playlists[1].is_empty());
    }

    #[tokio::test]
    async fn test_create_playlist_returns_id() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/playlists"))
            .and(body_json(json!({"name": "Mix", "description": ""})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "playlist": {"id": 7, "name": "Mix"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let id = client_for(&server)
            .playlists()
            .create("Mix", "")
            .await
            .unwrap();
        assert_eq!(id, Some(7));
    }

    #[tokio::test]
    async fn test_create_playlist_tolerates_empty_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/playlists"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let id = client_for(&server)
            .playlists()
            .create("Mix", "")
            .await
            .unwrap();
        assert_eq!(id, None);
    }

    #[tokio::test]
    async fn test_update_playlist() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/playlists/3"))
            .and(body_json(json!({"name": "Renamed", "description": "Late night"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .playlists()
            .update(3, "Renamed", "Late night")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_playlist() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/playlists/99"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "Playlist not found"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).playlists().delete(99).await.unwrap_err();

        match err {
            ClientError::Backend { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Playlist not found");
            }
            other => panic!("Expected Backend error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_song() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/playlists/3/add"))
            .and(body_json(json!({"filename": "a.mp3"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .playlists()
            .add_song(3, "a.mp3")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_remove_song_encodes_filename() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/playlists/3/remove/my%20song%231.mp3"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .playlists()
            .remove_song(3, "my song#1.mp3")
            .await
            .unwrap();
    }
}

// =============================================================================
// Timeouts and Retries
// =============================================================================

mod resilience {
    use super::*;

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/songs"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"songs": []}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let err = fast_client_for(&server, RetryPolicy::none())
            .songs()
            .list()
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Timeout);
    }

    #[tokio::test]
    async fn test_idempotent_request_retried_once_after_timeout() {
        let server = MockServer::start().await;

        // First attempt hangs past the timeout
        Mock::given(method("GET"))
            .and(path("/playlists"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"playlists": []}))
                    .set_delay(Duration::from_secs(2)),
            )
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/playlists"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "playlists": [{"id": 1, "name": "Mix"}]
            })))
            .mount(&server)
            .await;

        let retry = RetryPolicy {
            max_retries: 1,
            backoff: Duration::from_millis(10),
        };
        let playlists = fast_client_for(&server, retry)
            .playlists()
            .list()
            .await
            .unwrap();

        assert_eq!(playlists.len(), 1);
    }

    #[tokio::test]
    async fn test_backend_errors_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/songs"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let retry = RetryPolicy {
            max_retries: 3,
            backoff: Duration::from_millis(10),
        };
        let err = fast_client_for(&server, retry)
            .songs()
            .list()
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn test_post_not_retried_after_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/playlists/1/add"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
            .expect(1)
            .mount(&server)
            .await;

        let retry = RetryPolicy {
            max_retries: 3,
            backoff: Duration::from_millis(10),
        };
        let err = fast_client_for(&server, retry)
            .playlists()
            .add_song(1, "a.mp3")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Timeout);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_failure() {
        let client = VibeClient::new(
            ClientConfig::new("http://127.0.0.1:1")
                .with_request_timeout(Duration::from_secs(2))
                .with_retry(RetryPolicy::none()),
        )
        .unwrap();

        let err = client.songs().list().await.unwrap_err();
        assert!(err.kind().is_transient());
    }
}

// =============================================================================
// Backend trait
// =============================================================================

mod backend_trait {
    use super::*;

    #[tokio::test]
    async fn test_trait_builds_catalog_songs() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/songs"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "songs": [{"filename": "Night Drive.mp3"}]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let backend: &dyn MusicBackend = &client;

        let records = backend.list_songs().await.unwrap();
        let song = backend.to_song(&records[0]);

        assert_eq!(song.title, "Night Drive");
        assert_eq!(song.artist, "Unknown Artist");
        assert_eq!(song.album, "Default Album");
        assert_eq!(
            song.url,
            format!("{}/play/Night%20Drive.mp3", server.uri())
        );
    }
}
