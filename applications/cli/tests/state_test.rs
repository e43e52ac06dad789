//! AppState wiring against a mock backend

use serde_json::json;
use std::sync::Arc;
use vibebeat_cli::{AppConfig, AppState};
use vibebeat_playback::PlaybackState;
use vibebeat_storage::{KeyValueStore, MemoryStore, KEY_RECENTLY_PLAYED};
use vibebeat_sync::NoticeLog;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn backend() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/songs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "songs": [{"filename": "a.mp3"}, {"filename": "b.mp3"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/playlists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "playlists": [
                {"id": 1, "name": "Mix", "songs": ["gone.mp3", "b.mp3"]},
                {"id": 2, "name": "Empty", "songs": []},
                {"id": 3, "name": "Stale", "songs": ["gone.mp3"]}
            ]
        })))
        .mount(&server)
        .await;
    server
}

async fn state_for(server: &MockServer) -> (AppState, Arc<MemoryStore>, Arc<NoticeLog>) {
    let mut config = AppConfig::default();
    config.server.url = server.uri();
    let store = Arc::new(MemoryStore::new());
    let log = Arc::new(NoticeLog::new());

    let state = AppState::with_store(config, store.clone(), log.clone()).unwrap();
    state.load().await.unwrap();
    (state, store, log)
}

#[tokio::test]
async fn playlist_starts_at_first_available_song() {
    let server = backend().await;
    let (mut state, _store, _log) = state_for(&server).await;

    state.play_playlist(1).unwrap();

    assert_eq!(state.player.state(), PlaybackState::Playing);
    assert_eq!(state.player.current_song().unwrap().filename, "b.mp3");
    assert_eq!(state.player.current_index(), Some(1));
}

#[tokio::test]
async fn playlist_failures_produce_notices() {
    let server = backend().await;
    let (mut state, _store, log) = state_for(&server).await;

    assert!(state.play_playlist(2).is_err());
    assert_eq!(log.last().unwrap().message, "No songs");

    assert!(state.play_playlist(3).is_err());
    assert_eq!(log.last().unwrap().message, "First song not available on server");

    assert!(state.play_song("gone.mp3").is_err());
    assert_eq!(log.last().unwrap().message, "Song not found");
    assert_eq!(state.player.state(), PlaybackState::Idle);
}

#[tokio::test]
async fn history_and_likes_reach_the_session() {
    let server = backend().await;
    let (mut state, store, _log) = state_for(&server).await;

    state.play_library(Some("b.mp3")).unwrap();
    state.play_song("a.mp3").unwrap();
    assert!(state.toggle_like_current().unwrap());

    let recent: Vec<_> = state.recent_view().into_iter().map(|c| c.filename).collect();
    assert_eq!(recent, vec!["a.mp3", "b.mp3"]);
    assert_eq!(state.liked_view()[0].filename, "a.mp3");
    assert!(state.now_playing().liked);

    state.session.save().unwrap();
    assert_eq!(
        store.get(KEY_RECENTLY_PLAYED).unwrap(),
        Some(json!(["a.mp3", "b.mp3"]))
    );
}

#[tokio::test]
async fn invalid_config_is_rejected() {
    let mut config = AppConfig::default();
    config.server.url = "not a url".to_string();

    let result = AppState::with_store(config, Arc::new(MemoryStore::new()), Arc::new(NoticeLog::new()));
    assert!(result.is_err());
}
