mod common;

use common::{Call, FakeCatalog, PLAYLIST_ID, USER_ID, track};
use moodlist::{
    collector::TrackCollection,
    error::PublishError,
    publisher::{PLAYLIST_NAME, playlist_description, publish},
};

fn collection(ids: &[&str]) -> TrackCollection {
    let mut collection = TrackCollection::new(ids.len());
    for id in ids {
        collection.push(track(id));
    }
    collection
}

#[test]
fn test_playlist_description() {
    assert_eq!(
        playlist_description("Neon-lit city at night"),
        "Based on the image aesthetic: Neon-lit city at night"
    );
}

#[tokio::test]
async fn test_publish_creates_private_playlist_with_all_tracks() {
    let catalog = FakeCatalog::new();
    let tracks = collection(&["t1", "t2", "t3"]);

    let playlist_id = publish(&tracks, "Foggy forest", &catalog).await.unwrap();

    assert_eq!(playlist_id, PLAYLIST_ID);
    assert_eq!(
        catalog.calls(),
        vec![
            Call::CurrentUser,
            Call::CreatePlaylist {
                owner_id: USER_ID.to_string(),
                name: PLAYLIST_NAME.to_string(),
                description: "Based on the image aesthetic: Foggy forest".to_string(),
                public: false,
            },
            Call::AddTracks {
                playlist_id: PLAYLIST_ID.to_string(),
                uris: vec![
                    "spotify:track:t1".to_string(),
                    "spotify:track:t2".to_string(),
                    "spotify:track:t3".to_string(),
                ],
            },
        ]
    );
}

#[tokio::test]
async fn test_failed_add_reports_created_playlist() {
    let mut catalog = FakeCatalog::new();
    catalog.fail_add = true;

    let result = publish(&collection(&["t1"]), "Desert", &catalog).await;

    match result {
        Err(PublishError::AddTracks { playlist_id, .. }) => assert_eq!(playlist_id, PLAYLIST_ID),
        other => panic!("expected AddTracks error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_owner_failure_creates_nothing() {
    let mut catalog = FakeCatalog::new();
    catalog.fail_user = true;

    let result = publish(&collection(&["t1"]), "Desert", &catalog).await;

    assert!(matches!(result, Err(PublishError::Owner(_))));
    assert_eq!(catalog.calls(), vec![Call::CurrentUser]);
}
