use moodlist::types::{GeneratedPlaylist, SearchResponse, Track};
use serde_json::json;

#[test]
fn test_search_response_skips_null_items() {
    let body = json!({
        "tracks": {
            "items": [
                {
                    "id": "4uLU6hMCjMI75M1A2tKUQC",
                    "name": "Never Gonna Give You Up",
                    "uri": "spotify:track:4uLU6hMCjMI75M1A2tKUQC",
                    "artists": [{ "name": "Rick Astley" }, { "name": "Someone" }]
                },
                null,
                {
                    "id": "x",
                    "name": "No Artist",
                    "uri": "spotify:track:x",
                    "artists": []
                }
            ]
        }
    });

    let response: SearchResponse = serde_json::from_value(body).unwrap();
    let tracks: Vec<Track> = response
        .tracks
        .unwrap()
        .items
        .into_iter()
        .flatten()
        .map(Track::from)
        .collect();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].artist, "Rick Astley");
    assert_eq!(tracks[1].artist, "");
}

#[test]
fn test_search_response_without_tracks() {
    let response: SearchResponse = serde_json::from_value(json!({})).unwrap();
    assert!(response.tracks.is_none());
}

#[test]
fn test_generated_playlist_serializes_camel_case() {
    let playlist = GeneratedPlaylist {
        playlist_id: "p1".to_string(),
        description: "Golden hour".to_string(),
        tracks: vec![Track {
            id: "t1".to_string(),
            name: "Song".to_string(),
            artist: "Artist".to_string(),
            uri: "spotify:track:t1".to_string(),
        }],
    };

    let value = serde_json::to_value(&playlist).unwrap();

    assert_eq!(value["playlistId"], "p1");
    assert_eq!(value["tracks"][0]["uri"], "spotify:track:t1");
}
