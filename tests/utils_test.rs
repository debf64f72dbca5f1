use moodlist::config::{MAX_TRACK_QUOTA, clamp_quota};
use moodlist::types::Track;
use moodlist::utils::*;

fn create_test_track(id: &str, name: &str, artist: &str) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artist: artist.to_string(),
        uri: format!("spotify:track:{}", id),
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    // RFC 7636, appendix B
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");

    // URL-safe, no padding
    let challenge = generate_code_challenge("another_verifier");
    assert!(!challenge.contains('='));
    assert!(!challenge.contains('+'));
    assert!(!challenge.contains('/'));
}

#[test]
fn test_random_token() {
    let token = random_token(32);
    assert_eq!(token.len(), 32);
    assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(random_token(0), "");
}

#[test]
fn test_mask_token() {
    assert_eq!(mask_token("BQDx1234567890abcdefZ"), "BQDx1...cdefZ");
    assert_eq!(mask_token("short"), "*****");
    assert_eq!(mask_token("exactly10c"), "**********");
    assert_eq!(mask_token(""), "");
}

#[test]
fn test_track_table_rows() {
    let tracks = vec![
        create_test_track("1", "Teardrop", "Massive Attack"),
        create_test_track("2", "Glory Box", "Portishead"),
    ];

    let rows = track_table_rows(&tracks);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].position, 1);
    assert_eq!(rows[0].name, "Teardrop");
    assert_eq!(rows[1].position, 2);
    assert_eq!(rows[1].artist, "Portishead");
}

#[test]
fn test_clamp_quota() {
    assert_eq!(clamp_quota(0), 1);
    assert_eq!(clamp_quota(20), 20);
    assert_eq!(clamp_quota(500), MAX_TRACK_QUOTA);
}
