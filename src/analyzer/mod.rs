//! Image → musical aesthetic.
//!
//! The analyzer is an external vision model. It must answer with a single
//! JSON object shaped like [`AestheticResult`]; anything else is a hard
//! failure and is never repaired or retried.

mod openai;

pub use openai::OpenAiAnalyzer;

use async_trait::async_trait;

use crate::{error::AnalyzerError, types::AestheticResult};

/// Instruction sent alongside the image.
pub const AESTHETIC_PROMPT: &str = r#"Look at this image and suggest music that would match its aesthetic. Respond with ONLY a JSON object in the following format, with no additional text:

{
  "mood": {
    "energy": 0.7,
    "valence": 0.5,
    "danceability": 0.6,
    "acousticness": 0.3
  },
  "searchTerms": ["term1", "term2", "term3"],
  "seedArtists": ["artist1", "artist2"],
  "description": "A brief description of the image aesthetic"
}

energy, valence, danceability and acousticness are numbers between 0.0 and 1.0. Give 3-5 specific search terms and 2-3 well-known artists.
Make sure to only return valid JSON with no markdown formatting, comments, or additional text."#;

#[async_trait]
pub trait AestheticAnalyzer: Send + Sync {
    async fn analyze(&self, image: &[u8]) -> Result<AestheticResult, AnalyzerError>;
}

/// Parses the model's reply into an [`AestheticResult`].
pub fn parse_aesthetic(content: &str) -> Result<AestheticResult, AnalyzerError> {
    serde_json::from_str(content.trim()).map_err(|e| AnalyzerError::Malformed(e.to_string()))
}
