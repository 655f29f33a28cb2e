//! Speech/audio bundle models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Energy reported when no audio was captured for the window.
pub const SILENCE_ENERGY_DB: f64 = -80.0;

/// A keyword spotted in the transcript by the speech collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordHit {
    /// The matched keyword
    pub keyword: String,

    /// Seconds into the audio window where the keyword was spoken
    pub timestamp: f64,
}

impl KeywordHit {
    pub fn new(keyword: impl Into<String>, timestamp: f64) -> Self {
        Self {
            keyword: keyword.into(),
            timestamp,
        }
    }
}

/// Per-camera speech features from the transcription collaborator.
///
/// `Default` is the documented "no audio" value: empty transcript, no
/// keywords, energy at [`SILENCE_ENERGY_DB`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AudioBundle {
    /// Transcript for the audio window (may be empty)
    pub text: String,

    /// Keywords spotted in the transcript
    pub keywords: Vec<KeywordHit>,

    /// RMS energy of the window in dBFS
    pub energy_db: f64,

    /// Whether the collaborator judged speech to be present
    pub speech_present: bool,
}

impl AudioBundle {
    /// Bundle representing a silent or absent audio window.
    pub fn silence() -> Self {
        Self::default()
    }

    /// Keyword strings, in detection order.
    pub fn keyword_names(&self) -> Vec<String> {
        self.keywords.iter().map(|k| k.keyword.clone()).collect()
    }
}

impl Default for AudioBundle {
    fn default() -> Self {
        Self {
            text: String::new(),
            keywords: Vec::new(),
            energy_db: SILENCE_ENERGY_DB,
            speech_present: false,
        }
    }
}
