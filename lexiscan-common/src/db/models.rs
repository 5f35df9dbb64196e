//! Shared database models
//!
//! One assessment record unifies four modality payloads (eye tracking,
//! speech, handwriting, quiz) under a single owner: either a registered
//! account or an anonymous guest identifier, never both.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public account profile returned by the auth endpoints.
///
/// Never carries the password hash; see [`StoredAccount`] for the
/// persistence-side shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i64,
    pub gender: String,
}

/// Stored account row including credential material
#[derive(Debug, Clone)]
pub struct StoredAccount {
    pub account: Account,
    pub password_hash: String,
}

/// Owner identity of an assessment record: exactly one of the two
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    /// Registered account guid
    Account(Uuid),
    /// Client-generated anonymous identifier
    Guest(String),
}

impl Owner {
    pub fn is_guest(&self) -> bool {
        matches!(self, Owner::Guest(_))
    }
}

/// Eye-tracking metrics with the externally computed risk judgment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EyeTrackingResult {
    pub total_fixations: i64,
    pub average_fixation_duration: f64,
    pub regression_count: i64,
    pub saccade_amplitude: f64,
    pub dyslexia_risk: String,
    pub risk_score: f64,
    pub comments: String,
}

/// Speech metrics with the externally computed risk judgment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpeechAnalysisResult {
    pub total_words: i64,
    pub mispronunciations: i64,
    pub speech_rate: f64,
    pub pauses: i64,
    pub clarity_score: f64,
    pub dyslexia_risk: String,
    pub risk_score: f64,
    pub comments: String,
}

/// Handwriting OCR comparison against the expected sentence
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HandwritingResult {
    pub expected_sentence: String,
    pub ocr_output: String,
    pub char_error_rate: f64,
    pub word_error_rate: f64,
    pub substitutions: i64,
    pub insertions: i64,
    pub deletions: i64,
    pub reversed_letters: i64,
    pub dysgraphia_risk: String,
    pub comments: String,
}

/// One answered quiz question
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizAnswer {
    pub question: String,
    pub selected_option: String,
    pub score: i64,
}

/// Quiz outcome with the ordered per-question answers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizResult {
    pub score: i64,
    pub total_questions: i64,
    pub answers: Vec<QuizAnswer>,
}

/// Combined eye + speech judgment supplied by the caller
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CombinedResult {
    pub score: f64,
    pub label: Option<String>,
}

/// One persisted assessment submission.
///
/// Records are immutable after creation: repeated submissions for the
/// same owner and test type insert independent records, never merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecord {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_id: Option<String>,
    pub is_guest: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye_tracking: Option<EyeTrackingResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_analysis: Option<SpeechAnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handwriting: Option<HandwritingResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz: Option<QuizResult>,
    pub overall_risk: String,
    pub created_at: DateTime<Utc>,
}

impl AssessmentRecord {
    /// Construct an empty record owned by `owner`, with a fresh id,
    /// creation timestamp, and the default "Pending" overall risk.
    pub fn new(owner: Owner) -> Self {
        let (user, guest_id, is_guest) = match owner {
            Owner::Account(id) => (Some(id), None, false),
            Owner::Guest(guest_id) => (None, Some(guest_id), true),
        };

        Self {
            id: Uuid::new_v4(),
            user,
            guest_id,
            is_guest,
            test_type: None,
            eye_tracking: None,
            speech_analysis: None,
            handwriting: None,
            quiz: None,
            overall_risk: "Pending".to_string(),
            created_at: Utc::now(),
        }
    }
}
