//! Assessment result submission and retrieval
//!
//! Normalizes four modality payload shapes into one record per
//! submission. Every call inserts a new record keyed to exactly one
//! owner; records are never merged or updated.

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use lexiscan_common::db::models::{
    AssessmentRecord, CombinedResult, EyeTrackingResult, HandwritingResult, Owner, QuizAnswer,
    QuizResult, SpeechAnalysisResult,
};
use lexiscan_common::Error;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;
use uuid::Uuid;

use super::ApiError;
use crate::{api::auth::authorize_account, db, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default)]
    pub user: Option<Uuid>,
    #[serde(default)]
    pub guest_id: Option<String>,
    #[serde(flatten)]
    pub payload: SubmitPayload,
}

/// Modality payloads keyed by the testType discriminator.
///
/// Missing sub-payloads default to empty structures; a submission never
/// fails because a modality field is absent.
#[derive(Debug, Deserialize)]
#[serde(tag = "testType")]
pub enum SubmitPayload {
    #[serde(rename = "eyeSpeech", rename_all = "camelCase")]
    EyeSpeech {
        #[serde(default)]
        eye_result: EyeTrackingResult,
        #[serde(default)]
        speech_result: SpeechAnalysisResult,
        #[serde(default)]
        combined_result: Option<CombinedResult>,
    },
    #[serde(rename = "handwriting")]
    Handwriting {
        #[serde(default)]
        data: HandwritingData,
    },
    #[serde(rename = "quiz")]
    Quiz {
        #[serde(default)]
        data: QuizData,
    },
    /// Unrecognized testType values still produce an identity-only record
    #[serde(other)]
    Unknown,
}

/// Flat handwriting payload as submitted by the client (snake_case keys
/// from the OCR service), mapped into the stored camelCase structure.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HandwritingData {
    pub expected: String,
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

impl Default for HandwritingData {
    fn default() -> Self {
        Self {
            expected: String::new(),
            ocr_output: String::new(),
            char_error_rate: 0.0,
            word_error_rate: 0.0,
            substitutions: 0,
            insertions: 0,
            deletions: 0,
            reversed_letters: 0,
            dysgraphia_risk: "Unknown".to_string(),
            comments: String::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizData {
    pub score: i64,
    pub total_questions: i64,
    pub answers: Vec<QuizAnswer>,
    pub overall_risk: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestsQuery {
    pub user_id: Option<Uuid>,
    pub guest_id: Option<String>,
}

/// Resolve the owner identity of a request: the account reference wins
/// when both are supplied, and account references require a matching
/// bearer token.
fn resolve_owner(
    state: &AppState,
    headers: &HeaderMap,
    user: Option<Uuid>,
    guest_id: Option<String>,
    missing_msg: &str,
) -> Result<Owner, ApiError> {
    match (user, guest_id) {
        (Some(account_id), _) => {
            authorize_account(state, headers, account_id)?;
            Ok(Owner::Account(account_id))
        }
        (None, Some(guest_id)) => Ok(Owner::Guest(guest_id)),
        (None, None) => Err(Error::Validation(missing_msg.to_string()).into()),
    }
}

/// POST /tests
///
/// Persists exactly one new record and returns it, including the
/// generated id and timestamp. Identity-less calls fail before any
/// persistence attempt.
pub async fn submit_test(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<Value>, ApiError> {
    let owner = resolve_owner(
        &state,
        &headers,
        req.user,
        req.guest_id,
        "User or guestId required",
    )?;

    let mut record = AssessmentRecord::new(owner);

    match req.payload {
        SubmitPayload::EyeSpeech {
            eye_result,
            speech_result,
            combined_result,
        } => {
            record.test_type = Some("eyeSpeech".to_string());
            record.eye_tracking = Some(eye_result);
            record.speech_analysis = Some(speech_result);
            if let Some(label) = combined_result.and_then(|c| c.label) {
                record.overall_risk = label;
            }
        }
        SubmitPayload::Handwriting { data } => {
            record.test_type = Some("handwriting".to_string());
            record.handwriting = Some(HandwritingResult {
                expected_sentence: data.expected,
                ocr_output: data.ocr_output,
                char_error_rate: data.char_error_rate,
                word_error_rate: data.word_error_rate,
                substitutions: data.substitutions,
                insertions: data.insertions,
                deletions: data.deletions,
                reversed_letters: data.reversed_letters,
                dysgraphia_risk: data.dysgraphia_risk,
                comments: data.comments,
            });
        }
        SubmitPayload::Quiz { data } => {
            record.test_type = Some("quiz".to_string());
            if let Some(label) = data.overall_risk {
                record.overall_risk = label;
            }
            record.quiz = Some(QuizResult {
                score: data.score,
                total_questions: data.total_questions,
                answers: data.answers,
            });
        }
        SubmitPayload::Unknown => {
            warn!("Unrecognized testType in submission; storing identity-only record");
        }
    }

    db::assessments::insert_record(&state.db, &record).await?;

    Ok(Json(json!({
        "message": "Test results saved successfully",
        "testEntry": record,
    })))
}

/// GET /tests?userId=|guestId=
///
/// Returns the full matching sequence, most recent first. The two
/// identity spaces never overlap in a single query.
pub async fn get_tests(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<TestsQuery>,
) -> Result<Json<Value>, ApiError> {
    let owner = resolve_owner(
        &state,
        &headers,
        query.user_id,
        query.guest_id,
        "userId or guestId query param required",
    )?;

    let tests = db::assessments::list_by_owner(&state.db, &owner).await?;

    Ok(Json(json!({ "tests": tests })))
}
