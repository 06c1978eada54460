use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use futures_util::FutureExt;
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::resolver::AnswerStatus;
use crate::state::AppState;

const APOLOGY: &str = "I apologize, but I'm having trouble processing your question right now. Please try again or check out the traditional portfolio page.";

#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub answer: String,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatQuery>,
) -> Json<ChatResponse> {
    let span = tracing::info_span!("chat", request_id = %Uuid::new_v4());
    Json(answer_question(&state, &payload.question).instrument(span).await)
}

async fn answer_question(state: &AppState, question: &str) -> ChatResponse {
    tracing::info!("Question: {}", question);
    let mode = if state.resolver.rag_enabled() { "rag" } else { "mock" };

    // last line of defense: the resolver itself never returns an error
    let outcome = AssertUnwindSafe(state.resolver.resolve(question))
        .catch_unwind()
        .await;

    match outcome {
        Ok(answer) if answer.status == AnswerStatus::Error => ChatResponse {
            answer: answer.text,
            status: answer.status.as_str(),
            mode: None,
            error: None,
        },
        Ok(answer) => {
            tracing::info!(
                provenance = ?answer.provenance,
                "Answered in {} mode ({} chars)",
                mode,
                answer.text.len()
            );
            ChatResponse {
                answer: answer.text,
                status: answer.status.as_str(),
                mode: Some(mode),
                error: None,
            }
        }
        Err(panic) => {
            let message = panic_message(panic.as_ref());
            tracing::error!("Chat handler recovered from panic: {}", message);
            ChatResponse {
                answer: APOLOGY.to_string(),
                status: AnswerStatus::Error.as_str(),
                mode: None,
                error: Some(message),
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return message.to_string();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "unexpected internal error".to_string()
}
