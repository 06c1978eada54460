/// Which path produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    Pipeline,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStatus {
    Success,
    Error,
}

impl AnswerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerStatus::Success => "success",
            AnswerStatus::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub text: String,
    pub provenance: Provenance,
    pub status: AnswerStatus,
}

impl Answer {
    pub fn from_pipeline(text: String) -> Self {
        Self {
            text,
            provenance: Provenance::Pipeline,
            status: AnswerStatus::Success,
        }
    }

    pub fn from_fallback(text: String) -> Self {
        Self {
            text,
            provenance: Provenance::Fallback,
            status: AnswerStatus::Success,
        }
    }

    pub fn invalid_question() -> Self {
        Self {
            text: INVALID_QUESTION_ANSWER.to_string(),
            provenance: Provenance::Fallback,
            status: AnswerStatus::Error,
        }
    }
}

pub const INVALID_QUESTION_ANSWER: &str = "Please provide a valid question.";
