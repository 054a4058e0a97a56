use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of quiz being generated. Decides how question lines are parsed and
/// which input widget the student app builds per question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuizType {
    #[default]
    MultipleChoice,
    TextAnswer,
}

impl QuizType {
    /// Label embedded in the student app, which switches widgets on it.
    pub fn label(&self) -> &'static str {
        match self {
            QuizType::MultipleChoice => "Multiple Choice",
            QuizType::TextAnswer => "Text Answer",
        }
    }
}

/// One parsed question. The correct answer only survives as its digest;
/// `options` is present for multiple choice only and its order is the
/// order the instructor wrote the fields in.
#[derive(Debug, Serialize)]
pub struct QuestionRecord {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub answer_hash: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("required field `{0}` is empty")]
    MissingField(&'static str),
}

/// Raw instructor form fields, as read from the request file.
#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub title: String,
    pub instructor: String,
    #[serde(default)]
    pub quiz_type: QuizType,
    /// One question per line, comma-separated fields.
    pub questions: String,
}

impl QuizRequest {
    /// Blocking validation. No generation may start while any required
    /// field is blank.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.title.trim().is_empty() {
            return Err(FormError::MissingField("title"));
        }
        if self.instructor.trim().is_empty() {
            return Err(FormError::MissingField("instructor"));
        }
        if self.questions.trim().is_empty() {
            return Err(FormError::MissingField("questions"));
        }
        Ok(())
    }
}

/// A validated, parsed quiz: everything the template emitter needs.
#[derive(Debug)]
pub struct QuizConfig {
    pub title: String,
    pub instructor: String,
    pub quiz_type: QuizType,
    pub questions: Vec<QuestionRecord>,
}
