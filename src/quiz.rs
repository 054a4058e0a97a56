mod certificate;
mod grade;
mod parse;
mod question;
mod template;

pub use certificate::{render_certificate, Certificate, CertificateError, CertificateRequest};
pub use grade::{answer_digest, meets_passing_threshold, normalize_answer, PASSING_THRESHOLD};
pub use parse::{parse_questions, ParsedQuestions};
pub use question::{FormError, QuestionRecord, QuizConfig, QuizRequest, QuizType};
pub use template::{render_student_script, TemplateError};
