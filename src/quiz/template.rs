use std::collections::BTreeMap;

use regex::Regex;
use thiserror::Error;

use super::grade::PASSING_THRESHOLD;
use super::question::QuizConfig;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("failed to encode question records: {0}")]
    EncodeQuestions(#[from] serde_json::Error),

    #[error("template references unknown placeholder `{0}`")]
    UnknownPlaceholder(String),
}

/// Renders the standalone student app from a quiz config.
///
/// Pure substitution of named slots into a fixed template; the output is
/// byte-identical across calls with the same config. Instructor-supplied
/// text is escaped for the Python string literals it lands in, so
/// delimiter-bearing titles cannot corrupt the emitted script.
pub fn render_student_script(config: &QuizConfig) -> Result<String, TemplateError> {
    let mut slots: BTreeMap<&str, String> = BTreeMap::new();
    slots.insert("title", escape_py_literal(&config.title));
    slots.insert("instructor", escape_py_literal(&config.instructor));
    slots.insert("quiz_type", config.quiz_type.label().to_string());
    slots.insert("questions", serde_json::to_string(&config.questions)?);
    slots.insert("passing_threshold", PASSING_THRESHOLD.to_string());

    fill_template(STUDENT_APP_TEMPLATE, &slots)
}

/// Substitutes every `{{name}}` placeholder in one left-to-right pass, so
/// substituted values are never rescanned for placeholders. A placeholder
/// with no matching slot is a hard error, not silently left in the output.
fn fill_template(template: &str, slots: &BTreeMap<&str, String>) -> Result<String, TemplateError> {
    let placeholder = Regex::new(r"\{\{([a-z_]+)\}\}").unwrap();

    let mut output = String::with_capacity(template.len());
    let mut cursor = 0;
    for captures in placeholder.captures_iter(template) {
        let matched = captures.get(0).unwrap();
        let name = &captures[1];
        let value = slots
            .get(name)
            .ok_or_else(|| TemplateError::UnknownPlaceholder(name.to_string()))?;
        output.push_str(&template[cursor..matched.start()]);
        output.push_str(value);
        cursor = matched.end();
    }
    output.push_str(&template[cursor..]);

    Ok(output)
}

/// Escapes text for interpolation inside a double-quoted Python string
/// literal.
fn escape_py_literal(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// The student-facing quiz app, emitted for a separate Python environment
/// (a Google Colab cell). Contains its own certificate renderer and grading
/// routine; the only quiz-specific parts are the `{{...}}` slots.
const STUDENT_APP_TEMPLATE: &str = r###"!pip install gradio reportlab
# --- Generated Quiz App ---
# Copy and paste this entire code block into a single Google Colab cell and run it.

import gradio as gr
import uuid, os, tempfile, hashlib
from reportlab.lib.pagesizes import A5, landscape
from reportlab.pdfgen import canvas
from reportlab.lib.units import mm
from reportlab.lib.colors import HexColor
from datetime import datetime

# Certificate generation function (included for a self-contained script)
def generate_certificate(name, score, total, instructor="{{instructor}}"):
    unique_id = str(uuid.uuid4())
    filename = f"cert_{unique_id}.pdf"
    filepath = os.path.join(tempfile.gettempdir(), filename)
    c = canvas.Canvas(filepath, pagesize=landscape(A5))
    width, height = landscape(A5)
    c.setFillColor(HexColor("#fffdf6"))
    c.rect(0, 0, width, height, stroke=0, fill=1)
    c.setStrokeColor(HexColor("#001858"))
    c.setLineWidth(3)
    margin = 10 * mm
    c.rect(margin, margin, width - 2 * margin, height - 2 * margin)
    c.setFillColor(HexColor("#001858"))
    c.setFont("Helvetica-Bold", 24)
    c.drawCentredString(width / 2, height - 60, "Certificate of Completion")
    c.setFont("Helvetica", 14)
    c.drawCentredString(width / 2, height - 100, "This is awarded to")
    c.setFont("Helvetica-Bold", 18)
    c.drawCentredString(width / 2, height - 130, name)
    c.setFont("Helvetica", 14)
    c.drawCentredString(width / 2, height - 160, "For successfully completing the quiz")
    c.setFont("Helvetica", 12)
    c.drawCentredString(width / 2, height - 185, f"Score: {score} / {total}")
    c.setFont("Helvetica-Oblique", 10)
    c.drawString(margin + 10, margin + 20, f"Instructor: {instructor}")
    date_str = datetime.now().strftime("%d %B %Y")
    c.setFont("Helvetica", 10)
    c.drawRightString(width - margin - 10, margin + 20, f"Issued on: {date_str}")
    c.save()
    return filepath

# Quiz data (answers are hashed)
quiz_type = "{{quiz_type}}"
questions = {{questions}}

def eval_quiz(name, *answers):
    if not name.strip():
        name = "Anonymous"
    score = 0
    for i, ans in enumerate(answers):
        if ans and hashlib.sha256(str(ans).strip().lower().encode()).hexdigest() == questions[i]["answer_hash"]:
            score += 1

    total_questions = len(questions)
    passing_threshold = {{passing_threshold}}

    result_message = f"Hi {name}, your score is: {score} / {total_questions}."
    cert_path = None

    if total_questions > 0 and (score / total_questions) >= passing_threshold:
        cert_path = generate_certificate(name, score, total_questions, instructor="{{instructor}}")
        result_message += " Congratulations, you passed and earned a certificate!"
    else:
        result_message += " A score of 80% is required to receive a certificate."

    return result_message, cert_path

# Gradio interface for the student
with gr.Blocks(theme=gr.themes.Soft()) as app:
    gr.Markdown("## {{title}}")

    with gr.Row():
        name = gr.Textbox(label="Enter Your Full Name to Generate Certificate", placeholder="e.g., Ada Lovelace")

    answer_inputs = []
    for q in questions:
        gr.Markdown("**Question:** " + q["question"])
        if quiz_type == "Multiple Choice":
            answer_inputs.append(gr.Radio(choices=q["options"], label="Select your answer"))
        else:
            answer_inputs.append(gr.Textbox(label="Type your answer"))

    submit_btn = gr.Button("Submit Quiz")

    with gr.Row():
        result_output = gr.Textbox(label="Your Result")
        certificate_output = gr.File(label="Download Your Certificate")

    submit_btn.click(
        fn=eval_quiz,
        inputs=[name] + answer_inputs,
        outputs=[result_output, certificate_output],
    )

app.launch(debug=True)
"###;

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::quiz::parse::parse_questions;
    use crate::quiz::question::QuizType;

    fn config(quiz_type: QuizType, questions_text: &str) -> QuizConfig {
        QuizConfig {
            title: "Python Basics Quiz".to_string(),
            instructor: "Dr. Ada Lovelace".to_string(),
            quiz_type,
            questions: parse_questions(quiz_type, questions_text).records,
        }
    }

    #[test]
    fn renders_all_slots() {
        let config = config(QuizType::MultipleChoice, "Capital of France?,Paris,Rome,Paris");
        let script = render_student_script(&config).unwrap();

        assert!(script.starts_with("!pip install gradio reportlab"));
        assert!(script.contains("gr.Markdown(\"## Python Basics Quiz\")"));
        assert!(script.contains("instructor=\"Dr. Ada Lovelace\""));
        assert!(script.contains("quiz_type = \"Multiple Choice\""));
        assert!(script.contains("passing_threshold = 0.8"));
        assert!(script.contains("\"question\":\"Capital of France?\""));
        assert!(script.contains("\"options\":[\"Paris\",\"Rome\"]"));
        // The plaintext answer must not survive outside the option list.
        assert!(!script.contains("answer\":\"Paris\""));
        assert!(!script.contains("{{"));
    }

    #[test]
    fn text_answer_quiz_embeds_no_options() {
        let config = config(QuizType::TextAnswer, "What is 2+2?,4");
        let script = render_student_script(&config).unwrap();

        assert!(script.contains("quiz_type = \"Text Answer\""));
        assert!(!script.contains("\"options\":"));
        assert!(script.contains(
            "\"answer_hash\":\"4b227777d4dd1fc61c6f884f48641d02b4d121d3fd328cb08b5531fcacdabf8a\""
        ));
    }

    #[test]
    fn rendering_is_idempotent() {
        let config = config(QuizType::MultipleChoice, "Q,a,b,a\nR,c,d,c");
        let first = render_student_script(&config).unwrap();
        let second = render_student_script(&config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn instructor_text_is_escaped_for_python_literals() {
        let mut config = config(QuizType::TextAnswer, "Q,a");
        config.title = "A \"quoted\" title\\with slash".to_string();
        config.instructor = "Line\nBreak".to_string();
        let script = render_student_script(&config).unwrap();

        assert!(script.contains("## A \\\"quoted\\\" title\\\\with slash"));
        assert!(script.contains("instructor=\"Line\\nBreak\""));
        // The raw newline must not land inside a Python literal.
        assert!(!script.contains("instructor=\"Line\nBreak\""));
    }

    #[test]
    fn unknown_placeholder_is_rejected() {
        let slots = BTreeMap::from([("known", "value".to_string())]);
        let err = fill_template("prefix {{known}} {{missing}}", &slots).unwrap_err();
        assert!(matches!(
            err,
            TemplateError::UnknownPlaceholder(name) if name == "missing"
        ));
    }

    #[test]
    fn fill_template_does_not_rescan_substituted_values() {
        let slots = BTreeMap::from([("q", "looks like {{a_slot}}".to_string())]);
        let filled = fill_template("data = {{q}}", &slots).unwrap();
        assert_eq!(filled, "data = looks like {{a_slot}}");
    }
}
