use log::debug;

use super::grade::answer_digest;
use super::question::{QuestionRecord, QuizType};

/// Result of one parsing pass: the records that were built plus the number
/// of non-empty lines that had too few fields to form a question.
#[derive(Debug)]
pub struct ParsedQuestions {
    pub records: Vec<QuestionRecord>,
    pub skipped: usize,
}

/// Builds question records from line-oriented instructor input.
///
/// One question per line, fields separated by commas and trimmed. Multiple
/// choice needs `question,option,...,correct` (at least 3 fields, correct
/// answer last); text answer needs `question,answer`. Undersized lines are
/// dropped and counted, never an error. The correct answer is digested
/// immediately and its plaintext discarded.
pub fn parse_questions(quiz_type: QuizType, text: &str) -> ParsedQuestions {
    let mut records = Vec::new();
    let mut skipped = 0;

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();

        let record = match quiz_type {
            QuizType::MultipleChoice => {
                if fields.len() < 3 {
                    debug!(
                        "line {}: {} field(s), multiple choice needs at least 3",
                        index + 1,
                        fields.len()
                    );
                    skipped += 1;
                    continue;
                }
                QuestionRecord {
                    question: fields[0].to_string(),
                    options: Some(
                        fields[1..fields.len() - 1]
                            .iter()
                            .map(|f| f.to_string())
                            .collect(),
                    ),
                    answer_hash: answer_digest(fields[fields.len() - 1]),
                }
            }
            QuizType::TextAnswer => {
                if fields.len() < 2 {
                    debug!(
                        "line {}: {} field(s), text answer needs at least 2",
                        index + 1,
                        fields.len()
                    );
                    skipped += 1;
                    continue;
                }
                QuestionRecord {
                    question: fields[0].to_string(),
                    options: None,
                    answer_hash: answer_digest(fields[1]),
                }
            }
        };
        records.push(record);
    }

    ParsedQuestions { records, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::grade::answer_digest;

    const PARIS_SHA256: &str = "1670f2e42fefa5044d59a65349e47c566009488fc57d7b4376dd5787b59e3c57";
    const FOUR_SHA256: &str = "4b227777d4dd1fc61c6f884f48641d02b4d121d3fd328cb08b5531fcacdabf8a";

    #[test]
    fn multiple_choice_line_keeps_middle_fields_as_options() {
        let parsed = parse_questions(
            QuizType::MultipleChoice,
            "What is the capital of France?, Paris , Rome , Paris",
        );
        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.records.len(), 1);

        let record = &parsed.records[0];
        assert_eq!(record.question, "What is the capital of France?");
        assert_eq!(
            record.options.as_deref(),
            Some(&["Paris".to_string(), "Rome".to_string()][..])
        );
        assert_eq!(record.answer_hash, PARIS_SHA256);
    }

    #[test]
    fn text_answer_line_has_no_options() {
        let parsed = parse_questions(QuizType::TextAnswer, "What is 2+2?,4");
        assert_eq!(parsed.records.len(), 1);

        let record = &parsed.records[0];
        assert_eq!(record.question, "What is 2+2?");
        assert!(record.options.is_none());
        assert_eq!(record.answer_hash, FOUR_SHA256);
    }

    #[test]
    fn undersized_lines_are_dropped_and_counted() {
        let parsed = parse_questions(
            QuizType::MultipleChoice,
            "Only a question\nQ,answer\nQ,opt,answer\n",
        );
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.skipped, 2);

        let parsed = parse_questions(QuizType::TextAnswer, "Only a question\nQ,answer\n");
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn blank_lines_are_ignored_without_counting() {
        let parsed = parse_questions(QuizType::TextAnswer, "\n  \nQ,answer\n\n");
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn grading_round_trip_matches_stored_digest() {
        let parsed = parse_questions(QuizType::TextAnswer, "Capital of France?,Paris");
        let record = &parsed.records[0];
        // What a student would submit, modulo case and padding.
        assert_eq!(answer_digest("  PARIS "), record.answer_hash);
        assert_eq!(answer_digest("paris"), record.answer_hash);
    }

    #[test]
    fn extra_text_answer_fields_are_ignored() {
        let parsed = parse_questions(QuizType::TextAnswer, "Q,blue,stray");
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].answer_hash, answer_digest("blue"));
    }

    #[test]
    fn record_order_follows_input_order() {
        let parsed = parse_questions(QuizType::TextAnswer, "First?,a\nSecond?,b\nThird?,c");
        let questions: Vec<&str> = parsed
            .records
            .iter()
            .map(|r| r.question.as_str())
            .collect();
        assert_eq!(questions, ["First?", "Second?", "Third?"]);
    }
}
