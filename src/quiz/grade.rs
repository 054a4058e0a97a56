use sha2::{Digest, Sha256};

/// Minimum fraction of correct answers that earns a certificate.
pub const PASSING_THRESHOLD: f64 = 0.8;

/// Canonical form of an answer before hashing or comparison: surrounding
/// whitespace stripped, then lowercased. The grading code embedded in the
/// student app applies the same two steps in the same order.
pub fn normalize_answer(answer: &str) -> String {
    answer.trim().to_lowercase()
}

/// SHA-256 digest of the normalized answer, as lowercase hex.
pub fn answer_digest(answer: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(normalize_answer(answer).as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn meets_passing_threshold(score: usize, total: usize) -> bool {
    total > 0 && score as f64 / total as f64 >= PASSING_THRESHOLD
}
