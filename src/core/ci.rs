// ─── CI Host Reporting ───
// GitHub workflow commands written to stdout.

/// Escape a message for use as workflow command data.
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// `::error::<message>`, which fails the step with a visible annotation.
pub fn error_annotation(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}
