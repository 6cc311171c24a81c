//! Submission classification policy
//!
//! Decides whether a chat submission is fresh notes to process or feedback
//! to refine the current list with. The rule is a heuristic: anything that
//! looks like pasted notes (long, or containing a paragraph break) starts a
//! new extraction, short follow-ups adjust the existing one. It lives here
//! as a standalone policy function so it can be swapped or tested without
//! touching transport code.

/// Refinements are only inferred for submissions at or under this many
/// characters (Unicode scalar values).
pub const REFINE_MAX_CHARS: usize = 200;

/// A paragraph break inside a submission marks it as pasted notes.
pub const PARAGRAPH_BREAK: &str = "\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    /// Fresh notes: run full extraction.
    Process,
    /// Feedback against the previously extracted items.
    Refine,
}

/// Classify a trimmed, non-empty submission.
///
/// The first submission of a session is always processed. After that, a
/// submission is still processed when it exceeds [`REFINE_MAX_CHARS`] or
/// contains a blank line; everything else refines.
pub fn classify(text: &str, has_processed: bool) -> SubmissionKind {
    if !has_processed
        || text.chars().count() > REFINE_MAX_CHARS
        || text.contains(PARAGRAPH_BREAK)
    {
        SubmissionKind::Process
    } else {
        SubmissionKind::Refine
    }
}
