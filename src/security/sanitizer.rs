//! Best-effort character stripping applied to admitted queries.

/// Removes every `'`, `"`, and `;` from the input, preserving the order of
/// all other characters.
///
/// Applied only after the admission decision: it changes what reaches the
/// executor, never whether a request was blocked. Total and idempotent.
pub fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\'' | '"' | ';'))
        .collect()
}
