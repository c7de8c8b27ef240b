use std::borrow::Cow;

/// Percent-encode everything outside the URI unreserved set (`A-Z a-z 0-9 - _ . ~`).
///
/// Not idempotent: an already encoded string gets its `%` encoded again, so
/// encode exactly once.
pub fn percent_encode(text: &str) -> Cow<'_, str> {
    urlencoding::encode(text)
}

/// Build a `mailto:` URI from an already encoded subject and body.
///
/// The recipient goes in verbatim. `cc` is encoded here and left out entirely
/// when `None`.
pub fn build_mailto(
    recipient: &str,
    subject_encoded: &str,
    body_encoded: &str,
    cc: Option<&str>,
) -> String {
    let mut uri = format!("mailto:{recipient}?subject={subject_encoded}&body={body_encoded}");
    if let Some(cc) = cc {
        uri.push_str("&cc=");
        uri.push_str(&percent_encode(cc));
    }
    uri
}
