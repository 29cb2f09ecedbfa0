use std::{collections::HashSet, sync::LazyLock};

use ammonia::Builder;

// No tag or attribute survives; script and style lose their content too.
static CLEANER: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let mut builder = Builder::empty();
    builder
        .clean_content_tags(HashSet::from(["script", "style"]))
        .strip_comments(true);
    builder
});

/// Treats `raw` as plain text: strips all markup and trims the result.
///
/// The output is HTML-escaped, so it can be interpolated into an email body
/// as is. Sanitizing twice yields the same string as sanitizing once.
pub fn sanitize(raw: &str) -> String {
    CLEANER.clean(raw).to_string().trim().to_owned()
}

/// Like [`sanitize`], but with entities decoded back into characters.
///
/// The result holds no markup and is meant for addresses, subjects and
/// plain-text bodies; it must be escaped again before going into HTML.
pub fn sanitize_text(raw: &str) -> String {
    let cleaned = sanitize(raw);
    // ammonia only emits well-formed entities.
    match htmlescape::decode_html(&cleaned) {
        Ok(decoded) => decoded.trim().to_owned(),
        Err(_) => cleaned,
    }
}
