//! Slug, file name and storage path helpers.

/// Lower-cases the slug source and turns every space into a hyphen.
///
/// Nothing else is touched; charset problems are reported by [`is_valid_slug`].
#[inline]
pub fn normalize_slug(source: &str) -> String {
    source.to_lowercase().replace(' ', "-")
}

/// `^[a-z0-9-]+$`
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

/// Keeps only `[A-Za-z0-9.]`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '.')
        .collect()
}

/// `<folder>/<millis>-<sanitized name>`.
///
/// `fallback` names the blob when sanitizing leaves nothing behind.
pub fn storage_path(folder: &str, millis: i64, file_name: &str, fallback: &str) -> String {
    let sanitized = sanitize_file_name(file_name);
    let name = if sanitized.is_empty() {
        fallback
    } else {
        sanitized.as_str()
    };
    format!("{folder}/{millis}-{name}")
}

/// Bucket-relative path of a public asset URL: everything after the first
/// `/<bucket>/` marker. `None` for empty URLs or URLs outside the bucket.
pub fn extract_storage_path(url: &str, bucket: &str) -> Option<String> {
    if url.is_empty() || bucket.is_empty() {
        return None;
    }
    let marker = format!("/{bucket}/");
    let (_, path) = url.split_once(marker.as_str())?;
    // public URLs never carry a query, but signed ones would
    let path = path.split(['?', '#']).next().unwrap_or_default();
    (!path.is_empty()).then(|| path.to_string())
}
