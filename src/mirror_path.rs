use std::path::PathBuf;

use crate::error::PageError;

/// Relative on-disk path for a URL path.
///
/// `/` becomes `index.html`; any other path gets `.html` appended after its
/// leading slashes are stripped, so `/a/b` becomes `a/b.html` and `/blog/`
/// becomes `blog/.html`. Distinct non-root paths never share a file.
pub fn mirror_path(url_path: &str) -> Result<PathBuf, PageError> {
    let trimmed = url_path.trim_start_matches('/');
    if trimmed.is_empty() {
        return Ok(PathBuf::from("index.html"));
    }

    let file = format!("{trimmed}.html");
    let mut path = PathBuf::new();
    for segment in file.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        if segment == ".." {
            return Err(PageError::UnsafePath(url_path.to_owned()));
        }
        path.push(segment);
    }
    Ok(path)
}
