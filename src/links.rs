use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

const ASSET_EXTENSIONS: &[&str] = &[".css", ".js", ".png", ".jpg", ".ico", ".woff2"];

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid anchor selector"));
static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("valid body selector"));

/// Why an `href` was not followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotSameOriginAbsolute,
    Fragment,
    Asset,
    ProtocolRelative,
    Root,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::NotSameOriginAbsolute => "not a same-origin absolute path",
            SkipReason::Fragment => "contains fragment",
            SkipReason::Asset => "static asset",
            SkipReason::ProtocolRelative => "protocol-relative",
            SkipReason::Root => "root or empty path",
        }
    }
}

/// Returns true when the document carries something worth saving.
pub fn has_body(html: &str, document: &Html) -> bool {
    !html.trim().is_empty() && document.select(&BODY_SELECTOR).next().is_some()
}

/// All `href` values of anchors, in document order.
pub fn anchor_hrefs(document: &Html) -> Vec<String> {
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::to_owned)
        .collect()
}

/// Maps an `href` to the URL path to crawl, or the reason it is ignored.
pub fn followable_path(origin: &Url, href: &str) -> Result<String, SkipReason> {
    if !href.starts_with('/') {
        return Err(SkipReason::NotSameOriginAbsolute);
    }
    if href.contains('#') {
        return Err(SkipReason::Fragment);
    }
    if ASSET_EXTENSIONS.iter().any(|ext| href.ends_with(ext)) {
        return Err(SkipReason::Asset);
    }
    if href.starts_with("//") {
        return Err(SkipReason::ProtocolRelative);
    }

    let Ok(mut resolved) = origin.join(href) else {
        return Err(SkipReason::NotSameOriginAbsolute);
    };
    // `/\host/...` resolves to another host for http(s) URLs.
    if resolved.origin() != origin.origin() {
        return Err(SkipReason::NotSameOriginAbsolute);
    }
    resolved.set_query(None);
    resolved.set_fragment(None);

    let path = resolved.path();
    if path.is_empty() || path == "/" {
        return Err(SkipReason::Root);
    }
    Ok(path.to_owned())
}
