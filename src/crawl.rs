use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use scraper::Html;
use url::Url;

use crate::cli::Cli;
use crate::error::PageError;
use crate::fetch::Fetcher;
use crate::links::{anchor_hrefs, followable_path, has_body};
use crate::mirror_path::mirror_path;

/// Result of visiting one page.
#[derive(Debug)]
pub enum PageOutcome {
    /// Body written to `path` (relative to the output dir); `links` are the
    /// same-origin paths found in it, already filtered.
    Saved { path: PathBuf, links: Vec<String> },
    /// Nothing to save and nothing to follow.
    Empty,
}

/// Relative paths written during one run, in save order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    pub saved: Vec<PathBuf>,
}

/// Depth-first mirror of one origin. Holds the visited set for a single run.
#[derive(Debug)]
pub struct Crawler {
    fetcher: Fetcher,
    origin: Url,
    out_dir: PathBuf,
    visited: HashSet<String>,
    report: CrawlReport,
}

impl Crawler {
    /// Creates the output directory if it does not exist yet.
    pub fn new(base_url: &str, out_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let origin = parse_origin(base_url)?;
        let out_dir = out_dir.into();
        std::fs::create_dir_all(&out_dir)
            .with_context(|| format!("create output dir: {}", out_dir.display()))?;

        Ok(Self {
            fetcher: Fetcher::new()?,
            origin,
            out_dir,
            visited: HashSet::new(),
            report: CrawlReport::default(),
        })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Mirrors `start` and everything reachable from it. Page failures are
    /// logged and end only their own branch.
    pub fn run(mut self, start: &str) -> anyhow::Result<CrawlReport> {
        if !start.starts_with('/') {
            anyhow::bail!("start path must begin with '/': {start}");
        }
        self.visited.insert(start.to_owned());
        self.crawl(start);
        Ok(self.report)
    }

    /// Depth-first walk over an explicit stack of link iterators, one frame
    /// per saved page. Link chains of any length stay off the call stack.
    fn crawl(&mut self, start: &str) {
        let mut stack: Vec<std::vec::IntoIter<String>> = Vec::new();
        if let Some(links) = self.crawl_page(start) {
            stack.push(links.into_iter());
        }

        while let Some(frame) = stack.last_mut() {
            let Some(link) = frame.next() else {
                stack.pop();
                continue;
            };
            if !self.mark_visited(&link) {
                tracing::debug!(path = %link, "already queued");
                continue;
            }
            if let Some(links) = self.crawl_page(&link) {
                stack.push(links.into_iter());
            }
        }
    }

    /// Visits one page and returns the links to follow, or `None` when the
    /// branch ends here.
    fn crawl_page(&mut self, path: &str) -> Option<Vec<String>> {
        match self.visit(path) {
            Ok(PageOutcome::Saved { path, links }) => {
                tracing::info!(path = %path.display(), "saved");
                self.report.saved.push(path);
                Some(links)
            }
            Ok(PageOutcome::Empty) => {
                tracing::debug!(path, "no document body; branch ends");
                None
            }
            Err(PageError::NotFound { url }) => {
                tracing::warn!(%url, "not found");
                None
            }
            Err(err) => {
                tracing::warn!(path, error = %err, "page failed");
                None
            }
        }
    }

    /// Fetches, saves and parses one page.
    pub fn visit(&self, path: &str) -> Result<PageOutcome, PageError> {
        let url = self.page_url(path)?;
        tracing::info!(%url, "crawling");

        let body = self.fetcher.get(&url)?;
        let html = String::from_utf8_lossy(&body);
        let document = Html::parse_document(&html);
        if !has_body(&html, &document) {
            return Ok(PageOutcome::Empty);
        }

        let relative = mirror_path(url.path())?;
        write_page(&self.out_dir.join(&relative), &body)?;

        let links = anchor_hrefs(&document)
            .into_iter()
            .filter_map(|href| match followable_path(&self.origin, &href) {
                Ok(link) => Some(link),
                Err(reason) => {
                    tracing::debug!(%href, reason = reason.as_str(), "skip link");
                    None
                }
            })
            .collect();

        Ok(PageOutcome::Saved {
            path: relative,
            links,
        })
    }

    /// Check-and-mark. Returns false when `path` was already seen.
    fn mark_visited(&mut self, path: &str) -> bool {
        self.visited.insert(path.to_owned())
    }

    fn page_url(&self, path: &str) -> Result<Url, PageError> {
        let mut url = self.origin.clone();
        let (path_only, query) = match path.split_once('?') {
            Some((path_only, query)) => (path_only, Some(query)),
            None => (path, None),
        };
        if !path_only.starts_with('/') {
            return Err(PageError::UnsafePath(path.to_owned()));
        }
        url.set_path(path_only);
        url.set_query(query);
        Ok(url)
    }
}

/// Runs one full crawl as configured on the command line.
pub fn run(cli: Cli) -> anyhow::Result<CrawlReport> {
    let crawler = Crawler::new(&cli.url, &cli.out).context("set up crawler")?;
    println!("Generating static site from {}...", origin_str(crawler.origin()));

    let out_dir = crawler.out_dir().to_path_buf();
    let report = crawler.run(&cli.start).context("crawl")?;

    tracing::info!(pages = report.saved.len(), "crawl finished");
    println!(
        "\nDone! Static site saved to {}/",
        out_dir.display().to_string().trim_end_matches('/')
    );
    Ok(report)
}

/// Keeps scheme, host and port of `base_url`.
pub fn parse_origin(base_url: &str) -> anyhow::Result<Url> {
    let mut url = Url::parse(base_url).with_context(|| format!("parse base url: {base_url}"))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        anyhow::bail!("base url must be http/https: {url}");
    }
    if url.host_str().is_none() {
        anyhow::bail!("base url must have host: {url}");
    }
    url.set_path("/");
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn origin_str(origin: &Url) -> String {
    origin.as_str().trim_end_matches('/').to_owned()
}

fn write_page(path: &Path, body: &[u8]) -> Result<(), PageError> {
    let write_error = |source: std::io::Error| PageError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent_dir) = path.parent() {
        std::fs::create_dir_all(parent_dir).map_err(write_error)?;
    }
    std::fs::write(path, body).map_err(write_error)?;
    Ok(())
}
