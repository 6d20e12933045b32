use clap::Parser;

pub const DEFAULT_BASE_URL: &str = "http://localhost:9292";
pub const DEFAULT_OUT_DIR: &str = "_site";

#[derive(Debug, Parser)]
#[command(author, version, about = "Mirror a running site to static HTML files")]
pub struct Cli {
    /// Origin of the site to mirror (must be http/https).
    #[arg(long, env = "BLOG_URL", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Output directory for mirrored pages.
    #[arg(long, default_value = DEFAULT_OUT_DIR)]
    pub out: String,

    /// Path the crawl starts from.
    #[arg(long, default_value = "/")]
    pub start: String,
}
