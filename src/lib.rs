#![forbid(unsafe_code)]

pub mod cli;
pub mod crawl;
pub mod error;
pub mod fetch;
pub mod links;
pub mod logging;
pub mod mirror_path;
