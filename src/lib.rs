//! Download the sequentially numbered page images of one manga chapter from
//! a supported website and bundle them into a `.cbt` comic book archive.
//!
//! The flow is strictly linear: look up the site's rules by hostname, fetch
//! the chapter page, extract the manga name and the first image URL, derive
//! an infinite page URL sequence from that sample, download pages until the
//! first non-success response, then archive the result.

pub mod archiver;
pub mod downloader;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod pipeline;
pub mod rulebook;
pub mod urlgen;
