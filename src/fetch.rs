//! Repository fetching
//!
//! The pipeline only needs one thing from a fetcher: turn a location string
//! into a working tree inside an empty directory. [`GitFetcher`] does that
//! with a full `gix` clone of the default branch.

use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("repository location is empty")]
    EmptyLocation,

    #[error("failed to clone repository '{url}': {source}")]
    Clone {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("failed to check out '{url}': {source}")]
    Checkout {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Populates an empty directory with a repository's working tree.
pub trait RepositoryFetcher: Send + Sync {
    fn fetch(&self, location: &str, dest: &Path) -> Result<(), FetchError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GitFetcher;

impl GitFetcher {
    pub fn new() -> Self {
        Self
    }
}

impl RepositoryFetcher for GitFetcher {
    fn fetch(&self, location: &str, dest: &Path) -> Result<(), FetchError> {
        let url = location.trim();
        if url.is_empty() {
            return Err(FetchError::EmptyLocation);
        }

        info!(url, dest = %dest.display(), "Cloning repository");

        let mut prepared = gix::prepare_clone(url, dest).map_err(|e| FetchError::Clone {
            url: url.to_string(),
            source: Box::new(e),
        })?;

        let (mut checkout, _outcome) = prepared
            .fetch_then_checkout(gix::progress::Discard, &gix::interrupt::IS_INTERRUPTED)
            .map_err(|e| FetchError::Clone {
                url: url.to_string(),
                source: Box::new(e),
            })?;

        checkout
            .main_worktree(gix::progress::Discard, &gix::interrupt::IS_INTERRUPTED)
            .map_err(|e| FetchError::Checkout {
                url: url.to_string(),
                source: Box::new(e),
            })?;

        Ok(())
    }
}
