use crate::data_provider::{DataProvider, FetchOutcome};
use crate::error::{NhlError, NhlResult};
use tokio::sync::Mutex;
use tracing::info;

/// The one remembered response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFetch {
    pub url: String,
    pub last_modified: Option<String>,
    pub body: Vec<u8>,
}

/// One-entry conditional fetch cache.
///
/// Reserved for today's schedule, which is requested over and over while
/// games are in progress. The entry is keyed by the literal URL and replaced
/// by the next fresh download of any cacheable URL. There is no expiry: the
/// server's `Last-Modified` is the only freshness signal.
#[derive(Debug, Default)]
pub struct ConditionalCache {
    slot: Mutex<Option<CachedFetch>>,
}

impl ConditionalCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch `url` through `provider`.
    ///
    /// With `use_cache` off this is a plain download and the slot is left
    /// alone. With it on, the slot's `Last-Modified` is sent as
    /// `If-Modified-Since` when the slot holds this URL; a 304 returns the
    /// stored body and a fresh response replaces the entry. The slot lock is
    /// held for the whole exchange so a body is never paired with another
    /// response's URL.
    pub async fn fetch(
        &self,
        provider: &dyn DataProvider,
        url: &str,
        use_cache: bool,
    ) -> NhlResult<Vec<u8>> {
        if !use_cache {
            return match provider.get(url, None).await? {
                FetchOutcome::Fresh { body, .. } => {
                    info!("{} - 200", url);
                    Ok(body)
                }
                FetchOutcome::NotModified => Err(NhlError::fetch(
                    url,
                    "304 Not Modified without a conditional request",
                )),
            };
        }

        let mut slot = self.slot.lock().await;
        let since = slot
            .as_ref()
            .filter(|cached| cached.url == url)
            .and_then(|cached| cached.last_modified.clone());

        match provider.get(url, since.as_deref()).await? {
            FetchOutcome::NotModified => match slot.as_ref() {
                Some(cached) if since.is_some() => {
                    info!(
                        "{} - 304 (Last-Modified: {})",
                        url,
                        cached.last_modified.as_deref().unwrap_or("-")
                    );
                    Ok(cached.body.clone())
                }
                _ => Err(NhlError::fetch(
                    url,
                    "304 Not Modified without a conditional request",
                )),
            },
            FetchOutcome::Fresh {
                body,
                last_modified,
            } => {
                info!("{} - 200", url);
                *slot = Some(CachedFetch {
                    url: url.to_string(),
                    last_modified,
                    body: body.clone(),
                });
                Ok(body)
            }
        }
    }

    /// Snapshot of the current entry
    pub async fn entry(&self) -> Option<CachedFetch> {
        self.slot.lock().await.clone()
    }

    pub async fn clear(&self) {
        *self.slot.lock().await = None;
    }
}
