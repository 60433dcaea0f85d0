use std::sync::Arc;

use crate::config::{StorageBackend, StorageConfig};
use crate::error::{AppError, Result};

pub mod public;
pub mod signed;

pub use public::PublicUrlResolver;
pub use signed::SignedUrlResolver;

/// Turns a stored file reference (a storage key such as
/// `fee_structures/grade-4.pdf`, or an absolute URL) into a URL a browser can
/// fetch.
pub trait FileResolver: Send + Sync {
    fn name(&self) -> &str;

    fn resolve(&self, reference: &str) -> Result<String>;

    /// Whether a request for `key` carrying the given query parameters may be
    /// served from local media. Public storage admits everything.
    fn permits(&self, _key: &str, _expires: Option<&str>, _signature: Option<&str>, _now: i64) -> bool {
        true
    }

    /// Resolution failures degrade to `None` so one bad reference never fails
    /// a whole listing.
    fn resolve_optional(&self, reference: Option<&str>) -> Option<String> {
        let reference = reference.map(str::trim).filter(|r| !r.is_empty())?;
        match self.resolve(reference) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(
                    resolver = self.name(),
                    reference,
                    "Failed to resolve file reference: {:?}",
                    e
                );
                None
            }
        }
    }
}

pub fn is_absolute_url(reference: &str) -> bool {
    reference.starts_with("https://") || reference.starts_with("http://")
}

/// Percent-encodes each path segment of a storage key, keeping the slashes.
pub fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Joins a storage key onto a base URL, tolerating stray slashes on either side.
/// The key is percent-encoded; the base URL is used as given.
pub fn join_url(base_url: &str, key: &str) -> Result<String> {
    let base = base_url.trim_end_matches('/');
    if !is_absolute_url(base) {
        return Err(AppError::Storage(format!(
            "storage base URL must be absolute, got {:?}",
            base_url
        )));
    }
    Ok(format!("{}/{}", base, encode_key(key.trim_start_matches('/'))))
}

pub fn build_resolver(config: &StorageConfig) -> Result<Arc<dyn FileResolver>> {
    match config.backend {
        StorageBackend::Public => {
            tracing::info!("Serving stored files through public URLs");
            Ok(Arc::new(PublicUrlResolver::new(config.base_url.clone())))
        }
        StorageBackend::Signed => {
            let secret = config.signing_secret.clone().ok_or_else(|| {
                AppError::Internal("signed storage backend requires storage.signing_secret".to_string())
            })?;
            tracing::info!(ttl_secs = config.url_ttl_secs, "Serving stored files through signed URLs");
            Ok(Arc::new(SignedUrlResolver::new(
                config.base_url.clone(),
                secret,
                config.url_ttl_secs,
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingResolver;

    impl FileResolver for FailingResolver {
        fn name(&self) -> &str {
            "failing"
        }

        fn resolve(&self, _reference: &str) -> Result<String> {
            Err(AppError::Storage("bucket unreachable".to_string()))
        }
    }

    #[test]
    fn join_url_normalizes_slashes() {
        assert_eq!(
            join_url("https://cdn.example.com/media/", "/gallery/a.jpg").unwrap(),
            "https://cdn.example.com/media/gallery/a.jpg"
        );
        assert!(join_url("cdn.example.com", "a.jpg").is_err());
    }

    #[test]
    fn join_url_encodes_key_segments() {
        assert_eq!(
            join_url("https://cdn.example.com/media", "gallery/sports day é.jpg").unwrap(),
            "https://cdn.example.com/media/gallery/sports%20day%20%C3%A9.jpg"
        );
    }

    #[test]
    fn failures_degrade_to_none() {
        assert_eq!(FailingResolver.resolve_optional(Some("fees/a.pdf")), None);
        assert_eq!(FailingResolver.resolve_optional(None), None);
    }

    #[test]
    fn blank_references_are_absent() {
        let resolver = PublicUrlResolver::new("https://cdn.example.com".to_string());
        assert_eq!(resolver.resolve_optional(Some("  ")), None);
    }

    #[test]
    fn builds_configured_backend() {
        let mut config = StorageConfig::default();
        assert_eq!(build_resolver(&config).unwrap().name(), "public");

        config.backend = StorageBackend::Signed;
        assert!(build_resolver(&config).is_err());

        config.signing_secret = Some("s3cret".to_string());
        assert_eq!(build_resolver(&config).unwrap().name(), "signed");
    }
}
