use crate::error::Result;
use crate::storage::{is_absolute_url, join_url, FileResolver};

/// Permanent, unauthenticated URLs under a public base.
pub struct PublicUrlResolver {
    base_url: String,
}

impl PublicUrlResolver {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }
}

impl FileResolver for PublicUrlResolver {
    fn name(&self) -> &str {
        "public"
    }

    fn resolve(&self, reference: &str) -> Result<String> {
        if is_absolute_url(reference) {
            return Ok(reference.to_string());
        }
        join_url(&self.base_url, reference)
    }
}
