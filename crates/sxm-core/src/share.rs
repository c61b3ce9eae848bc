//! # Share Links
//!
//! Share-intent URLs for LinkedIn and Twitter. Both the page URL and the
//! message are percent-encoded; only RFC 3986 unreserved characters
//! (`A-Z a-z 0-9 - _ . ~`) pass through unchanged.

use serde::{Deserialize, Serialize};

/// LinkedIn share-offsite endpoint.
pub const LINKEDIN_SHARE_ENDPOINT: &str = "https://www.linkedin.com/sharing/share-offsite/";

/// Twitter tweet-intent endpoint.
pub const TWITTER_SHARE_ENDPOINT: &str = "https://twitter.com/intent/tweet";

/// Outbound share URLs for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLinks {
    pub linkedin: String,
    pub twitter: String,
}

impl ShareLinks {
    /// Build both links for `page_url` with `message` as the share text.
    #[must_use]
    pub fn new(page_url: &str, message: &str) -> Self {
        Self {
            linkedin: linkedin_url(page_url, message),
            twitter: twitter_url(page_url, message),
        }
    }
}

/// `…/share-offsite/?url={page}&summary={message}`
#[must_use]
pub fn linkedin_url(page_url: &str, message: &str) -> String {
    format!(
        "{}?url={}&summary={}",
        LINKEDIN_SHARE_ENDPOINT,
        urlencoding::encode(page_url),
        urlencoding::encode(message)
    )
}

/// `…/intent/tweet?text={message}&url={page}`
#[must_use]
pub fn twitter_url(page_url: &str, message: &str) -> String {
    format!(
        "{}?text={}&url={}",
        TWITTER_SHARE_ENDPOINT,
        urlencoding::encode(message),
        urlencoding::encode(page_url)
    )
}
