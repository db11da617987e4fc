//! Provenance detection for shared links.
//!
//! When a user shares a post into the app, the only thing decided locally
//! is which platform it came from. Pulling the place out of the post is
//! left to a future service.

use crate::models::SourcePlatform;

const INSTAGRAM_HOSTS: &[&str] = &["instagram.com", "instagr.am"];
const TIKTOK_HOSTS: &[&str] = &["tiktok.com"];

impl SourcePlatform {
    /// Classify a shared URL by host. Unrecognized or malformed input is `Web`.
    pub fn detect(url: &str) -> SourcePlatform {
        let Some(host) = host_of(url) else {
            return SourcePlatform::Web;
        };
        if matches_any(&host, INSTAGRAM_HOSTS) {
            SourcePlatform::Instagram
        } else if matches_any(&host, TIKTOK_HOSTS) {
            SourcePlatform::Tiktok
        } else {
            SourcePlatform::Web
        }
    }
}

/// Lowercased host of `url`, with or without a scheme.
fn host_of(url: &str) -> Option<String> {
    let trimmed = url.trim();
    let rest = match trimmed.find("://") {
        Some(i) => &trimmed[i + 3..],
        None => trimmed,
    };
    let authority = rest.split(['/', '?', '#']).next()?;
    let host = authority.rsplit('@').next()?.split(':').next()?;
    if host.is_empty() {
        None
    } else {
        Some(host.to_ascii_lowercase())
    }
}

fn matches_any(host: &str, domains: &[&str]) -> bool {
    domains
        .iter()
        .any(|d| host == *d || host.ends_with(&format!(".{}", d)))
}
