use comic_core::Effect;
use comic_logging::{comic_debug, comic_info};

/// Applies preview effects for a headless page: the container markup is
/// already held by the page, so only revocations need reporting.
pub fn apply(effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::ContainerReplaced { html } => {
                comic_debug!("Container replaced: html_len={}", html.len());
            }
            Effect::ObjectUrlsRevoked { urls } => {
                comic_info!("Revoked {} preview addresses", urls.len());
                for url in urls {
                    comic_debug!("Revoked {}", url);
                }
            }
        }
    }
}
