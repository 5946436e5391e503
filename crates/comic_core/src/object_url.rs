use std::collections::BTreeMap;
use std::fmt::Write;

use bytes::Bytes;
use sha2::{Digest, Sha256};
use url::Url;

use crate::SelectedFile;

pub const DEFAULT_ORIGIN: &str = "http://localhost";

/// Scoped registry of temporary `blob:` addresses.
///
/// Every live address keeps the file content it points to. Addresses stay
/// valid until they are revoked, either one by one or all at once when the
/// owning preview changes selection or is torn down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectUrlRegistry {
    origin: String,
    next_serial: u64,
    live: BTreeMap<String, Bytes>,
}

impl Default for ObjectUrlRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN)
    }
}

impl ObjectUrlRegistry {
    /// `origin` may be any URL of the hosting page; only its origin is kept.
    /// Unparseable or opaque origins serialize as `null`, like a browser does.
    pub fn new(origin: &str) -> Self {
        let origin = Url::parse(origin)
            .map(|url| url.origin().ascii_serialization())
            .unwrap_or_else(|_| "null".to_string());
        Self {
            origin,
            next_serial: 0,
            live: BTreeMap::new(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn create(&mut self, file: &SelectedFile) -> String {
        let serial = self.next_serial;
        self.next_serial += 1;
        let url = format!("blob:{}/{}", self.origin, token(serial, file));
        self.live.insert(url.clone(), file.content.clone());
        url
    }

    pub fn resolve(&self, url: &str) -> Option<&Bytes> {
        self.live.get(url)
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.live.contains_key(url)
    }

    pub fn revoke(&mut self, url: &str) -> bool {
        self.live.remove(url).is_some()
    }

    /// Revokes every live address and returns them in sorted order.
    pub fn revoke_all(&mut self) -> Vec<String> {
        std::mem::take(&mut self.live).into_keys().collect()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

// UUID-shaped token; the serial keeps it unique even for identical files.
fn token(serial: u64, file: &SelectedFile) -> String {
    let mut hasher = Sha256::new();
    hasher.update(serial.to_le_bytes());
    hasher.update(file.name.as_bytes());
    hasher.update((file.content.len() as u64).to_le_bytes());
    let digest = hasher.finalize();

    let mut hex = String::with_capacity(36);
    for (idx, byte) in digest.iter().take(16).enumerate() {
        if matches!(idx, 4 | 6 | 8 | 10) {
            hex.push('-');
        }
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
