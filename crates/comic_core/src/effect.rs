/// Side effects the host page has to apply after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Swap the mounted preview container for this markup.
    ContainerReplaced { html: String },
    /// These temporary addresses are no longer backed by any file.
    ObjectUrlsRevoked { urls: Vec<String> },
}
