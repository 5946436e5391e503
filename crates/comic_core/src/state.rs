use bytes::Bytes;

use crate::view_model::{PreviewLineView, PreviewViewModel};
use crate::{ObjectUrlRegistry, SelectedFile};

pub const PREVIEW_HEADING: &str = "Selected images:";
pub const PAGE_LABEL: &str = "Page";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    #[default]
    Active,
    TornDown,
}

/// One rendered line of the preview list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewEntry {
    /// 1-based position in the selection.
    pub page: usize,
    pub file_name: String,
    pub object_url: String,
    pub byte_len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreviewState {
    entries: Vec<PreviewEntry>,
    registry: ObjectUrlRegistry,
    lifecycle: Lifecycle,
}

impl PreviewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State whose addresses are minted under the given page origin.
    pub fn with_origin(origin: &str) -> Self {
        Self {
            registry: ObjectUrlRegistry::new(origin),
            ..Self::default()
        }
    }

    pub fn view(&self) -> PreviewViewModel {
        PreviewViewModel {
            heading: PREVIEW_HEADING.to_string(),
            lines: self
                .entries
                .iter()
                .map(|entry| PreviewLineView::from_entry(entry, PAGE_LABEL))
                .collect(),
            active: self.lifecycle == Lifecycle::Active,
        }
    }

    pub fn entries(&self) -> &[PreviewEntry] {
        &self.entries
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn registry(&self) -> &ObjectUrlRegistry {
        &self.registry
    }

    pub fn resolve(&self, object_url: &str) -> Option<&Bytes> {
        self.registry.resolve(object_url)
    }

    /// Drops the previous selection wholesale and mints one address per file.
    /// Returns the addresses that were revoked.
    pub(crate) fn replace_selection(&mut self, files: Vec<SelectedFile>) -> Vec<String> {
        let revoked = self.registry.revoke_all();
        self.entries = files
            .iter()
            .enumerate()
            .map(|(idx, file)| PreviewEntry {
                page: idx + 1,
                file_name: file.name.clone(),
                object_url: self.registry.create(file),
                byte_len: file.len(),
            })
            .collect();
        revoked
    }

    pub(crate) fn tear_down(&mut self) -> Vec<String> {
        self.lifecycle = Lifecycle::TornDown;
        self.entries.clear();
        self.registry.revoke_all()
    }
}
