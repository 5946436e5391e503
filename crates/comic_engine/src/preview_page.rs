use bytes::Bytes;
use comic_core::{update, Effect, Msg, PreviewState, PreviewViewModel, SelectedFile};
use comic_logging::{comic_info, comic_warn};

use crate::page::{AdminPage, FileInput, MULTI_FILE_INPUT_SELECTOR};

/// File preview attached to one admin page.
///
/// Owns the preview state and every temporary address minted for it. Dropping
/// the page tears the preview down, which revokes whatever is still live.
pub struct PreviewPage {
    page: AdminPage,
    state: PreviewState,
    container_html: String,
}

impl PreviewPage {
    /// Returns `None` (after a warning) when the page has no multi-file input.
    pub fn attach(page_html: &str, origin: &str) -> Option<Self> {
        let page = AdminPage::parse(page_html);
        if !page.has_file_input() {
            comic_warn!(
                "No file input matching {} found; preview disabled",
                MULTI_FILE_INPUT_SELECTOR
            );
            return None;
        }

        let state = PreviewState::with_origin(origin);
        let container_html = state.view().container_html();
        comic_info!(
            "Preview attached: input={:?} origin={}",
            page.file_input().and_then(|input| input.name),
            state.registry().origin()
        );
        Some(Self {
            page,
            state,
            container_html,
        })
    }

    pub fn on_selection_changed(&mut self, files: Vec<SelectedFile>) -> Vec<Effect> {
        self.dispatch(Msg::SelectionChanged(files))
    }

    pub fn teardown(&mut self) -> Vec<Effect> {
        self.dispatch(Msg::Teardown)
    }

    pub fn container_html(&self) -> &str {
        &self.container_html
    }

    pub fn view(&self) -> PreviewViewModel {
        self.state.view()
    }

    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    pub fn file_input(&self) -> Option<FileInput> {
        self.page.file_input()
    }

    pub fn resolve(&self, object_url: &str) -> Option<&Bytes> {
        self.state.resolve(object_url)
    }

    /// The whole page with the current container mounted after the input.
    pub fn render(&self) -> String {
        self.page.render(Some(&self.container_html))
    }

    fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let (next, effects) = update(std::mem::take(&mut self.state), msg);
        self.state = next;
        for effect in &effects {
            if let Effect::ContainerReplaced { html } = effect {
                self.container_html.clone_from(html);
            }
        }
        effects
    }
}

impl Drop for PreviewPage {
    fn drop(&mut self) {
        self.teardown();
    }
}
