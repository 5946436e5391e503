//! Comic core: pure preview state machine and view-model helpers.
mod effect;
mod file;
mod msg;
mod object_url;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use file::SelectedFile;
pub use msg::Msg;
pub use object_url::{ObjectUrlRegistry, DEFAULT_ORIGIN};
pub use state::{Lifecycle, PreviewEntry, PreviewState, PAGE_LABEL, PREVIEW_HEADING};
pub use update::update;
pub use view_model::{escape_html, PreviewLineView, PreviewViewModel, LINK_TARGET};
