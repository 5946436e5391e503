use comic_logging::{comic_debug, comic_info};

use crate::{Effect, Lifecycle, Msg, PreviewState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PreviewState, msg: Msg) -> (PreviewState, Vec<Effect>) {
    let effects = match msg {
        Msg::SelectionChanged(files) => {
            if state.lifecycle() == Lifecycle::TornDown {
                comic_debug!("Ignoring selection of {} files after teardown", files.len());
                return (state, Vec::new());
            }

            let file_count = files.len();
            let revoked = state.replace_selection(files);
            comic_info!(
                "Preview rebuilt: files={} revoked={}",
                file_count,
                revoked.len()
            );

            let mut effects = Vec::with_capacity(2);
            if !revoked.is_empty() {
                effects.push(Effect::ObjectUrlsRevoked { urls: revoked });
            }
            effects.push(Effect::ContainerReplaced {
                html: state.view().container_html(),
            });
            effects
        }
        Msg::Teardown => {
            if state.lifecycle() == Lifecycle::TornDown {
                return (state, Vec::new());
            }

            let revoked = state.tear_down();
            comic_info!("Preview torn down: revoked={}", revoked.len());
            let mut effects = Vec::with_capacity(2);
            if !revoked.is_empty() {
                effects.push(Effect::ObjectUrlsRevoked { urls: revoked });
            }
            effects.push(Effect::ContainerReplaced {
                html: state.view().container_html(),
            });
            effects
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
