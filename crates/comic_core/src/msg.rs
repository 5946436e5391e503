use crate::SelectedFile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The multi-file input reported a new selection (replaces the old one).
    SelectionChanged(Vec<SelectedFile>),
    /// The page is unmounting the preview; release every address.
    Teardown,
    /// Fallback for placeholder wiring.
    NoOp,
}
