use super::draft::{FieldUpdate, RawFieldReport};

/// All messages that can be sent to the panel through the FLTK channel.
/// Widget callbacks and global listeners send one of these; the dispatch
/// loop in main hands them to `PanelController::update`.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelMessage {
    // Visibility
    ToggleActivated,
    Dismiss,

    // Field controls
    FieldReported(RawFieldReport),
    FieldChanged(FieldUpdate),

    // Form actions
    Apply,
    Reset,
}
