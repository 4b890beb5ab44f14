// View transitions for the main loop, kept free of terminal I/O

use super::{KeyAction, ViewState};
use crate::error::{CullError, Result};

/// What the main loop does with a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Switch to (or stay in) this view
    Show(ViewState),
    /// Run `DisplayController::advance`
    Advance,
    /// Run `DisplayController::delete_then_advance`
    DeleteThenAdvance,
    /// Close the session
    Exit,
}

/// Decides what a key press does in the current view.
///
/// `images_shown` decides whether quitting passes through the summary first.
pub fn on_key(view: &ViewState, action: &KeyAction, images_shown: usize) -> Transition {
    match view {
        ViewState::Welcome => match action {
            KeyAction::Quit => Transition::Exit,
            _ => Transition::Show(ViewState::Browsing),
        },
        ViewState::Finished => Transition::Exit,
        ViewState::Help => match action {
            KeyAction::Help | KeyAction::Quit => Transition::Show(ViewState::Browsing),
            _ => Transition::Show(ViewState::Help),
        },
        ViewState::Browsing => match action {
            KeyAction::Advance => Transition::Advance,
            KeyAction::DeleteThenAdvance => Transition::DeleteThenAdvance,
            KeyAction::Help => Transition::Show(ViewState::Help),
            KeyAction::Quit if images_shown > 0 => Transition::Show(ViewState::Finished),
            KeyAction::Quit => Transition::Exit,
            KeyAction::None => Transition::Show(ViewState::Browsing),
        },
    }
}

/// The view to show once a controller command has run
pub fn after_command(outcome: &Result<()>) -> ViewState {
    match outcome {
        Err(CullError::Exhausted) => ViewState::Finished,
        _ => ViewState::Browsing,
    }
}
