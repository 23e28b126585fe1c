//! Color constants for terminal output.

use crossterm::style::{Color, StyledContent, Stylize};

use crate::fields::Status;

/// Used for `todo`
pub const TODO_COLOR: Color = Color::Yellow;
/// Used for `in-progress`
pub const IN_PROGRESS_COLOR: Color = Color::Cyan;
/// Used for `done`
pub const DONE_COLOR: Color = Color::Green;

pub fn status_color(s: Status) -> Color {
    match s {
        Status::Todo => TODO_COLOR,
        Status::InProgress => IN_PROGRESS_COLOR,
        Status::Done => DONE_COLOR,
    }
}

/// The status label painted in its status color.
pub fn styled_status(s: Status) -> StyledContent<&'static str> {
    s.label().with(status_color(s))
}
