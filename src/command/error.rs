use thiserror::Error;

/// Why a line could not be turned into a [`Command`](super::Command).
///
/// Every variant renders as a message telling the user how to fix the input.
/// These are always recovered by the caller; none of them is fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(
        "I don't know what '{keyword}' means. Try one of: bye, list, mark, unmark, todo, deadline, event, delete, find"
    )]
    UnknownCommand { keyword: String },

    #[error("Please tell me which task to {command}, e.g. `{command} 2`")]
    MissingIndexArgument { command: &'static str },

    #[error("'{argument}' is not a task number. Use the number shown by `list`, e.g. `{command} 2`")]
    InvalidIndexFormat {
        command: &'static str,
        argument: String,
    },

    #[error("The description of a {command} cannot be empty")]
    EmptyDescription { command: &'static str },

    #[error("A deadline needs a due date: `deadline <description> /by <date time>`")]
    MissingDeadlineMarker,

    #[error("An event needs a start: `event <description> /from <date time> /to <date time>`")]
    MissingEventFromMarker,

    #[error("An event needs an end: `event <description> /from <date time> /to <date time>`")]
    MissingEventToMarker,

    #[error("Please give a date and time after {marker}")]
    EmptyDateSegment { marker: &'static str },

    #[error("'{literal}' is not a valid date/time. Use the format {pattern} (24h), e.g. 2/12/2024 1800")]
    BadDateFormat {
        literal: String,
        pattern: &'static str,
    },

    #[error("Please tell me what to search for, e.g. `find book`")]
    EmptyKeyword,
}
