use crate::command::datetime::DateTimeFormat;
use crate::command::error::ParseError;
use crate::command::types::{Command, TaskDraft};
use chrono::NaiveDateTime;
use tracing::debug;

const BY_MARKER: &str = "/by";
const FROM_MARKER: &str = "/from";
const TO_MARKER: &str = "/to";

/// Turns one line of user input into a [`Command`].
///
/// Stateless apart from the date/time format it was built with, so the same
/// line always yields the same result.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    format: DateTimeFormat,
}

impl Parser {
    pub fn new(format: DateTimeFormat) -> Self {
        Self { format }
    }

    pub fn parse(&self, line: &str) -> Result<Command, ParseError> {
        let (keyword, rest) = match line.split_once(' ') {
            Some((keyword, rest)) => (keyword, Some(rest)),
            None => (line, None),
        };

        debug!(keyword, has_arguments = rest.is_some(), "dispatching command");

        match keyword {
            "bye" => Ok(Command::Exit),
            "list" => Ok(Command::List),
            "mark" => parse_index("mark", rest).map(Command::Mark),
            "unmark" => parse_index("unmark", rest).map(Command::Unmark),
            "delete" => parse_index("delete", rest).map(Command::Delete),
            "todo" => {
                let description =
                    non_blank(rest).ok_or(ParseError::EmptyDescription { command: "todo" })?;
                Ok(Command::Add(TaskDraft::Todo {
                    description: description.to_string(),
                }))
            }
            "deadline" => self.parse_deadline(rest).map(Command::Add),
            "event" => self.parse_event(rest).map(Command::Add),
            "find" => {
                let keyword = non_blank(rest).ok_or(ParseError::EmptyKeyword)?;
                Ok(Command::Find(keyword.to_string()))
            }
            _ => Err(ParseError::UnknownCommand {
                keyword: keyword.to_string(),
            }),
        }
    }

    fn parse_deadline(&self, rest: Option<&str>) -> Result<TaskDraft, ParseError> {
        let rest = non_blank(rest).ok_or(ParseError::EmptyDescription {
            command: "deadline",
        })?;
        let (description, by) = rest
            .split_once(BY_MARKER)
            .ok_or(ParseError::MissingDeadlineMarker)?;

        let description = description_of("deadline", description)?;
        let by = self.decode_segment(BY_MARKER, by)?;

        Ok(TaskDraft::Deadline { description, by })
    }

    fn parse_event(&self, rest: Option<&str>) -> Result<TaskDraft, ParseError> {
        let rest = non_blank(rest).ok_or(ParseError::EmptyDescription { command: "event" })?;
        let (description, period) = rest
            .split_once(FROM_MARKER)
            .ok_or(ParseError::MissingEventFromMarker)?;
        let (start, end) = period
            .split_once(TO_MARKER)
            .ok_or(ParseError::MissingEventToMarker)?;

        let description = description_of("event", description)?;
        let start = self.decode_segment(FROM_MARKER, start)?;
        let end = self.decode_segment(TO_MARKER, end)?;

        Ok(TaskDraft::Event {
            description,
            start,
            end,
        })
    }

    fn decode_segment(
        &self,
        marker: &'static str,
        segment: &str,
    ) -> Result<NaiveDateTime, ParseError> {
        let literal = segment.trim();
        if literal.is_empty() {
            return Err(ParseError::EmptyDateSegment { marker });
        }

        self.format
            .decode(literal)
            .ok_or_else(|| ParseError::BadDateFormat {
                literal: literal.to_string(),
                pattern: self.format.pattern(),
            })
    }
}

fn non_blank(rest: Option<&str>) -> Option<&str> {
    rest.map(str::trim).filter(|s| !s.is_empty())
}

fn description_of(command: &'static str, segment: &str) -> Result<String, ParseError> {
    let description = segment.trim();
    if description.is_empty() {
        return Err(ParseError::EmptyDescription { command });
    }
    Ok(description.to_string())
}

/// Reads a one-based task number and shifts it to zero-based.
fn parse_index(command: &'static str, rest: Option<&str>) -> Result<i64, ParseError> {
    let argument = non_blank(rest).ok_or(ParseError::MissingIndexArgument { command })?;

    argument
        .parse::<i64>()
        .ok()
        .and_then(|number| number.checked_sub(1))
        .ok_or_else(|| ParseError::InvalidIndexFormat {
            command,
            argument: argument.to_string(),
        })
}
