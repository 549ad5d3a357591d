// Validation errors for the interactive prompts. Each variant carries the
// message dialoguer prints before asking the question again, so keep them
// short and actionable.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Input cannot be empty.")]
    Empty,

    #[error("'{0}' is not a valid year. Please enter a whole number.")]
    NotANumber(String),

    #[error("Year must be between {min} and {max}.")]
    YearOutOfRange { year: i32, min: i32, max: i32 },

    #[error("Year {0} cannot be used as a date bound.")]
    YearUnsupported(i32),

    #[error("End year {end} is before start year {start}.")]
    EndBeforeStart { start: i32, end: i32 },

    #[error("'{0}' does not look like an Apple ID (expected an email address).")]
    InvalidAccount(String),

    #[error("'{0}' exists and is not a directory.")]
    NotADirectory(String),

    #[error("Please answer y/yes or n/no.")]
    NotYesNo(String),
}
