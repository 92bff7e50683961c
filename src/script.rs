//! Timed input scripts for headless runs, e.g. `1500:next` or `2000:swipe=300,200`.

use std::str::FromStr;
use std::time::Duration;

use crate::gesture::NavigationCommand;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    Command(NavigationCommand),
    Swipe { start_x: f32, end_x: f32 },
    Tap { x: f32, width: f32 },
    Open(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptedInput {
    pub at: Duration,
    pub input: Input,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScriptError {
    #[error("expected <ms>:<input>, got '{0}'")]
    MissingTime(String),

    #[error("'{0}' is not a time in milliseconds")]
    BadTime(String),

    #[error("unknown input '{0}' (expected next, prev, jump=N, pause, close, open=N, swipe=A,B or tap=X/W)")]
    UnknownInput(String),

    #[error("bad argument '{value}' for {input}")]
    BadArgument { input: String, value: String },
}

impl FromStr for ScriptedInput {
    type Err = ScriptError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (at, input) = raw
            .split_once(':')
            .ok_or_else(|| ScriptError::MissingTime(raw.to_string()))?;
        let at = at
            .trim()
            .parse::<u64>()
            .map_err(|_| ScriptError::BadTime(at.to_string()))?;

        Ok(ScriptedInput {
            at: Duration::from_millis(at),
            input: input.trim().parse()?,
        })
    }
}

impl FromStr for Input {
    type Err = ScriptError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (name, argument) = match raw.split_once('=') {
            Some((name, argument)) => (name, Some(argument)),
            None => (raw, None),
        };

        let input = match (name, argument) {
            ("next", None) => Input::Command(NavigationCommand::Advance),
            ("prev", None) => Input::Command(NavigationCommand::Retreat),
            ("pause", None) => Input::Command(NavigationCommand::TogglePause),
            ("close", None) => Input::Command(NavigationCommand::Close),
            ("jump", Some(value)) => Input::Command(NavigationCommand::JumpTo(number(name, value)?)),
            ("open", Some(value)) => Input::Open(number(name, value)?),
            ("swipe", Some(value)) => {
                let (start_x, end_x) = pair(name, value, ',')?;
                Input::Swipe { start_x, end_x }
            }
            ("tap", Some(value)) => {
                let (x, width) = pair(name, value, '/')?;
                Input::Tap { x, width }
            }
            _ => return Err(ScriptError::UnknownInput(raw.to_string())),
        };
        Ok(input)
    }
}

fn bad_argument(input: &str, value: &str) -> ScriptError {
    ScriptError::BadArgument {
        input: input.to_string(),
        value: value.to_string(),
    }
}

fn number<T: FromStr>(input: &str, value: &str) -> Result<T, ScriptError> {
    value.trim().parse().map_err(|_| bad_argument(input, value))
}

fn pair(input: &str, value: &str, separator: char) -> Result<(f32, f32), ScriptError> {
    let (a, b) = value
        .split_once(separator)
        .ok_or_else(|| bad_argument(input, value))?;
    Ok((number(input, a)?, number(input, b)?))
}
