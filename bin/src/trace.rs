//! Line-based input traces for `autoscroll replay`.
//!
//! ```text
//! # press, hold still, then drag down
//! 0    press middle 100 100
//! 40   drag 100 180
//! 900  release middle 100 180 shift
//! 950  key escape
//! 1000 hide
//! ```
//!
//! Each line starts with a timestamp in milliseconds. Timestamps must not decrease.

use autoscroll::{InputEvent, Modifiers, MouseButton, Point};
use std::{str::FromStr, time::Duration};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TraceError {
    #[error("line {line}: expected a timestamp in milliseconds, got '{found}'")]
    BadTimestamp { line: usize, found: String },

    #[error("line {line}: timestamp {at}ms is earlier than the previous {previous}ms")]
    TimeWentBackwards { line: usize, at: u64, previous: u64 },

    #[error("line {line}: unknown action '{action}'")]
    UnknownAction { line: usize, action: String },

    #[error("line {line}: missing {what}")]
    Missing { line: usize, what: &'static str },

    #[error("line {line}: invalid {what} '{found}'")]
    Invalid {
        line: usize,
        what: &'static str,
        found: String,
    },

    #[error("line {line}: unexpected trailing input '{found}'")]
    Trailing { line: usize, found: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceAction {
    Input(InputEvent),
    /// The scroll view was hidden.
    Hide,
    /// The scroll view's window lost focus.
    Blur,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    /// Line number in the trace file, starting at 1.
    pub line: usize,
    pub at: Duration,
    pub action: TraceAction,
}

pub fn parse(source: &str) -> Result<Vec<TraceStep>, TraceError> {
    let mut steps = Vec::new();
    let mut previous = 0;

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let content = raw.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        let mut words = Words {
            line,
            inner: content.split_whitespace(),
        };

        let stamp = words.next("timestamp")?;
        let at: u64 = stamp.parse().map_err(|_| TraceError::BadTimestamp {
            line,
            found: stamp.to_string(),
        })?;
        if at < previous {
            return Err(TraceError::TimeWentBackwards { line, at, previous });
        }
        previous = at;

        let action = parse_action(&mut words)?;
        words.finish()?;
        steps.push(TraceStep {
            line,
            at: Duration::from_millis(at),
            action,
        });
    }

    Ok(steps)
}

fn parse_action(words: &mut Words<'_>) -> Result<TraceAction, TraceError> {
    let action = words.next("action")?;
    let event = match action {
        "press" | "release" | "click" => {
            let button: MouseButton = words.parse("button")?;
            let position = words.point()?;
            let modifiers = words.modifiers()?;
            let event = match action {
                "press" => InputEvent::press(button, position),
                "release" => InputEvent::release(button, position),
                _ => InputEvent::click(button, position),
            };
            event.with_modifiers(modifiers)
        },
        "move" => InputEvent::mouse_move(words.point()?),
        "drag" => InputEvent::drag(words.point()?),
        "key" => InputEvent::key_down(words.next("key name")?.to_lowercase()),
        "hide" => return Ok(TraceAction::Hide),
        "blur" => return Ok(TraceAction::Blur),
        other => {
            return Err(TraceError::UnknownAction {
                line: words.line,
                action: other.to_string(),
            })
        },
    };
    Ok(TraceAction::Input(event))
}

struct Words<'a> {
    line: usize,
    inner: std::str::SplitWhitespace<'a>,
}

impl<'a> Words<'a> {
    fn next(&mut self, what: &'static str) -> Result<&'a str, TraceError> {
        self.inner.next().ok_or(TraceError::Missing {
            line: self.line,
            what,
        })
    }

    fn parse<T: FromStr>(&mut self, what: &'static str) -> Result<T, TraceError> {
        let word = self.next(what)?;
        word.parse().map_err(|_| TraceError::Invalid {
            line: self.line,
            what,
            found: word.to_string(),
        })
    }

    fn point(&mut self) -> Result<Point, TraceError> {
        let x = self.parse("x coordinate")?;
        let y = self.parse("y coordinate")?;
        Ok(Point::new(x, y))
    }

    /// Optional trailing modifier list such as `ctrl+shift`.
    fn modifiers(&mut self) -> Result<Modifiers, TraceError> {
        match self.inner.next() {
            Some(word) => word.parse().map_err(|_| TraceError::Invalid {
                line: self.line,
                what: "modifiers",
                found: word.to_string(),
            }),
            None => Ok(Modifiers::NONE),
        }
    }

    fn finish(mut self) -> Result<(), TraceError> {
        match self.inner.next() {
            Some(extra) => Err(TraceError::Trailing {
                line: self.line,
                found: extra.to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoscroll::keys;

    #[test]
    fn parses_every_action() {
        let steps = parse(
            "# header\n\
             0 press middle 10 20\n\
             \n\
             5 drag 10 40   # comment\n\
             5 move 11 41\n\
             9 release middle 11 41 ctrl+shift\n\
             12 click left 0 0\n\
             20 key Escape\n\
             30 hide\n\
             31 blur\n",
        )
        .unwrap();

        assert_eq!(steps.len(), 8);
        assert_eq!(steps[0].line, 2);
        assert_eq!(
            steps[0].action,
            TraceAction::Input(InputEvent::press(MouseButton::Middle, Point::new(10, 20)))
        );
        assert_eq!(steps[1].at, Duration::from_millis(5));
        assert_eq!(
            steps[1].action,
            TraceAction::Input(InputEvent::drag(Point::new(10, 40)))
        );

        let TraceAction::Input(release) = &steps[3].action else {
            panic!("expected input");
        };
        assert!(release.modifiers.control && release.modifiers.shift);
        assert!(!release.modifiers.alt);

        assert_eq!(
            steps[5].action,
            TraceAction::Input(InputEvent::key_down(keys::ESCAPE))
        );
        assert_eq!(steps[6].action, TraceAction::Hide);
        assert_eq!(steps[7].action, TraceAction::Blur);
    }

    #[test]
    fn reports_line_numbers() {
        assert_eq!(
            parse("0 press middle 1 1\nsoon hide"),
            Err(TraceError::BadTimestamp {
                line: 2,
                found: "soon".into()
            })
        );
        assert_eq!(
            parse("\n\n7 wiggle"),
            Err(TraceError::UnknownAction {
                line: 3,
                action: "wiggle".into()
            })
        );
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!(
            parse("0 press middle 1"),
            Err(TraceError::Missing {
                line: 1,
                what: "y coordinate"
            })
        );
        assert!(matches!(
            parse("0 press wheel 1 1"),
            Err(TraceError::Invalid { what: "button", .. })
        ));
        assert!(matches!(
            parse("0 press middle 1 1 hyper"),
            Err(TraceError::Invalid { what: "modifiers", .. })
        ));
        assert!(matches!(
            parse("0 hide now"),
            Err(TraceError::Trailing { .. })
        ));
    }

    #[test]
    fn rejects_time_going_backwards() {
        assert_eq!(
            parse("10 hide\n5 blur"),
            Err(TraceError::TimeWentBackwards {
                line: 2,
                at: 5,
                previous: 10
            })
        );
    }

    #[test]
    fn error_messages_name_the_line() {
        let err = parse("0 press middle x 1").unwrap_err();
        assert_eq!(err.to_string(), "line 1: invalid x coordinate 'x'");
    }
}
