use thiserror::Error;

use crate::params::{Adjustment, Magnitude, ParamKey, Parameters, ValueKind};

/// A user command forwarded by the compositor, e.g. `main_ratio +0.05`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Adjust { key: ParamKey, adjustment: Adjustment },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("{0}: missing argument")]
    MissingArgument(&'static str),
    #[error("{0}: too many arguments")]
    TooManyArguments(&'static str),
    #[error("{command}: invalid value '{value}'")]
    InvalidValue {
        command: &'static str,
        value: String,
    },
}

impl Command {
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let mut tokens = input.split_whitespace();
        let name = tokens.next().ok_or(CommandError::Empty)?;
        let args: Vec<&str> = tokens.collect();

        if name == "reset" {
            return match args.as_slice() {
                [] => Ok(Command::Reset),
                _ => Err(CommandError::TooManyArguments("reset")),
            };
        }

        let key = ParamKey::from_name(name)
            .filter(|key| key.name() == name)
            .ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;

        let arg = match args.as_slice() {
            [arg] => *arg,
            [] => return Err(CommandError::MissingArgument(key.name())),
            _ => return Err(CommandError::TooManyArguments(key.name())),
        };

        Ok(Command::Adjust {
            key,
            adjustment: parse_adjustment(key, arg)?,
        })
    }

    pub fn apply(&self, params: &mut Parameters) {
        match *self {
            Command::Adjust { key, adjustment } => {
                params.adjust(key, adjustment);
            }
            Command::Reset => params.reset(),
        }
    }
}

fn parse_adjustment(key: ParamKey, arg: &str) -> Result<Adjustment, CommandError> {
    let invalid = || CommandError::InvalidValue {
        command: key.name(),
        value: arg.to_string(),
    };

    let is_delta = arg.starts_with(['+', '-']);
    let magnitude = match key.kind() {
        ValueKind::Uint if is_delta => arg.parse::<i64>().map(Magnitude::Integer).ok(),
        ValueKind::Uint => arg
            .parse::<u32>()
            .map(|v| Magnitude::Integer(i64::from(v)))
            .ok(),
        ValueKind::Fixed => arg
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Magnitude::Real),
    }
    .ok_or_else(invalid)?;

    Ok(if is_delta {
        Adjustment::Delta(magnitude)
    } else {
        Adjustment::Set(magnitude)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(params: &mut Parameters, input: &str) -> Result<(), CommandError> {
        Command::parse(input).map(|cmd| cmd.apply(params))
    }

    #[test]
    fn test_parse_absolute() {
        assert_eq!(
            Command::parse("view_padding 12"),
            Ok(Command::Adjust {
                key: ParamKey::ViewPadding,
                adjustment: Adjustment::Set(Magnitude::Integer(12)),
            })
        );
        assert_eq!(
            Command::parse("  main_ratio   0.55 "),
            Ok(Command::Adjust {
                key: ParamKey::MainRatio,
                adjustment: Adjustment::Set(Magnitude::Real(0.55)),
            })
        );
    }

    #[test]
    fn test_parse_delta() {
        assert_eq!(
            Command::parse("main_count +2"),
            Ok(Command::Adjust {
                key: ParamKey::MainCount,
                adjustment: Adjustment::Delta(Magnitude::Integer(2)),
            })
        );
        assert_eq!(
            Command::parse("main_ratio -0.05"),
            Ok(Command::Adjust {
                key: ParamKey::MainRatio,
                adjustment: Adjustment::Delta(Magnitude::Real(-0.05)),
            })
        );
    }

    #[test]
    fn test_main_count_delta() {
        let mut params = Parameters::default();
        run(&mut params, "main_count +2").unwrap();
        assert_eq!(params.main_count, 3);

        let mut params = Parameters::default();
        run(&mut params, "main_count -5").unwrap();
        assert_eq!(params.main_count, 0);
    }

    #[test]
    fn test_main_ratio_is_clamped() {
        let mut params = Parameters::default();
        run(&mut params, "main_ratio 5").unwrap();
        assert_eq!(params.main_ratio, 0.9);
        run(&mut params, "main_ratio -3").unwrap();
        assert_eq!(params.main_ratio, 0.1);
    }

    #[test]
    fn test_reset() {
        let mut params = Parameters {
            main_count: 4,
            main_ratio: 0.3,
            view_padding: 0,
            outer_padding: 0,
        };
        run(&mut params, "reset").unwrap();
        assert_eq!(params, Parameters::default());
    }

    #[test]
    fn test_errors_leave_state_unchanged() {
        let mut params = Parameters::default();
        assert_eq!(
            run(&mut params, "bogus"),
            Err(CommandError::UnknownCommand("bogus".to_string()))
        );
        assert_eq!(
            run(&mut params, "main_count 1 2"),
            Err(CommandError::TooManyArguments("main_count"))
        );
        assert_eq!(
            run(&mut params, "main_count"),
            Err(CommandError::MissingArgument("main_count"))
        );
        assert_eq!(
            run(&mut params, "reset now"),
            Err(CommandError::TooManyArguments("reset"))
        );
        assert_eq!(run(&mut params, "   "), Err(CommandError::Empty));
        assert!(matches!(
            run(&mut params, "view_padding 1.5"),
            Err(CommandError::InvalidValue { .. })
        ));
        assert!(matches!(
            run(&mut params, "main_ratio nan"),
            Err(CommandError::InvalidValue { .. })
        ));
        assert_eq!(params, Parameters::default());
    }

    #[test]
    fn test_option_alias_is_not_a_command() {
        assert_eq!(
            Command::parse("main_factor 0.5"),
            Err(CommandError::UnknownCommand("main_factor".to_string()))
        );
    }
}
