//! Configuration loading helpers.
//!
//! Configuration flags lead the argument vector. They are split off and
//! handed to `ortho_config`, while the remaining tokens go to the command
//! parser.

use std::ffi::{OsStr, OsString};

use callscope_config::{CONFIG_CLI_FLAGS, Config};
use ortho_config::OrthoConfig;

use crate::AppError;

pub(crate) trait ConfigLoader {
    /// Loads configuration from the program name and configuration flags.
    ///
    /// # Flag Ordering
    ///
    /// Configuration flags must appear before the subcommand. A flag after
    /// the subcommand is treated as a command argument.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

fn classify_flag(argument: &OsStr) -> FlagAction {
    let text = argument.to_string_lossy();
    if !text.starts_with("--") {
        return FlagAction::Skip;
    }
    let (name, inline_value) = match text.split_once('=') {
        Some((name, _)) => (name, true),
        None => (text.as_ref(), false),
    };
    if CONFIG_CLI_FLAGS.contains(&name) {
        FlagAction::Include {
            needs_value: !inline_value,
        }
    } else {
        FlagAction::Skip
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_arguments: Vec<OsString>,
}

/// Splits `args` into the program name plus leading configuration flags, and
/// the program name plus everything from the subcommand onwards.
pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some((program, rest)) = args.split_first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_arguments: Vec::new(),
        };
    };

    let mut pending_value = false;
    let leading = rest
        .iter()
        .take_while(|argument| {
            if pending_value {
                pending_value = false;
                return true;
            }
            match classify_flag(argument) {
                FlagAction::Include { needs_value } => {
                    pending_value = needs_value;
                    true
                }
                FlagAction::Skip => false,
            }
        })
        .count();
    let flags = rest.get(..leading).unwrap_or_default();
    let command = rest.get(leading..).unwrap_or_default();

    ConfigArgumentSplit {
        config_arguments: std::iter::once(program).chain(flags).cloned().collect(),
        command_arguments: std::iter::once(program).chain(command).cloned().collect(),
    }
}
