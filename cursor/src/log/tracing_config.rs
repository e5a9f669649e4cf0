// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::str::FromStr;
use tracing_core::LevelFilter;

/// Where cursor logs go and how verbose they are. The library never installs a
/// subscriber on its own; call [`crate::try_initialize_logging`] (or
/// [`TracingConfig::install_thread_local`] in tests) to see the events gated by
/// [`crate::DEBUG_CURSOR_MOD`] and [`crate::DEBUG_NAVIGATOR_MOD`].
///
/// Fields:
/// - `writer`: [`WriterArg`] - where the formatted events are written.
/// - `level_filter`: [`LevelFilter`] - the most verbose level that is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracingConfig {
    pub writer: WriterArg,
    pub level_filter: LevelFilter,
}

impl TracingConfig {
    /// Debug level output to `writer`.
    #[must_use]
    pub fn new(writer: WriterArg) -> Self {
        Self {
            writer,
            level_filter: LevelFilter::DEBUG,
        }
    }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }
}

impl Default for TracingConfig {
    fn default() -> Self { Self::new(WriterArg::Stderr) }
}

/// Any of these converts into a [`TracingConfig`], so the init functions take
/// `impl Into<TracingConfig>`:
///
/// ```
/// use r3bl_cursor::{TracingConfig, WriterArg};
/// use tracing_core::LevelFilter;
///
/// let config: TracingConfig = LevelFilter::TRACE.into();
/// assert_eq!(config.writer, WriterArg::Stderr);
///
/// let config: TracingConfig = WriterArg::Test.into();
/// assert_eq!(config.level_filter, LevelFilter::DEBUG);
/// ```
mod tracing_config_options {
    use super::{LevelFilter, TracingConfig, WriterArg};

    impl From<LevelFilter> for TracingConfig {
        fn from(level_filter: LevelFilter) -> Self {
            Self {
                level_filter,
                ..Self::default()
            }
        }
    }

    impl From<tracing::Level> for TracingConfig {
        fn from(level: tracing::Level) -> Self { LevelFilter::from_level(level).into() }
    }

    impl From<WriterArg> for TracingConfig {
        fn from(writer: WriterArg) -> Self { Self::new(writer) }
    }
}

/// The writer behind a [`TracingConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum WriterArg {
    Stdout,
    Stderr,
    /// Output captured by the test harness, shown only for failing tests.
    Test,
    /// Don't log at all.
    None,
}

/// Parse the names used in config files and command lines.
impl FromStr for WriterArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdout" => Ok(WriterArg::Stdout),
            "stderr" => Ok(WriterArg::Stderr),
            "test" => Ok(WriterArg::Test),
            "none" | "" => Ok(WriterArg::None),
            _ => Err(format!("{s} is not a valid tracing writer")),
        }
    }
}
