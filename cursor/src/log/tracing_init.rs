// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{TracingConfig, WriterArg};
use tracing::subscriber::DefaultGuard;
use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, layer::SubscriberExt, registry::LookupSpan,
                         util::SubscriberInitExt};

/// Avoid gnarly type annotations by using a macro to create the `fmt` layer.
#[macro_export]
macro_rules! create_fmt {
    () => {
        tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
    };
}

/// Type alias for a boxed layer.
pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Install a global subscriber built from `config`.
///
/// Returns `Ok(true)` if this call installed it, and `Ok(false)` if `config` asks for
/// no output or a global subscriber was already set (by an earlier call, or by the
/// application). So it is safe to call more than once.
///
/// # Errors
///
/// When the layers can't be created.
pub fn try_initialize_logging(config: impl Into<TracingConfig>) -> miette::Result<bool> {
    let config = config.into();
    let Some(layers) = try_create_layers(config)? else {
        return Ok(false);
    };
    let installed = tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .is_ok();
    tracing::debug!(
        message = "try_initialize_logging",
        installed = installed,
        writer = %config.writer
    );
    Ok(installed)
}

impl TracingConfig {
    /// Install a subscriber for the current thread only, until the guard is dropped.
    /// Handy in tests, which run in parallel and can't share a global subscriber.
    ///
    /// # Errors
    ///
    /// When the layers can't be created.
    pub fn install_thread_local(self) -> miette::Result<Option<DefaultGuard>> {
        Ok(try_create_layers(self)?.map(|layers| {
            tracing::subscriber::set_default(tracing_subscriber::registry().with(layers))
        }))
    }
}

/// Returns the layers, without installing them. `None` for [`WriterArg::None`].
///
/// # Errors
///
/// When the display layer can't be created.
pub fn try_create_layers(
    config: TracingConfig,
) -> miette::Result<Option<Vec<Box<DynLayer<tracing_subscriber::Registry>>>>> {
    let Some(display_layer) =
        try_create_display_layer(config.get_level_filter(), config.writer)?
    else {
        return Ok(None);
    };

    let mut return_it: Vec<Box<DynLayer<tracing_subscriber::Registry>>> = vec![];

    // Set the level filter from the tracing configuration, for any layer added later
    // that doesn't have a filter of its own.
    return_it.push(Box::new(config.get_level_filter()));
    return_it.push(display_layer);

    Ok(Some(return_it))
}

/// This erases the concrete type of the writer, and returns a boxed layer.
///
/// This is useful for composition of layers. There's more info in the docs
/// [here](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/layer/index.html#runtime-configuration-with-layers).
///
/// # Errors
///
/// Never at the moment. Kept fallible so new writers (eg: files) can fail.
pub fn try_create_display_layer<S>(
    level_filter: LevelFilter,
    writer: WriterArg,
) -> miette::Result<Option<Box<DynLayer<S>>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    // Shared configuration regardless of where logs are output to.
    let fmt_layer = create_fmt!();

    Ok(match writer {
        WriterArg::Stdout => Some(Box::new(
            fmt_layer
                .with_writer(std::io::stdout)
                .with_filter(level_filter),
        )),
        WriterArg::Stderr => Some(Box::new(
            fmt_layer
                .with_writer(std::io::stderr)
                .with_filter(level_filter),
        )),
        WriterArg::Test => Some(Box::new(
            fmt_layer
                .with_ansi(false)
                .with_test_writer()
                .with_filter(level_filter),
        )),
        WriterArg::None => None,
    })
}
