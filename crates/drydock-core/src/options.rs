//! Functional options over plain configuration values.
//!
//! Each option is a transformation applied to an existing configuration
//! value, yielding an updated copy. Options compose by ordered
//! application; when two options touch the same field, the later one
//! wins.

/// A single configuration option.
pub type ConfigOption<C> = Box<dyn FnOnce(C) -> C>;

/// Applies options to a base configuration in caller order.
///
/// Options never validate or fail; they only replace fields. Fields no
/// option touches keep their value from `base`.
pub fn apply_options<C>(base: C, options: impl IntoIterator<Item = ConfigOption<C>>) -> C {
    options
        .into_iter()
        .fold(base, |config, option| option(config))
}
