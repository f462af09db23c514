//! Go toolchain containers.
//!
//! Catalog entry that turns a [`GolangConfig`] into a ready-to-use
//! container specification via the drydock customization pipeline: the
//! runtime workdir is mounted at the standard path, the execution
//! context's default auth customizers run first, and configured
//! arguments become a `go <args...>` command.

mod config;

pub use config::{
    with_args, with_env, with_image_repo, with_image_tag, GolangConfig, DEFAULT_IMAGE_REPO,
    DEFAULT_IMAGE_TAG,
};

use drydock_core::{
    apply_options, customized_container_from_image, ConfigOption, ContainerSpec, EnvVars, Runtime,
};
use tracing::debug;

/// Builds a Go toolchain container specification.
///
/// Options are applied over the environment-derived defaults in caller
/// order; configured env vars are injected as a caller customizer after
/// the context defaults.
pub async fn container(
    runtime: &Runtime,
    options: Vec<ConfigOption<GolangConfig>>,
) -> drydock_core::Result<ContainerSpec> {
    let config = apply_options(GolangConfig::from_runtime(runtime), options);
    let address = format!("{}:{}", config.image_repo, config.image_tag);

    debug!(image = %address, args = ?config.args, "building go container spec");

    let mut spec = customized_container_from_image(
        runtime,
        &address,
        true,
        vec![Box::new(EnvVars(config.env))],
    )
    .await?;

    if !config.args.is_empty() {
        let mut cmd = vec!["go".to_string()];
        cmd.extend(config.args);
        spec = spec.with_cmd(cmd);
    }

    Ok(spec)
}
