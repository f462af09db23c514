//! Container specification and customization pipeline.
//!
//! The pipeline turns an image address plus an ordered list of
//! [`ContainerCustomizer`]s into a fully configured [`ContainerSpec`].
//! Context defaults (CI vs. local) always run before caller customizers;
//! the first customizer failure aborts the chain and is returned
//! unchanged.

pub mod customizers;

use std::collections::HashMap;

use async_trait::async_trait;
use bollard::container::Config;
use bollard::models::{HostConfig, Mount, MountTypeEnum};
use tracing::{debug, info};

use crate::error::Result;
use crate::runtime::Runtime;
use self::customizers::default_customizers;

/// Fixed mount point for the runtime workdir inside build containers.
pub const WORKDIR_MOUNT_PATH: &str = "/src";

/// A pending container specification.
///
/// Thin chainable wrapper over [`Config`]. Nothing talks to the Docker
/// daemon while a spec is being shaped; the finished value is handed to
/// the SDK via [`ContainerSpec::into_config`]. Builder calls consume and
/// return the spec, so later calls observe the effects of earlier ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerSpec {
    config: Config<String>,
}

impl ContainerSpec {
    /// Starts a specification for the given image address.
    ///
    /// The address is not validated locally; malformed addresses fail in
    /// the Docker Engine when the container is realized.
    pub fn from_image(address: impl Into<String>) -> Self {
        Self {
            config: Config {
                image: Some(address.into()),
                ..Default::default()
            },
        }
    }

    /// Appends `KEY=VALUE` to the container environment.
    ///
    /// Insertion order is preserved, so the environment doubles as a
    /// record of customizer application order.
    pub fn with_env(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.config
            .env
            .get_or_insert_with(Vec::new)
            .push(format!("{}={}", key.as_ref(), value.as_ref()));
        self
    }

    /// Bind mounts a host path into the container.
    pub fn with_bind_mount(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        let mount = Mount {
            target: Some(target.into()),
            source: Some(source.into()),
            typ: Some(MountTypeEnum::BIND),
            ..Default::default()
        };

        self.config
            .host_config
            .get_or_insert_with(HostConfig::default)
            .mounts
            .get_or_insert_with(Vec::new)
            .push(mount);
        self
    }

    /// Sets the container working directory.
    pub fn with_workdir(mut self, path: impl Into<String>) -> Self {
        self.config.working_dir = Some(path.into());
        self
    }

    /// Sets the container command.
    pub fn with_cmd(mut self, cmd: Vec<String>) -> Self {
        self.config.cmd = Some(cmd);
        self
    }

    /// Adds a label to the container. Later values replace earlier ones
    /// for the same key.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config
            .labels
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// The image address, if set.
    pub fn image(&self) -> Option<&str> {
        self.config.image.as_deref()
    }

    /// The container environment, in insertion order.
    pub fn env(&self) -> &[String] {
        self.config.env.as_deref().unwrap_or(&[])
    }

    /// The container command.
    pub fn cmd(&self) -> &[String] {
        self.config.cmd.as_deref().unwrap_or(&[])
    }

    /// The container working directory, if set.
    pub fn workdir(&self) -> Option<&str> {
        self.config.working_dir.as_deref()
    }

    /// Mounts configured so far, in insertion order.
    pub fn mounts(&self) -> &[Mount] {
        self.config
            .host_config
            .as_ref()
            .and_then(|host| host.mounts.as_deref())
            .unwrap_or(&[])
    }

    /// Yields the underlying SDK configuration.
    pub fn into_config(self) -> Config<String> {
        self.config
    }
}

/// A single customization step applied to a pending container.
///
/// Customizers compose by ordered application; each one receives the
/// spec produced by its predecessor and may fail, which aborts the
/// chain. The runtime gives access to the Docker client, the host
/// environment snapshot and the execution context.
#[async_trait]
pub trait ContainerCustomizer: Send + Sync {
    /// Name used in pipeline traces.
    fn name(&self) -> &str;

    /// Transforms the container specification, or fails.
    async fn customize(&self, runtime: &Runtime, container: ContainerSpec)
        -> Result<ContainerSpec>;
}

/// Creates a base container specification for the given image address.
pub fn container_from_image(runtime: &Runtime, address: &str) -> ContainerSpec {
    debug!(
        image = address,
        workdir = %runtime.workdir().display(),
        "creating base container spec"
    );
    ContainerSpec::from_image(address)
}

/// Applies customizers left to right, feeding each step's output into
/// the next step's input.
///
/// Stops at the first failure and returns the error unchanged; an empty
/// list returns the input spec as-is.
pub async fn apply_customizations(
    runtime: &Runtime,
    mut container: ContainerSpec,
    customizers: &[Box<dyn ContainerCustomizer>],
) -> Result<ContainerSpec> {
    for customizer in customizers {
        debug!(customizer = customizer.name(), "applying customizer");
        container = customizer.customize(runtime, container).await?;
    }

    Ok(container)
}

/// Mounts the runtime workdir at [`WORKDIR_MOUNT_PATH`] and makes that
/// path the container working directory.
///
/// Pure value construction on the spec; nothing here can fail until the
/// SDK realizes the container.
pub fn mount_runtime_workdir(runtime: &Runtime, container: ContainerSpec) -> ContainerSpec {
    container
        .with_bind_mount(runtime.workdir().to_string_lossy(), WORKDIR_MOUNT_PATH)
        .with_workdir(WORKDIR_MOUNT_PATH)
}

/// Builds a fully customized container specification from an image
/// address.
///
/// Fixed order: base spec, context default customizers, caller
/// customizers, then the optional workdir mount. Defaults always run
/// first so caller customizers can observe or override what they set.
pub async fn customized_container_from_image(
    runtime: &Runtime,
    address: &str,
    mount_workdir: bool,
    customizers: Vec<Box<dyn ContainerCustomizer>>,
) -> Result<ContainerSpec> {
    let container = container_from_image(runtime, address);

    // Prepend the context defaults so they are applied first.
    let mut chain = default_customizers(runtime.context());
    chain.extend(customizers);

    let mut container = apply_customizations(runtime, container, &chain).await?;

    if mount_workdir {
        container = mount_runtime_workdir(runtime, container);
    }

    info!(
        image = address,
        customizers = chain.len(),
        ci = runtime.is_ci(),
        "container spec ready"
    );

    Ok(container)
}
