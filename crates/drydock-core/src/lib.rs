//! Drydock Core Library
//!
//! Building blocks for containerized build steps on top of the Docker
//! Engine API:
//! - A read-only runtime context (client, workdir, execution context)
//! - A functional-options helper for plain configuration values
//! - A container customization pipeline with CI/local default injection

pub mod containers;
pub mod error;
pub mod options;
pub mod runtime;

// Re-export key types
pub use containers::customizers::{
    default_customizers, EnvVars, GithubEnvs, GithubSshAuth, GithubTokenAuth, SshAgentSocket,
};
pub use containers::{
    apply_customizations, container_from_image, customized_container_from_image,
    mount_runtime_workdir, ContainerCustomizer, ContainerSpec, WORKDIR_MOUNT_PATH,
};
pub use error::{DrydockError, Result};
pub use options::{apply_options, ConfigOption};
pub use runtime::{ExecutionContext, Runtime};
