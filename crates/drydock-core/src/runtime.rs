//! Runtime context shared by every container build step.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bollard::Docker;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Where a build step is executing.
///
/// Resolved once when the runtime is constructed; downstream code
/// branches on the variant instead of re-reading the environment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionContext {
    /// Running under a CI provider.
    Ci,

    /// Running on a developer machine.
    Local,
}

impl ExecutionContext {
    /// Resolves the context from an environment snapshot.
    ///
    /// `CI` or `GITHUB_ACTIONS` set to `true`/`1` selects [`ExecutionContext::Ci`].
    pub fn detect(env: &BTreeMap<String, String>) -> Self {
        let truthy = |key: &str| {
            env.get(key)
                .map(|value| value == "true" || value == "1")
                .unwrap_or(false)
        };

        if truthy("CI") || truthy("GITHUB_ACTIONS") {
            Self::Ci
        } else {
            Self::Local
        }
    }

    /// True when running under a CI provider.
    pub fn is_ci(self) -> bool {
        matches!(self, Self::Ci)
    }
}

/// Read-only capability bundle handed to customizers.
///
/// Owns a Docker client, the host working directory to mount into build
/// containers, the resolved [`ExecutionContext`] and an immutable
/// snapshot of the host environment. The snapshot keeps customizer
/// behavior deterministic with respect to construction time.
pub struct Runtime {
    client: Docker,
    workdir: PathBuf,
    context: ExecutionContext,
    host_env: BTreeMap<String, String>,
}

impl Runtime {
    /// Connects to the local Docker daemon and snapshots the host
    /// environment.
    ///
    /// Connection setup is lazy; no daemon round-trip happens here.
    pub fn connect(workdir: impl Into<PathBuf>) -> Result<Self> {
        let client = Docker::connect_with_local_defaults()?;
        let host_env: BTreeMap<String, String> = std::env::vars().collect();
        let context = ExecutionContext::detect(&host_env);

        Ok(Self {
            client,
            workdir: workdir.into(),
            context,
            host_env,
        })
    }

    /// Builds a runtime from explicit parts.
    pub fn with_parts(
        client: Docker,
        workdir: impl Into<PathBuf>,
        context: ExecutionContext,
        host_env: BTreeMap<String, String>,
    ) -> Self {
        Self {
            client,
            workdir: workdir.into(),
            context,
            host_env,
        }
    }

    /// The Docker client.
    pub fn client(&self) -> &Docker {
        &self.client
    }

    /// Host directory mounted into build containers.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// The resolved execution context.
    pub fn context(&self) -> ExecutionContext {
        self.context
    }

    /// True when running under a CI provider.
    pub fn is_ci(&self) -> bool {
        self.context.is_ci()
    }

    /// Looks up a variable in the environment snapshot.
    pub fn host_env(&self, key: &str) -> Option<&str> {
        self.host_env.get(key).map(String::as_str)
    }

    /// The full environment snapshot, in key order.
    pub fn host_env_vars(&self) -> &BTreeMap<String, String> {
        &self.host_env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> BTreeMap<String, String> {
        vars.iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_detect_ci_from_ci_variable() {
        assert_eq!(
            ExecutionContext::detect(&env(&[("CI", "true")])),
            ExecutionContext::Ci
        );
        assert_eq!(
            ExecutionContext::detect(&env(&[("CI", "1")])),
            ExecutionContext::Ci
        );
    }

    #[test]
    fn test_detect_ci_from_github_actions() {
        assert_eq!(
            ExecutionContext::detect(&env(&[("GITHUB_ACTIONS", "true")])),
            ExecutionContext::Ci
        );
    }

    #[test]
    fn test_detect_local_when_unset_or_falsy() {
        assert_eq!(
            ExecutionContext::detect(&env(&[])),
            ExecutionContext::Local
        );
        assert_eq!(
            ExecutionContext::detect(&env(&[("CI", "false")])),
            ExecutionContext::Local
        );
    }

    #[test]
    fn test_runtime_accessors() {
        let client = Docker::connect_with_local_defaults().expect("local docker client");
        let runtime = Runtime::with_parts(
            client,
            "/tmp/project",
            ExecutionContext::Ci,
            env(&[("GITHUB_TOKEN", "t0ken")]),
        );

        assert!(runtime.is_ci());
        assert_eq!(runtime.workdir(), Path::new("/tmp/project"));
        assert_eq!(runtime.host_env("GITHUB_TOKEN"), Some("t0ken"));
        assert_eq!(runtime.host_env("MISSING"), None);
    }
}
