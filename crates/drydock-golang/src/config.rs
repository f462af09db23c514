//! Go toolchain configuration and functional options.

use std::collections::BTreeMap;

use drydock_core::{ConfigOption, Runtime};
use serde::{Deserialize, Serialize};

/// Default image repository for the Go toolchain.
pub const DEFAULT_IMAGE_REPO: &str = "docker.io/golang";

/// Default image tag for the Go toolchain.
pub const DEFAULT_IMAGE_TAG: &str = "1.19";

/// Configuration for a Go toolchain container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GolangConfig {
    /// Image repository to pull the toolchain from.
    pub image_repo: String,

    /// Image tag to pull.
    pub image_tag: String,

    /// Arguments passed to `go`.
    pub args: Vec<String>,

    /// Extra environment variables for the container.
    pub env: BTreeMap<String, String>,
}

impl GolangConfig {
    /// Reads configuration defaults from the runtime's host environment
    /// snapshot.
    ///
    /// `GO_IMAGE_REPO` and `GO_IMAGE_TAG` override the image address and
    /// must be non-empty to take effect; `GO_ARGS` is split on
    /// whitespace. Unset variables fall back to the documented defaults.
    /// An empty repo or tag is treated as unset and silently falls back
    /// rather than failing configuration load.
    pub fn from_runtime(runtime: &Runtime) -> Self {
        let non_empty = |key: &str, default: &str| match runtime.host_env(key) {
            Some(value) if !value.is_empty() => value.to_string(),
            _ => default.to_string(),
        };

        let args = runtime
            .host_env("GO_ARGS")
            .map(|raw| raw.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        Self {
            image_repo: non_empty("GO_IMAGE_REPO", DEFAULT_IMAGE_REPO),
            image_tag: non_empty("GO_IMAGE_TAG", DEFAULT_IMAGE_TAG),
            args,
            env: BTreeMap::new(),
        }
    }
}

/// Sets the image repository. Optional, defaults to `docker.io/golang`.
pub fn with_image_repo(repo: String) -> ConfigOption<GolangConfig> {
    Box::new(move |mut config| {
        config.image_repo = repo;
        config
    })
}

/// Sets the image tag. Optional, defaults to `1.19`.
pub fn with_image_tag(tag: String) -> ConfigOption<GolangConfig> {
    Box::new(move |mut config| {
        config.image_tag = tag;
        config
    })
}

/// Sets the arguments to pass to `go`.
///
/// An empty vector yields an explicitly empty argument list, distinct
/// from leaving the environment default in place.
pub fn with_args(args: Vec<String>) -> ConfigOption<GolangConfig> {
    Box::new(move |mut config| {
        config.args = args;
        config
    })
}

/// Sets the environment variables to pass to the container.
pub fn with_env(env: BTreeMap<String, String>) -> ConfigOption<GolangConfig> {
    Box::new(move |mut config| {
        config.env = env;
        config
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bollard::Docker;
    use drydock_core::{apply_options, ExecutionContext};

    fn runtime(vars: &[(&str, &str)]) -> Runtime {
        let client = Docker::connect_with_local_defaults().expect("local docker client");
        let env: BTreeMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Runtime::with_parts(client, "/tmp/project", ExecutionContext::Local, env)
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = GolangConfig::from_runtime(&runtime(&[]));
        assert_eq!(config.image_repo, DEFAULT_IMAGE_REPO);
        assert_eq!(config.image_tag, DEFAULT_IMAGE_TAG);
        assert!(config.args.is_empty());
        assert!(config.env.is_empty());
    }

    #[test]
    fn test_environment_overrides() {
        let config = GolangConfig::from_runtime(&runtime(&[
            ("GO_IMAGE_REPO", "ghcr.io/golang"),
            ("GO_IMAGE_TAG", "1.21"),
            ("GO_ARGS", "test -race ./..."),
        ]));

        assert_eq!(config.image_repo, "ghcr.io/golang");
        assert_eq!(config.image_tag, "1.21");
        assert_eq!(config.args, vec!["test", "-race", "./..."]);
    }

    #[test]
    fn test_empty_repo_and_tag_fall_back_to_defaults() {
        let config = GolangConfig::from_runtime(&runtime(&[
            ("GO_IMAGE_REPO", ""),
            ("GO_IMAGE_TAG", ""),
        ]));

        assert_eq!(config.image_repo, DEFAULT_IMAGE_REPO);
        assert_eq!(config.image_tag, DEFAULT_IMAGE_TAG);
    }

    #[test]
    fn test_empty_args_variable_yields_no_args() {
        let config = GolangConfig::from_runtime(&runtime(&[("GO_ARGS", "")]));
        assert!(config.args.is_empty());
    }

    #[test]
    fn test_options_apply_in_order_last_wins() {
        let config = apply_options(
            GolangConfig::from_runtime(&runtime(&[])),
            vec![
                with_image_tag("1.20".to_string()),
                with_image_repo("ghcr.io/golang".to_string()),
                with_image_tag("1.21".to_string()),
            ],
        );

        assert_eq!(config.image_tag, "1.21");
        assert_eq!(config.image_repo, "ghcr.io/golang");
        assert!(config.args.is_empty(), "untouched field keeps default");
    }

    #[test]
    fn test_with_args_empty_is_distinct_from_unset() {
        let base = GolangConfig::from_runtime(&runtime(&[("GO_ARGS", "build ./...")]));
        assert_eq!(base.args, vec!["build", "./..."]);

        let config = apply_options(base, vec![with_args(Vec::new())]);
        assert!(config.args.is_empty(), "explicit empty args replace the default");
    }

    #[test]
    fn test_with_env_replaces_the_map() {
        let vars: BTreeMap<String, String> =
            [("CGO_ENABLED".to_string(), "0".to_string())].into_iter().collect();

        let config = apply_options(
            GolangConfig::from_runtime(&runtime(&[])),
            vec![with_env(vars.clone())],
        );

        assert_eq!(config.env, vars);
    }
}
