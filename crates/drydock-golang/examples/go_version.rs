//! Builds a `go version` container specification for the current
//! directory and prints the result.
//!
//! Local runs need an SSH agent (`SSH_AUTH_SOCK`); CI runs need
//! `GITHUB_TOKEN`.

use drydock_core::Runtime;
use drydock_golang::{container, with_args};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let runtime = Runtime::connect(std::env::current_dir()?)?;

    let spec = container(&runtime, vec![with_args(vec!["version".to_string()])]).await?;

    println!("image:   {}", spec.image().unwrap_or("<unset>"));
    println!("workdir: {}", spec.workdir().unwrap_or("<unset>"));
    println!("cmd:     {:?}", spec.cmd());
    for entry in spec.env() {
        println!("env:     {entry}");
    }

    println!("{}", serde_json::to_string_pretty(&spec.into_config())?);

    Ok(())
}
