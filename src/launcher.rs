use anyhow::{Context, Result};
use std::process::Stdio;

/// Hand the mailto URI to the configured mail client. The URI is passed as
/// one argument, no shell involved. The child is not awaited.
pub fn launch(client: &str, client_args: &[String], uri: &str) -> Result<u32> {
    let child = tokio::process::Command::new(client)
        .args(client_args)
        .arg(uri)
        .stdin(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to launch mail client '{client}'"))?;

    Ok(child.id().unwrap_or(0))
}
