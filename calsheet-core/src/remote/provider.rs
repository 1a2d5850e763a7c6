//! Provider subprocess protocol.
//!
//! The course platform is reached through an external provider binary
//! (e.g. `calsheet-provider-canvas`) speaking JSON over stdin/stdout. Each
//! call spawns the binary, writes one request line and reads one response.
//!
//! Providers manage their own credentials and transport. Failures on their
//! side are fatal to the run and are surfaced as-is.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

use crate::error::{CalsheetError, CalsheetResult};
use crate::remote::protocol::{Command, ProviderCommand, Request, Response};

#[derive(Clone, Debug)]
pub struct Provider {
    name: String,
    timeout_secs: u64,
}

impl Provider {
    pub fn new(name: &str, timeout_secs: u64) -> Self {
        Provider {
            name: name.to_string(),
            timeout_secs,
        }
    }

    pub fn binary_name(&self) -> String {
        format!("calsheet-provider-{}", self.name)
    }

    fn binary_path(&self) -> CalsheetResult<PathBuf> {
        let binary_name = self.binary_name();
        which::which(&binary_name).map_err(|_| CalsheetError::ProviderNotInstalled(binary_name))
    }

    /// Call a typed provider command and return the result.
    ///
    /// The response type is inferred from the command's associated type.
    pub async fn call<C: ProviderCommand>(&self, cmd: C) -> CalsheetResult<C::Response> {
        timeout(
            Duration::from_secs(self.timeout_secs),
            self.call_raw(C::command(), cmd),
        )
        .await
        .map_err(|_| CalsheetError::ProviderTimeout(self.timeout_secs))?
    }

    async fn call_raw<P: Serialize, R: serde::de::DeserializeOwned>(
        &self,
        command: Command,
        params: P,
    ) -> CalsheetResult<R> {
        let params = serde_json::to_value(params)
            .map_err(|e| CalsheetError::Serialization(e.to_string()))?;
        let request = Request { command, params };
        let request_json = serde_json::to_string(&request)
            .map_err(|e| CalsheetError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;
        tracing::debug!(provider = %self.name, ?command, "calling provider");

        let mut child = TokioCommand::new(&binary_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                CalsheetError::Provider(format!("Failed to spawn {}: {}", binary_path.display(), e))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| CalsheetError::Provider("Provider stdin unavailable".into()))?;
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await?;
        drop(stdin);

        let output = child.wait_with_output().await?;

        if !output.status.success() {
            return Err(CalsheetError::Provider(format!(
                "Provider exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        parse_response(&String::from_utf8_lossy(&output.stdout))
    }
}

fn parse_response<R: serde::de::DeserializeOwned>(raw: &str) -> CalsheetResult<R> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CalsheetError::Provider(
            "Provider returned no response".into(),
        ));
    }

    let response: Response<R> = serde_json::from_str(raw)
        .map_err(|e| CalsheetError::Provider(format!("Failed to parse response: {}", e)))?;

    match response {
        Response::Success { data } => Ok(data),
        Response::Error { error } => Err(CalsheetError::Provider(error)),
    }
}
