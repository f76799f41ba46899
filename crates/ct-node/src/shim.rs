//! # Command Shim
//!
//! Line-delimited JSON over any async reader/writer pair (stdin/stdout in
//! the binary). One request object per line, one response object per line.
//!
//! ```text
//! {"op":"create","caller":"0x..","sender":"0x..","receiver":"0x..","weight":1000}
//! {"op":"mark_in_transit","caller":"0x..","cargo_id":1}
//! {"op":"mark_delivered","caller":"0x..","cargo_id":1}
//! {"op":"get","cargo_id":1}
//! {"op":"owner"}
//! {"op":"metrics"}
//! ```
//!
//! Responses carry a fresh correlation id:
//!
//! ```text
//! {"correlation_id":"..","ok":true,"result":{"cargo_id":1}}
//! {"correlation_id":"..","ok":true,"result":{"cargo_id":1,"shipping_status":"IN_TRANSIT","shipping_status_code":2}}
//! {"correlation_id":"..","ok":false,"error":{"code":"NotFound","message":".."}}
//! ```

use ct_01_cargo_registry::{CargoRegistryApi, RegistryError};
use ct_telemetry::TelemetryError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Number, Value};
use shared_types::{CargoId, Identity, ShippingStatus};
use std::io;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn, Instrument};
use uuid::Uuid;

/// One parsed request line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Register a cargo.
    Create {
        caller: Identity,
        sender: Identity,
        receiver: Identity,
        /// Any JSON number, so that negative input maps to `InvalidWeight`.
        weight: Number,
    },
    /// Advance to `IN_TRANSIT`.
    MarkInTransit { caller: Identity, cargo_id: CargoId },
    /// Deliver and purge.
    MarkDelivered { caller: Identity, cargo_id: CargoId },
    /// Read one record.
    Get { cargo_id: CargoId },
    /// Read the owner.
    Owner,
    /// Prometheus text exposition of the registry metrics.
    Metrics,
}

/// Errors surfaced to shim clients.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The line is not a valid command.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The registry rejected the command.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The result could not be encoded.
    #[error("failed to encode result: {0}")]
    Encode(#[from] serde_json::Error),

    /// Metrics could not be gathered.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

impl CommandError {
    /// Code placed in the response's `error.code`.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BadRequest",
            Self::Registry(err) => err.code(),
            Self::Encode(_) | Self::Telemetry(_) => "Internal",
        }
    }
}

/// Error payload of a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// One response line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub correlation_id: Uuid,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl CommandResponse {
    fn success(correlation_id: Uuid, result: Value) -> Self {
        Self {
            correlation_id,
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    fn failure(correlation_id: Uuid, err: &CommandError) -> Self {
        Self {
            correlation_id,
            ok: false,
            result: None,
            error: Some(ErrorBody {
                code: err.code().to_string(),
                message: err.to_string(),
            }),
        }
    }
}

/// Translates commands into registry calls.
pub struct CommandHandler<A: CargoRegistryApi + ?Sized> {
    api: Arc<A>,
}

impl<A: CargoRegistryApi + ?Sized> Clone for CommandHandler<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A: CargoRegistryApi + ?Sized> CommandHandler<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Run one command against the registry.
    ///
    /// # Errors
    ///
    /// Registry rejections and out-of-range weights.
    pub async fn execute(&self, command: Command) -> Result<Value, CommandError> {
        match command {
            Command::Create {
                caller,
                sender,
                receiver,
                weight,
            } => {
                let weight = parse_weight(&weight)?;
                let cargo_id = self
                    .api
                    .create_cargo(caller, sender, receiver, weight)
                    .await?;
                Ok(json!({ "cargo_id": cargo_id }))
            }
            Command::MarkInTransit { caller, cargo_id } => {
                self.api.mark_in_transit(caller, cargo_id).await?;
                Ok(status_result(cargo_id, ShippingStatus::InTransit))
            }
            Command::MarkDelivered { caller, cargo_id } => {
                self.api.mark_delivered(caller, cargo_id).await?;
                Ok(status_result(cargo_id, ShippingStatus::Delivered))
            }
            Command::Get { cargo_id } => {
                let cargo = self.api.get_cargo_by_id(cargo_id).await?;
                let code = cargo.shipping_status.code();
                let mut result = serde_json::to_value(cargo)?;
                if let Value::Object(fields) = &mut result {
                    fields.insert("shipping_status_code".to_string(), json!(code));
                }
                Ok(result)
            }
            Command::Owner => Ok(json!({ "owner": self.api.owner().await })),
            Command::Metrics => Ok(json!({ "metrics": ct_telemetry::encode_metrics()? })),
        }
    }

    /// Parse and run one input line. Never fails: errors become responses.
    pub async fn handle_line(&self, line: &str) -> CommandResponse {
        let correlation_id = Uuid::new_v4();
        let span = ct_telemetry::registry_span!("command", %correlation_id);

        async {
            let outcome = match serde_json::from_str::<Command>(line) {
                Ok(command) => {
                    debug!(?command, "Command received");
                    self.execute(command).await
                }
                Err(e) => Err(CommandError::BadRequest(e.to_string())),
            };

            match outcome {
                Ok(result) => CommandResponse::success(correlation_id, result),
                Err(err) => {
                    warn!(code = err.code(), error = %err, "Command failed");
                    CommandResponse::failure(correlation_id, &err)
                }
            }
        }
        .instrument(span)
        .await
    }
}

/// Whole grams. Negative integers are a registry rejection; fractions and
/// values past `u64::MAX` are malformed input.
fn parse_weight(weight: &Number) -> Result<u64, CommandError> {
    if let Some(grams) = weight.as_u64() {
        return Ok(grams);
    }
    if weight.as_i64().is_some() {
        return Err(RegistryError::InvalidWeight.into());
    }
    Err(CommandError::BadRequest(format!(
        "weight {weight} is not a whole number of grams"
    )))
}

fn status_result(cargo_id: CargoId, status: ShippingStatus) -> Value {
    json!({
        "cargo_id": cargo_id,
        "shipping_status": status,
        "shipping_status_code": status.code(),
    })
}

/// Serve commands until `reader` reaches end of input.
///
/// Blank lines are skipped. Returns the number of responses written.
///
/// # Errors
///
/// I/O errors on either side.
pub async fn run_shim<A, R, W>(
    handler: &CommandHandler<A>,
    reader: R,
    mut writer: W,
) -> io::Result<u64>
where
    A: CargoRegistryApi + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut served = 0u64;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = handler.handle_line(&line).await;
        let mut encoded = serde_json::to_string(&response).map_err(io::Error::other)?;
        encoded.push('\n');
        writer.write_all(encoded.as_bytes()).await?;
        writer.flush().await?;
        served += 1;
    }

    Ok(served)
}
