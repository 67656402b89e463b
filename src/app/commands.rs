use crate::config::cli::Command;
use crate::core::{BookingApi, ReservationOutcome, ReservationRequest, Slot};
use crate::utils::error::{BookingError, Result};
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub body: String,
    /// 預約被拒絕時為 true，CLI 依此決定 exit code
    pub rejected: bool,
}

impl CommandOutput {
    fn ok(body: String) -> Self {
        Self {
            body,
            rejected: false,
        }
    }
}

/// 輸出格式；shell 的 JSON 模式一行一個物件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    JsonLines,
}

impl OutputFormat {
    pub fn is_json(self) -> bool {
        !matches!(self, OutputFormat::Text)
    }

    /// 序列化並補上結尾換行，連續輸出才不會黏在一起
    pub fn render<T: Serialize + ?Sized>(self, value: &T) -> Result<String> {
        let mut body = match self {
            OutputFormat::JsonLines => serde_json::to_string(value)?,
            OutputFormat::Text | OutputFormat::Json => serde_json::to_string_pretty(value)?,
        };
        body.push('\n');
        Ok(body)
    }
}

#[derive(Serialize)]
struct AvailabilityView<'a> {
    resource_id: &'a str,
    date: &'a str,
    catalogued: bool,
    slots: &'a [Slot],
}

#[derive(Serialize)]
struct ReserveView<'a> {
    code: u16,
    success: bool,
    message: Option<String>,
    outcome: &'a ReservationOutcome,
}

pub async fn execute<A>(api: &A, command: &Command, format: OutputFormat) -> Result<CommandOutput>
where
    A: BookingApi + ?Sized,
{
    match command {
        Command::Resources => {
            let resources = api.list_resources().await;
            if format.is_json() {
                return Ok(CommandOutput::ok(format.render(&resources)?));
            }
            let mut body = String::new();
            for r in &resources {
                let _ = writeln!(
                    body,
                    "{}\t{}\t{}\t{}",
                    r.id,
                    r.name,
                    r.price_minor,
                    r.description.as_deref().unwrap_or("-")
                );
            }
            Ok(CommandOutput::ok(body))
        }
        Command::Bookings => {
            let bookings = api.list_bookings().await;
            if format.is_json() {
                return Ok(CommandOutput::ok(format.render(&bookings)?));
            }
            let mut body = String::new();
            if bookings.is_empty() {
                body.push_str("(no bookings)\n");
            }
            for b in &bookings {
                let _ = writeln!(
                    body,
                    "{}\t{}\t{}\t{:02}:00\t{}\t{}",
                    b.id, b.resource_id, b.date, b.hour, b.customer_name, b.customer_phone
                );
            }
            Ok(CommandOutput::ok(body))
        }
        Command::Availability { resource, date } => {
            let catalogued = api.resource_exists(resource).await;
            let slots = api.get_availability(resource, date).await;
            if format.is_json() {
                let view = AvailabilityView {
                    resource_id: resource.as_str(),
                    date: date.as_str(),
                    catalogued,
                    slots: &slots,
                };
                return Ok(CommandOutput::ok(format.render(&view)?));
            }
            let mut body = String::new();
            if !catalogued {
                let _ = writeln!(
                    body,
                    "⚠️  '{}' is not in the catalog; no bookings are recorded for it",
                    resource
                );
            }
            for slot in &slots {
                let state = if slot.available { "available" } else { "booked" };
                let _ = writeln!(body, "{:02}:00\t{}", slot.hour, state);
            }
            Ok(CommandOutput::ok(body))
        }
        Command::Reserve {
            resource,
            date,
            hour,
            name,
            phone,
        } => {
            let outcome = api
                .reserve(ReservationRequest::new(
                    resource.as_str(),
                    date.as_str(),
                    *hour,
                    name.as_str(),
                    phone.as_str(),
                ))
                .await;
            let rejected = !outcome.success();
            let body = if format.is_json() {
                format.render(&ReserveView {
                    code: outcome.code(),
                    success: outcome.success(),
                    message: outcome.message(),
                    outcome: &outcome,
                })?
            } else {
                match &outcome {
                    ReservationOutcome::Committed { booking } => {
                        format!("✅ Reserved {} (code {})\n", booking.id, outcome.code())
                    }
                    ReservationOutcome::Rejected { reason } => {
                        format!("❌ {} (code {})\n", reason, outcome.code())
                    }
                }
            };
            Ok(CommandOutput { body, rejected })
        }
        Command::Shell => Err(BookingError::ConfigValidationError {
            field: "command".to_string(),
            message: "shell cannot be run as a single command".to_string(),
        }),
    }
}
