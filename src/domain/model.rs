use serde::{Deserialize, Serialize};
use std::fmt;

/// 一天的時段數量 (0..=23)
pub const HOURS_PER_DAY: u8 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub name: String,
    pub price_minor: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Resource {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price_minor: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price_minor,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub resource_id: String,
    pub date: String,
    pub hour: u8,
    pub customer_name: String,
    pub customer_phone: String,
}

impl Booking {
    /// 以 (resource, date, hour) 產生固定的預約 ID。
    /// 同一時段的重複嘗試會得到相同 ID，唯一性由 ledger 的時段索引保證。
    pub fn derive_id(resource_id: &str, date: &str, hour: u8) -> String {
        format!("{}:{}:{}", resource_id, date, hour)
    }

    pub fn slot_key(&self) -> SlotKey {
        SlotKey {
            resource_id: self.resource_id.clone(),
            date: self.date.clone(),
            hour: self.hour,
        }
    }
}

/// Ledger 唯一性檢查使用的複合鍵
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    pub resource_id: String,
    pub date: String,
    pub hour: u8,
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:02}:00", self.resource_id, self.date, self.hour)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub hour: u8,
    pub available: bool,
}

/// 呼叫端送入的預約請求。hour 用有號整數，才能表達 -1 這類越界輸入。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub resource_id: String,
    pub date: String,
    pub hour: i64,
    pub customer_name: String,
    pub customer_phone: String,
}

impl ReservationRequest {
    pub fn new(
        resource_id: impl Into<String>,
        date: impl Into<String>,
        hour: i64,
        customer_name: impl Into<String>,
        customer_phone: impl Into<String>,
    ) -> Self {
        Self {
            resource_id: resource_id.into(),
            date: date.into(),
            hour,
            customer_name: customer_name.into(),
            customer_phone: customer_phone.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    #[error("Hour must be between 0 and 23.")]
    InvalidInput,
    #[error("This bike does not exist.")]
    UnknownResource,
    #[error("This time has already been reserved.")]
    SlotTaken,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReservationOutcome {
    Committed { booking: Booking },
    Rejected { reason: RejectReason },
}

impl ReservationOutcome {
    pub fn rejected(reason: RejectReason) -> Self {
        Self::Rejected { reason }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    pub fn booking_id(&self) -> Option<&str> {
        match self {
            Self::Committed { booking } => Some(&booking.id),
            Self::Rejected { .. } => None,
        }
    }

    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            Self::Committed { .. } => None,
            Self::Rejected { reason } => Some(*reason),
        }
    }

    /// 對應舊 API 回應中的 code 欄位
    pub fn code(&self) -> u16 {
        match self {
            Self::Committed { .. } => 200,
            Self::Rejected { .. } => 400,
        }
    }

    pub fn success(&self) -> bool {
        self.is_committed()
    }

    pub fn message(&self) -> Option<String> {
        self.reject_reason().map(|reason| reason.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_id_is_deterministic() {
        assert_eq!(Booking::derive_id("1", "2023-02-15", 2), "1:2023-02-15:2");
        assert_eq!(
            Booking::derive_id("1", "2023-02-15", 12),
            Booking::derive_id("1", "2023-02-15", 12)
        );
        // 有分隔符號，不會和 "11" + "...1" 之類的組合撞在一起
        assert_ne!(
            Booking::derive_id("1", "2023-02-15", 12),
            Booking::derive_id("12", "023-02-15", 1)
        );
    }

    #[test]
    fn test_outcome_result_fields() {
        let booking = Booking {
            id: Booking::derive_id("1", "2023-02-15", 2),
            resource_id: "1".to_string(),
            date: "2023-02-15".to_string(),
            hour: 2,
            customer_name: "A".to_string(),
            customer_phone: "000".to_string(),
        };
        let committed = ReservationOutcome::Committed { booking };
        assert_eq!(committed.code(), 200);
        assert!(committed.success());
        assert_eq!(committed.message(), None);
        assert_eq!(committed.booking_id(), Some("1:2023-02-15:2"));

        let taken = ReservationOutcome::rejected(RejectReason::SlotTaken);
        assert_eq!(taken.code(), 400);
        assert!(!taken.success());
        assert_eq!(
            taken.message().as_deref(),
            Some("This time has already been reserved.")
        );
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = ReservationOutcome::rejected(RejectReason::InvalidInput);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "rejected", "reason": "invalid_input"})
        );
    }
}
