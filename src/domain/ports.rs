use crate::domain::model::{Booking, ReservationOutcome, ReservationRequest, Resource, Slot, SlotKey};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::BTreeSet;

/// 可預約資源的唯讀目錄
pub trait Catalog: Send + Sync {
    fn get(&self, id: &str) -> Result<Resource>;
    fn list(&self) -> Vec<Resource>;

    fn contains(&self, id: &str) -> bool {
        self.get(id).is_ok()
    }
}

/// 已寫入的時段與新預約衝突
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("slot already booked: {key}")]
pub struct SlotConflict {
    pub key: SlotKey,
}

/// 已成立預約的唯一存放處，負責 (resource, date, hour) 唯一性
pub trait Ledger: Send + Sync {
    fn find_by_resource_and_date(&self, resource_id: &str, date: &str) -> BTreeSet<u8>;

    /// 檢查與寫入必須在同一個臨界區內完成；衝突時不得修改狀態。
    fn try_append(&self, booking: Booking) -> std::result::Result<(), SlotConflict>;

    fn all(&self) -> Vec<Booking>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 對外呼叫端 (CLI、未來的 API 層) 使用的介面
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn list_resources(&self) -> Vec<Resource>;
    async fn list_bookings(&self) -> Vec<Booking>;
    async fn get_availability(&self, resource_id: &str, date: &str) -> Vec<Slot>;
    async fn reserve(&self, request: ReservationRequest) -> ReservationOutcome;
    async fn resource_exists(&self, resource_id: &str) -> bool;
}
