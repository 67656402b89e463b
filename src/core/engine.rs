use crate::core::availability::AvailabilityCalculator;
use crate::core::reservation::ReservationService;
use crate::core::{
    Booking, BookingApi, Catalog, Ledger, ReservationOutcome, ReservationRequest, Resource, Slot,
};
use async_trait::async_trait;
use std::sync::Arc;

/// 對外的預約引擎，組合目錄、ledger、時段計算與預約服務
pub struct BookingEngine<C: Catalog, L: Ledger> {
    catalog: Arc<C>,
    ledger: Arc<L>,
    availability: AvailabilityCalculator<L>,
    reservations: ReservationService<C, L>,
}

impl<C: Catalog, L: Ledger> BookingEngine<C, L> {
    pub fn new(catalog: C, ledger: L) -> Self {
        Self::from_shared(Arc::new(catalog), Arc::new(ledger))
    }

    pub fn from_shared(catalog: Arc<C>, ledger: Arc<L>) -> Self {
        Self {
            availability: AvailabilityCalculator::new(Arc::clone(&ledger)),
            reservations: ReservationService::new(Arc::clone(&catalog), Arc::clone(&ledger)),
            catalog,
            ledger,
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }
}

#[async_trait]
impl<C: Catalog + 'static, L: Ledger + 'static> BookingApi for BookingEngine<C, L> {
    async fn list_resources(&self) -> Vec<Resource> {
        self.catalog.list()
    }

    async fn list_bookings(&self) -> Vec<Booking> {
        self.ledger.all()
    }

    async fn get_availability(&self, resource_id: &str, date: &str) -> Vec<Slot> {
        if !self.catalog.contains(resource_id) {
            // 查詢端不驗證資源，只提醒呼叫端；預約端才會拒絕
            tracing::warn!(
                "Availability requested for uncatalogued resource '{}', reporting all slots free",
                resource_id
            );
        }
        self.availability.compute(resource_id, date)
    }

    async fn reserve(&self, request: ReservationRequest) -> ReservationOutcome {
        self.reservations.reserve(request)
    }

    async fn resource_exists(&self, resource_id: &str) -> bool {
        self.catalog.contains(resource_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::InMemoryCatalog;
    use crate::core::ledger::InMemoryLedger;
    use crate::core::RejectReason;

    fn engine() -> BookingEngine<InMemoryCatalog, InMemoryLedger> {
        let catalog = InMemoryCatalog::new(vec![Resource::new("1", "bike1", 8_000_000)]).unwrap();
        BookingEngine::new(catalog, InMemoryLedger::new())
    }

    #[tokio::test]
    async fn test_reserve_then_availability() {
        let engine = engine();

        let outcome = engine
            .reserve(ReservationRequest::new("1", "2023-02-15", 2, "A", "000"))
            .await;
        assert!(outcome.is_committed());

        let slots = engine.get_availability("1", "2023-02-15").await;
        assert!(!slots[2].available);
        assert_eq!(slots.iter().filter(|s| s.available).count(), 23);

        let bookings = engine.list_bookings().await;
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].id, "1:2023-02-15:2");
    }

    #[tokio::test]
    async fn test_unknown_resource_asymmetry() {
        let engine = engine();

        assert!(!engine.resource_exists("7").await);
        let slots = engine.get_availability("7", "2023-02-15").await;
        assert!(slots.iter().all(|s| s.available));

        let outcome = engine
            .reserve(ReservationRequest::new("7", "2023-02-15", 2, "A", "000"))
            .await;
        assert_eq!(outcome.reject_reason(), Some(RejectReason::UnknownResource));
    }

    #[test]
    fn test_list_resources_blocking() {
        let engine = engine();
        let resources = tokio_test::block_on(engine.list_resources());
        assert_eq!(resources, vec![Resource::new("1", "bike1", 8_000_000)]);
    }
}
