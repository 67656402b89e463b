use crate::core::{
    Booking, Catalog, Ledger, RejectReason, ReservationOutcome, ReservationRequest, HOURS_PER_DAY,
};
use std::sync::Arc;

/// 單次預約：驗證、預檢查、寫入；以 try_append 的結果為準，不重試
pub struct ReservationService<C: Catalog, L: Ledger> {
    catalog: Arc<C>,
    ledger: Arc<L>,
}

impl<C: Catalog, L: Ledger> ReservationService<C, L> {
    pub fn new(catalog: Arc<C>, ledger: Arc<L>) -> Self {
        Self { catalog, ledger }
    }

    pub fn reserve(&self, request: ReservationRequest) -> ReservationOutcome {
        let span = tracing::info_span!(
            "reserve",
            resource_id = %request.resource_id,
            date = %request.date,
            hour = request.hour
        );
        let _enter = span.enter();

        // Validating
        tracing::debug!("phase: validating");
        let hour = match u8::try_from(request.hour) {
            Ok(hour) if hour < HOURS_PER_DAY => hour,
            _ => return self.reject(RejectReason::InvalidInput),
        };
        if !self.catalog.contains(&request.resource_id) {
            return self.reject(RejectReason::UnknownResource);
        }

        // Checking
        tracing::debug!("phase: checking");
        if self
            .ledger
            .find_by_resource_and_date(&request.resource_id, &request.date)
            .contains(&hour)
        {
            return self.reject(RejectReason::SlotTaken);
        }

        // Committing
        tracing::debug!("phase: committing");
        let booking = Booking {
            id: Booking::derive_id(&request.resource_id, &request.date, hour),
            resource_id: request.resource_id,
            date: request.date,
            hour,
            customer_name: request.customer_name,
            customer_phone: request.customer_phone,
        };

        match self.ledger.try_append(booking.clone()) {
            Ok(()) => {
                tracing::info!("✅ Booking {} committed", booking.id);
                ReservationOutcome::Committed { booking }
            }
            Err(conflict) => {
                tracing::warn!("Lost commit race: {}", conflict);
                self.reject(RejectReason::SlotTaken)
            }
        }
    }

    fn reject(&self, reason: RejectReason) -> ReservationOutcome {
        tracing::info!("❌ Reservation rejected: {:?}", reason);
        ReservationOutcome::rejected(reason)
    }
}
