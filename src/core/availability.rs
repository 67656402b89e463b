use crate::core::{Ledger, Slot, HOURS_PER_DAY};
use std::sync::Arc;

/// 從 ledger 推導某資源某日的 24 個時段
pub struct AvailabilityCalculator<L: Ledger> {
    ledger: Arc<L>,
}

impl<L: Ledger> AvailabilityCalculator<L> {
    pub fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    /// 回傳的是呼叫當下的快照。未知的 resource_id 不會報錯，所有時段都視為可預約。
    pub fn compute(&self, resource_id: &str, date: &str) -> Vec<Slot> {
        let booked = self.ledger.find_by_resource_and_date(resource_id, date);

        tracing::debug!(
            "Availability for {} on {}: {} of {} slots booked",
            resource_id,
            date,
            booked.len(),
            HOURS_PER_DAY
        );

        (0..HOURS_PER_DAY)
            .map(|hour| Slot {
                hour,
                available: !booked.contains(&hour),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ledger::InMemoryLedger;
    use crate::core::Booking;

    fn seeded_ledger() -> Arc<InMemoryLedger> {
        let ledger = Arc::new(InMemoryLedger::new());
        for (resource_id, date, hour) in [("1", "2023-02-15", 2), ("1", "2023-02-15", 23)] {
            ledger
                .try_append(Booking {
                    id: Booking::derive_id(resource_id, date, hour),
                    resource_id: resource_id.to_string(),
                    date: date.to_string(),
                    hour,
                    customer_name: "병도".to_string(),
                    customer_phone: "01012345678".to_string(),
                })
                .unwrap();
        }
        ledger
    }

    #[test]
    fn test_always_24_ascending_slots() {
        let calculator = AvailabilityCalculator::new(seeded_ledger());

        for (resource_id, date) in [("1", "2023-02-15"), ("1", "2023-02-16"), ("9", "x")] {
            let slots = calculator.compute(resource_id, date);
            assert_eq!(slots.len(), 24);
            for (i, slot) in slots.iter().enumerate() {
                assert_eq!(slot.hour as usize, i);
            }
        }
    }

    #[test]
    fn test_booked_hours_marked_unavailable() {
        let calculator = AvailabilityCalculator::new(seeded_ledger());
        let slots = calculator.compute("1", "2023-02-15");

        let unavailable: Vec<u8> = slots
            .iter()
            .filter(|s| !s.available)
            .map(|s| s.hour)
            .collect();
        assert_eq!(unavailable, vec![2, 23]);
    }

    #[test]
    fn test_unknown_resource_is_fully_available() {
        let calculator = AvailabilityCalculator::new(seeded_ledger());
        assert!(calculator
            .compute("no-such-bike", "2023-02-15")
            .iter()
            .all(|s| s.available));
    }

    #[test]
    fn test_result_is_a_snapshot() {
        let ledger = Arc::new(InMemoryLedger::new());
        let calculator = AvailabilityCalculator::new(Arc::clone(&ledger));

        let before = calculator.compute("1", "2023-02-15");
        ledger
            .try_append(Booking {
                id: Booking::derive_id("1", "2023-02-15", 4),
                resource_id: "1".to_string(),
                date: "2023-02-15".to_string(),
                hour: 4,
                customer_name: "A".to_string(),
                customer_phone: "000".to_string(),
            })
            .unwrap();

        assert!(before[4].available);
        assert!(!calculator.compute("1", "2023-02-15")[4].available);
    }
}
