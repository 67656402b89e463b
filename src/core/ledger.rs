use crate::core::{Booking, Ledger, SlotConflict};
use std::collections::{BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DayKey {
    resource_id: String,
    date: String,
}

#[derive(Debug, Default)]
struct LedgerState {
    // 依寫入順序保存
    bookings: Vec<Booking>,
    booked_hours: HashMap<DayKey, BTreeSet<u8>>,
}

/// 記憶體內只增不改的 ledger；檢查與寫入共用同一把寫鎖
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    state: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    // 臨界區內不會 panic，遇到 poison 直接取回內部狀態即可
    fn read(&self) -> RwLockReadGuard<'_, LedgerState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, LedgerState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Ledger for InMemoryLedger {
    fn find_by_resource_and_date(&self, resource_id: &str, date: &str) -> BTreeSet<u8> {
        let key = DayKey {
            resource_id: resource_id.to_string(),
            date: date.to_string(),
        };
        self.read().booked_hours.get(&key).cloned().unwrap_or_default()
    }

    fn try_append(&self, booking: Booking) -> Result<(), SlotConflict> {
        let mut state = self.write();

        let hours = state
            .booked_hours
            .entry(DayKey {
                resource_id: booking.resource_id.clone(),
                date: booking.date.clone(),
            })
            .or_default();

        if !hours.insert(booking.hour) {
            return Err(SlotConflict {
                key: booking.slot_key(),
            });
        }

        state.bookings.push(booking);
        Ok(())
    }

    fn all(&self) -> Vec<Booking> {
        self.read().bookings.clone()
    }

    fn len(&self) -> usize {
        self.read().bookings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn booking(resource_id: &str, date: &str, hour: u8, name: &str) -> Booking {
        Booking {
            id: Booking::derive_id(resource_id, date, hour),
            resource_id: resource_id.to_string(),
            date: date.to_string(),
            hour,
            customer_name: name.to_string(),
            customer_phone: "01012345678".to_string(),
        }
    }

    #[test]
    fn test_append_and_find() {
        let ledger = InMemoryLedger::new();
        assert!(ledger.is_empty());

        ledger.try_append(booking("1", "2023-02-15", 2, "A")).unwrap();
        ledger.try_append(booking("1", "2023-02-15", 5, "B")).unwrap();
        ledger.try_append(booking("1", "2023-02-16", 2, "C")).unwrap();
        ledger.try_append(booking("2", "2023-02-15", 2, "D")).unwrap();

        let hours: Vec<u8> = ledger
            .find_by_resource_and_date("1", "2023-02-15")
            .into_iter()
            .collect();
        assert_eq!(hours, vec![2, 5]);
        assert!(ledger.find_by_resource_and_date("3", "2023-02-15").is_empty());
        assert_eq!(ledger.len(), 4);
    }

    #[test]
    fn test_conflict_does_not_mutate() {
        let ledger = InMemoryLedger::new();
        ledger.try_append(booking("1", "2023-02-15", 2, "A")).unwrap();

        let err = ledger
            .try_append(booking("1", "2023-02-15", 2, "B"))
            .unwrap_err();
        assert_eq!(err.key.hour, 2);
        assert_eq!(err.key.resource_id, "1");

        let all = ledger.all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].customer_name, "A");
    }

    #[test]
    fn test_all_keeps_commit_order() {
        let ledger = InMemoryLedger::new();
        for hour in [7, 3, 11] {
            ledger.try_append(booking("1", "2023-03-17", hour, "A")).unwrap();
        }
        let hours: Vec<u8> = ledger.all().iter().map(|b| b.hour).collect();
        assert_eq!(hours, vec![7, 3, 11]);
    }

    #[test]
    fn test_concurrent_append_same_slot_single_winner() {
        let ledger = Arc::new(InMemoryLedger::new());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || {
                    ledger
                        .try_append(booking("1", "2023-02-15", 9, &format!("user-{}", i)))
                        .is_ok()
                })
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(ledger.len(), 1);
    }
}
