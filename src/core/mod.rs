pub mod availability;
pub mod catalog;
pub mod engine;
pub mod ledger;
pub mod reservation;

pub use crate::domain::model::{
    Booking, RejectReason, ReservationOutcome, ReservationRequest, Resource, Slot, SlotKey,
    HOURS_PER_DAY,
};
pub use crate::domain::ports::{BookingApi, Catalog, Ledger, SlotConflict};
pub use crate::utils::error::Result;
