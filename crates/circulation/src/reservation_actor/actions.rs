//! Custom actions for the Reservation actor.

/// State transitions on a reservation. Both are only allowed from PENDING.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationAction {
    /// The member picked the book up.
    Fulfill,
    Cancel,
}
