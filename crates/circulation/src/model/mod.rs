//! Domain records and the value types they are built from.

pub mod borrowing;
pub mod ids;
pub mod number;
pub mod reservation;

pub use borrowing::*;
pub use ids::*;
pub use number::*;
pub use reservation::*;
