//! Pure Tambola game rules.
//!
//! No I/O, no async, no room state — just the two algorithms the room
//! coordinator leans on:
//!
//! - [`generate_ticket`] — a structurally valid 3×9 ticket from any RNG.
//! - [`validate_claim`] — pattern adjudication against the drawn set.

mod claim;
mod ticket;

pub use claim::validate_claim;
pub use ticket::{column_range, generate_ticket};
