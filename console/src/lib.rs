//! Console adapter for the dispatch core
//!
//! Stands in for the browser pages: the intake form, the responder
//! dashboard and the emergency view. Each turns user actions into calls on
//! the core and core records into display rows.

pub mod board;
pub mod emergency;
pub mod intake;

pub use board::{BoardView, ResponderBoard};
pub use emergency::EmergencyView;
pub use intake::{IntakeDesk, IntakeOutcome};
