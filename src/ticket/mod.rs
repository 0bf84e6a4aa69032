//! # Ticket Rendering
//!
//! Fixed-column receipt layout for ESC/POS printers.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`model`] | Request schema ([`TicketModel`]) |
//! | [`layout`] | Column layout, computed totals, embedded raster blocks |

pub mod layout;
pub mod model;

pub use layout::{DEFAULT_COLUMNS, RenderedTicket, align_right, center, render};
pub use model::{TicketItem, TicketModel};
