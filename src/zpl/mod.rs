//! # ZPL Label Generation
//!
//! Builds ZPL (Zebra Programming Language) label markup from structured
//! item lists.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`ean8`] | EAN-8 code derivation and check digit |
//! | [`profile`] | Label layout profiles (geometry, symbology, origins) |
//! | [`template`] | `^XA…^XZ` block generation |

pub mod ean8;
pub mod profile;
pub mod template;

pub use profile::{LayoutProfile, Orientation, Symbology};
pub use template::{LabelBatch, LabelItem, build_labels};
