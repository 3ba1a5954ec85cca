//! Layout calculation modules for regrouping
//!
//! This module handles everything between the group index and rendering:
//! - Batch planning (which groups share a sheet)
//! - Duplex pairing (which page goes in which slot, front and back)
//! - Grid geometry and content placement

mod batch;
mod duplex;
mod grid;
mod placement;
mod sheet;
mod types;

pub use batch::*;
pub use duplex::*;
pub use grid::*;
pub use placement::*;
pub use sheet::*;
pub use types::*;
