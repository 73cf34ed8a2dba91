//! Address range processing.
//!
//! - [`deaggregate`] - covering an address range with CIDR blocks
//! - [`split`] - splitting a network into right-sized subnets

mod deaggregate;
mod split;

// Re-export public functions
pub use deaggregate::{deaggregate, deaggregate_range, lo_mask};
pub use split::{block_size_for, split_network, split_range};
