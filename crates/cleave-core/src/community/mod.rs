//! Community detection.
//!
//! The only detector is Girvan-Newman ([`girvan_newman`]): repeatedly cut
//! the edge with the highest betweenness and report the connected components
//! each time the graph falls into more pieces.
//!
//! ```rust,ignore
//! use cleave_core::community::GirvanNewman;
//!
//! // First three levels of the hierarchy.
//! for (level, partition) in GirvanNewman::new(&g).take(3).enumerate() {
//!     let s = partition.summary();
//!     println!("level {level}: {} communities, sizes {}..={}", s.communities, s.smallest, s.largest);
//! }
//! ```

pub mod girvan_newman;

pub use crate::graph::{Partition, PartitionSummary};
pub use girvan_newman::{GirvanNewman, girvan_newman};
