//! Symbol mapping stage
//!
//! `map`/`demap` are generic over any [`Constellation`](crate::traits::Constellation);
//! [`Modulation`] is the runtime-selectable closed set of schemes used by
//! configuration and the runner.

mod mapper;
mod scheme;

pub use mapper::{demap, map};
pub use scheme::Modulation;
