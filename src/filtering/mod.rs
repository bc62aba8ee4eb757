/*! Line pair filters

Filters implement [filter::Filter], a pure detection over an item.
They never mutate what they inspect, and are used to gate merging decisions
(see [alignment::Alignment]).
! */
pub mod alignment;
mod filter;

pub use alignment::Alignment;
pub use filter::Filter;
