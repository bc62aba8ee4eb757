/*! Record processing

Identifier assignment and record splitting/grouping.
!*/
pub mod ids;
pub mod split;

pub use ids::{assign_ids, IdAssigner};
pub use split::{split_by, SplitKey};
