/*! IGT types.

An [Igt] holds tiers of [Line]s: the `raw` tier comes from ingestion,
`cleaned` and `normalized` ones are derived from it and never overwritten.
!*/
pub mod columns;
mod line;
pub mod metadata;
mod record;
mod tag;
mod tier;

pub use line::Line;
pub use metadata::Metadata;
pub use record::{Igt, Language};
pub use tag::{Kind, Primary, Secondary, Tag};
pub use tier::{Tier, TierState};
