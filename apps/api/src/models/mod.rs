pub mod preview;
pub mod section;

pub use preview::{ApplyOutcome, BulletRecord, ImprovedSections, ImprovementPreview, SectionChange};
pub use section::{CoreSections, SectionKind};
