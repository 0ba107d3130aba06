//! Course folder operations

pub mod inspect;
pub mod provision;
pub mod record;
pub mod semester;
pub mod sync;

pub use record::CourseRecord;
pub use semester::Semester;
pub use sync::{synchronize, SyncAction, SyncPlan, SyncReport};
