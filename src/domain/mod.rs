//! Domain logic - pure business rules independent of git operations

pub mod commit;
pub mod tag;
pub mod version;

pub use commit::CommitRecord;
pub use tag::{TagInfo, TagNaming};
pub use version::{BumpLevel, Version};
