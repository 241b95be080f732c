pub mod cache;
pub mod db;
pub mod index;
pub mod label;
pub mod merge;

pub use cache::{CacheRecord, MemoryCache, SearchCache};
pub use db::Database;
pub use index::{Candidate, SkillIndex};
pub use label::normalize_label;
pub use merge::MultiSkillIter;
