//! Matching engine for deduplicating a small record list against a master list.
//!
//! Each small record runs through a fixed cascade (exact email, fuzzy name,
//! then fuzzy address gated on country/zip/state and house number) and ends up
//! either as a duplicate carrying its match provenance or as a non-duplicate.

#![deny(unsafe_code)]

mod dedupe;
pub mod email_index;
pub mod engine;
pub mod normalize;
pub mod similarity;

pub use dedupe::{Progress, deduplicate, deduplicate_with_progress};
pub use email_index::EmailIndex;
pub use engine::MatchEngine;
pub use normalize::{concat_address, leading_number, normalize_name, split_emails};
pub use similarity::{distance, round_score, similarity};
