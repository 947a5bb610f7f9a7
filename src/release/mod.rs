//! Release automation: version ledger, tag/release publication, and the
//! follow-up version-update proposal
//!
//! # Core invariants
//!
//! 1. **The tag and release carry the pre-bump version**: the version that
//!    was just deployed, read from durable storage at release time.
//! 2. **Exactly one version component increments per release**; a minor bump
//!    resets patch to 0.
//! 3. **Tags and proposal branches are append-only**: a name collision
//!    fails the run, it is never overwritten or retried under another name.

pub mod ledger;
pub mod proposal;
pub mod publisher;
