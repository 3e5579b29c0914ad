//! Grouping engine for the diagram element crowdsourcing pipeline.
//!
//! Consumes one poll's worth of submitted point-annotation assignments and
//! turns them into the next round of grouping tasks:
//!
//! - [`gate`]: structural validation and the accept/reject verdict.
//! - [`resolver`]: maps drawn points onto original shapes.
//! - [`merger`]: merges matched shapes into a [`Group`](merger::Group).
//! - [`ledger`]: per-image deduplication of groups awaiting submission.
//! - [`expansion`]: one new task per source rotation of an image's groups.
//! - [`processor`]: [`JoinElements`], the callable tying it all together.
//! - [`platform`] / [`processed`]: the injected collaborators.

pub mod config;
pub mod expansion;
pub mod gate;
pub mod ledger;
pub mod merger;
pub mod platform;
pub mod processed;
pub mod processor;
pub mod resolver;

pub use config::JoinConfig;
pub use platform::{Assignment, Platform, PlatformError, TaskSubmission};
pub use processed::{MemoryProcessedStore, ProcessedStore};
pub use processor::{JoinElements, RunSummary};
