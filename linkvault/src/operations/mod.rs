//! Link lifecycle operations.
//!
//! Every operation is a method on [`LinkEngine`]. Mutating operations run
//! their filesystem steps inside a transaction: each completed step is
//! recorded, and when a later step fails the recorded ones are undone in
//! reverse order. The caller sees either success, the original error wrapped
//! in [`Error::RolledBack`](crate::Error::RolledBack), or
//! [`Error::PartialFailure`](crate::Error::PartialFailure) when the undo
//! itself failed.
//!
//! # Examples
//!
//! ```no_run
//! use linkvault::operations::{CreateOptions, LinkEngine, LinkState};
//! use linkvault::LinkStore;
//!
//! let store = LinkStore::open("/tmp/linkvault.json").unwrap();
//! let engine = LinkEngine::new(&store);
//!
//! let created = engine
//!     .create(CreateOptions::new("~/notes").with_name(Some("notes".to_string())))
//!     .unwrap();
//! assert_eq!(engine.status("notes").state, LinkState::Linked);
//!
//! engine.remove(created.record.name()).unwrap();
//! ```

pub mod batch;
pub mod create;
pub mod engine;
pub mod remove;
pub mod repair;
pub mod status;
pub mod transaction;

pub use batch::BatchReport;
pub use create::{CreateOptions, CreateResult};
pub use engine::LinkEngine;
pub use remove::RemoveResult;
pub use repair::RepairOutcome;
pub use status::{LinkState, LinkStatus};
pub use transaction::Step;
