//! Corpus/meta session state and link resolution.
//!
//! [`Session`] is the single mutation authority for header selection state:
//! include flags, datatypes, the corpus text header, and the per-side link
//! headers. Every mutation re-validates the role invariants, so the store is
//! never observable in an inconsistent state.
//!
//! [`merge_frames`] performs the link-resolution join once both sides have a
//! designated link header; [`Session::materialize`] combines casting and
//! merging into the full output pipeline.
//!
//! # Example
//!
//! ```ignore
//! use corpus_model::DatasetSide;
//! use corpus_session::{LinkStatus, Session};
//!
//! let mut session = Session::new();
//! session.load_corpus(corpus_headers);
//! session.load_meta(meta_headers);
//! session.set_text_header(Some("text"))?;
//! session.set_link_header(DatasetSide::Corpus, Some("id"))?;
//! session.set_link_header(DatasetSide::Meta, Some("doc"))?;
//! assert_eq!(session.link_status(), LinkStatus::Resolved);
//! let merged = session.materialize(&corpus_df, Some(&meta_df))?;
//! ```

mod collection;
mod error;
mod merge;
mod session;

pub use collection::HeaderCollection;
pub use error::{HeaderRole, MaterializeError, MergeError, SessionError};
pub use merge::merge_frames;
pub use session::{LinkStatus, Session, SessionPhase};
