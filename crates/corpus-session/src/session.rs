//! The corpus/meta session store.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use corpus_cast::cast_frame;
use corpus_model::{DataType, DatasetSide, Header};

use crate::collection::HeaderCollection;
use crate::error::{HeaderRole, MaterializeError, MergeError, SessionError};
use crate::merge::merge_frames;

/// Whether both sides currently designate a link header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkStatus {
    Unresolved,
    Resolved,
}

/// Coarse session lifecycle phase.
///
/// Loading metadata enters `LinkUnresolved` immediately; the session flips
/// between `LinkUnresolved` and `LinkResolved` the instant a link
/// designation is set or cleared. There is no terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    NoCorpus,
    CorpusLoaded,
    LinkUnresolved,
    LinkResolved,
}

/// Remembered pre-pin state of the current text header, so clearing the pin
/// can restore what the user had chosen before.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TextPin {
    name: String,
    prior_include: bool,
    prior_datatype: DataType,
}

/// Single authority over header selection state for one loading session.
///
/// The store exclusively owns every [`Header`]; callers address headers by
/// `(DatasetSide, name)` and observe them through the accessor methods.
/// Every mutation re-establishes the role invariants before returning:
///
/// - a link header is always included and cannot be excluded while linked
/// - the text header (corpus only) is always included with datatype pinned
///   to STRING
///
/// The store is plain owned state, mutated through `&mut self`: callers are
/// expected to serialize access, and there is no change notification. After
/// a mutating call, re-query whatever was cached.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    corpus: Option<HeaderCollection>,
    meta: Option<HeaderCollection>,
    text: Option<TextPin>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // === Loading and reset ===

    /// Installs a freshly inferred corpus header collection, discarding any
    /// previous corpus selection state (text pin and corpus link included).
    pub fn load_corpus(&mut self, headers: Vec<Header>) {
        info!(columns = headers.len(), "corpus collection loaded");
        self.corpus = Some(HeaderCollection::new(headers));
        self.text = None;
    }

    /// Installs a freshly inferred metadata header collection, discarding
    /// any previous metadata selection state (meta link included).
    pub fn load_meta(&mut self, headers: Vec<Header>) {
        info!(columns = headers.len(), "metadata collection loaded");
        self.meta = Some(HeaderCollection::new(headers));
    }

    /// Removes one side's collection and its selection state. The other
    /// side is untouched.
    pub fn reset(&mut self, side: DatasetSide) {
        match side {
            DatasetSide::Corpus => {
                self.corpus = None;
                self.text = None;
            }
            DatasetSide::Meta => {
                self.meta = None;
            }
        }
    }

    // === Role transitions ===

    /// Sets or clears the corpus text header.
    ///
    /// The full set of field changes, in order: the previously pinned header
    /// (if any) gets its remembered include/datatype back, except that a
    /// header still acting as link header keeps `include = true`; the newly
    /// pinned header has its current include/datatype remembered, then is
    /// forced to `include = true` with datatype STRING.
    pub fn set_text_header(&mut self, name: Option<&str>) -> Result<(), SessionError> {
        let corpus = self.corpus.as_mut().ok_or(SessionError::NoCorpus)?;

        if let Some(name) = name {
            if !corpus.contains(name) {
                return Err(SessionError::HeaderNotFound {
                    side: DatasetSide::Corpus,
                    name: name.to_string(),
                });
            }
            if self.text.as_ref().is_some_and(|pin| pin.name == name) {
                return Ok(());
            }
        }

        if let Some(pin) = self.text.take() {
            if let Some(prev) = corpus.get_mut(&pin.name) {
                prev.datatype = pin.prior_datatype;
                prev.include = pin.prior_include;
            }
            // A link header stays included no matter what was remembered.
            if corpus.is_link(&pin.name)
                && let Some(prev) = corpus.get_mut(&pin.name)
            {
                prev.include = true;
            }
        }

        if let Some(name) = name {
            let header = corpus
                .get_mut(name)
                .expect("presence checked above");
            self.text = Some(TextPin {
                name: name.to_string(),
                prior_include: header.include,
                prior_datatype: header.datatype,
            });
            header.include = true;
            header.datatype = DataType::String;
            debug!(column = %name, "text header pinned");
        }

        Ok(())
    }

    /// Sets or clears one side's link header.
    ///
    /// Designating a link header forces `include = true` on it. Clearing or
    /// moving the link does not revert the previously linked header's
    /// include flag: once a column was pulled in by linking, it stays
    /// visible until the user excludes it.
    pub fn set_link_header(
        &mut self,
        side: DatasetSide,
        name: Option<&str>,
    ) -> Result<(), SessionError> {
        let collection = self.collection_mut(side)?;

        match name {
            Some(name) => {
                let Some(header) = collection.get_mut(name) else {
                    return Err(SessionError::HeaderNotFound {
                        side,
                        name: name.to_string(),
                    });
                };
                header.include = true;
                collection.set_link(Some(name.to_string()));
                debug!(side = %side, column = %name, "link header set");
            }
            None => {
                collection.set_link(None);
                debug!(side = %side, "link header cleared");
            }
        }

        Ok(())
    }

    /// Applies include and/or datatype changes to one header, atomically.
    ///
    /// Headers currently acting as text or link header are locked: any
    /// requested change is rejected with `LockedField` and the state is left
    /// untouched. Passing `None` for both changes is a no-op.
    pub fn update_header(
        &mut self,
        side: DatasetSide,
        name: &str,
        new_include: Option<bool>,
        new_datatype: Option<DataType>,
    ) -> Result<(), SessionError> {
        if new_include.is_none() && new_datatype.is_none() {
            return Ok(());
        }

        let is_text = side == DatasetSide::Corpus
            && self.text.as_ref().is_some_and(|pin| pin.name == name);

        let collection = self.collection_mut(side)?;
        if !collection.contains(name) {
            return Err(SessionError::HeaderNotFound {
                side,
                name: name.to_string(),
            });
        }

        if is_text {
            return Err(SessionError::LockedField {
                name: name.to_string(),
                role: HeaderRole::Text,
            });
        }
        if collection.is_link(name) {
            return Err(SessionError::LockedField {
                name: name.to_string(),
                role: HeaderRole::Link,
            });
        }

        let header = collection.get_mut(name).expect("presence checked above");
        if let Some(include) = new_include {
            header.include = include;
        }
        if let Some(datatype) = new_datatype {
            header.datatype = datatype;
        }
        Ok(())
    }

    // === Queries ===

    pub fn is_corpus_added(&self) -> bool {
        self.corpus.is_some()
    }

    pub fn is_meta_added(&self) -> bool {
        self.meta.is_some()
    }

    /// Headers of one side in source order; empty when that side is not
    /// loaded.
    pub fn headers(&self, side: DatasetSide) -> &[Header] {
        self.collection(side).map_or(&[], HeaderCollection::headers)
    }

    /// Looks up one header by name.
    pub fn header(&self, side: DatasetSide, name: &str) -> Option<&Header> {
        self.collection(side).and_then(|c| c.get(name))
    }

    /// The pinned corpus text header, if any.
    pub fn text_header(&self) -> Option<&Header> {
        let pin = self.text.as_ref()?;
        self.corpus.as_ref()?.get(&pin.name)
    }

    /// One side's designated link header, if any.
    pub fn link_header(&self, side: DatasetSide) -> Option<&Header> {
        let collection = self.collection(side)?;
        collection.link_name().and_then(|name| collection.get(name))
    }

    /// `Resolved` iff both sides currently designate a link header.
    pub fn link_status(&self) -> LinkStatus {
        let corpus_linked = self
            .corpus
            .as_ref()
            .is_some_and(|c| c.link_name().is_some());
        let meta_linked = self.meta.as_ref().is_some_and(|c| c.link_name().is_some());
        if corpus_linked && meta_linked {
            LinkStatus::Resolved
        } else {
            LinkStatus::Unresolved
        }
    }

    /// Current lifecycle phase, derived from loaded collections and link
    /// status.
    pub fn phase(&self) -> SessionPhase {
        if self.corpus.is_none() {
            return SessionPhase::NoCorpus;
        }
        if self.meta.is_none() {
            return SessionPhase::CorpusLoaded;
        }
        match self.link_status() {
            LinkStatus::Resolved => SessionPhase::LinkResolved,
            LinkStatus::Unresolved => SessionPhase::LinkUnresolved,
        }
    }

    /// Canonical names of every datatype an adapter may offer.
    pub fn datatype_names(&self) -> Vec<&'static str> {
        DataType::names()
    }

    // === Materialization ===

    /// Casts the corpus frame, and when metadata is loaded, casts the
    /// metadata frame and left-joins it onto the corpus via the resolved
    /// link headers.
    ///
    /// With metadata loaded, the link must be resolved before calling;
    /// otherwise this fails with [`MergeError::LinkUnresolved`]. With no
    /// metadata loaded the `meta_frame` argument is ignored and the cast
    /// corpus frame is returned as-is.
    pub fn materialize(
        &self,
        corpus_frame: &DataFrame,
        meta_frame: Option<&DataFrame>,
    ) -> Result<DataFrame, MaterializeError> {
        let corpus = self.corpus.as_ref().ok_or(SessionError::NoCorpus)?;
        let corpus_df = cast_frame(corpus_frame, corpus.headers())?;

        let Some(meta) = self.meta.as_ref() else {
            return Ok(corpus_df);
        };
        let meta_frame = meta_frame.ok_or(SessionError::NoMeta)?;

        if self.link_status() != LinkStatus::Resolved {
            return Err(MergeError::LinkUnresolved.into());
        }
        let corpus_link = corpus.link_name().expect("resolved link");
        let meta_link = meta.link_name().expect("resolved link");

        let meta_df = cast_frame(meta_frame, meta.headers())?;
        let merged = merge_frames(&corpus_df, corpus_link, &meta_df, meta_link)?;
        info!(
            rows = merged.height(),
            columns = merged.width(),
            "materialized linked corpus"
        );
        Ok(merged)
    }

    fn collection(&self, side: DatasetSide) -> Option<&HeaderCollection> {
        match side {
            DatasetSide::Corpus => self.corpus.as_ref(),
            DatasetSide::Meta => self.meta.as_ref(),
        }
    }

    fn collection_mut(&mut self, side: DatasetSide) -> Result<&mut HeaderCollection, SessionError> {
        match side {
            DatasetSide::Corpus => self.corpus.as_mut().ok_or(SessionError::NoCorpus),
            DatasetSide::Meta => self.meta.as_mut().ok_or(SessionError::NoMeta),
        }
    }
}
