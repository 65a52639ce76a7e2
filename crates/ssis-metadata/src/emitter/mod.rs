//! Transport boundary for change proposals
//!
//! Entities never talk to the catalog directly. They hand each proposal to
//! an `Emitter`, which owns delivery, acknowledgement and failure handling.

mod json_lines;

pub use json_lines::{read_proposals, ConsoleEmitter, FileEmitter, JsonLinesEmitter};

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use crate::mcp::MetadataChangeProposal;

/// Per-proposal completion callback: `(error, message id)`
pub type EmitCallback<'a> = dyn Fn(Option<&EmitError>, &str) + 'a;

/// Trait for delivering change proposals to a catalog
///
/// Implementations accept one proposal at a time and invoke the optional
/// callback once for it. Retries, if any, are the implementation's concern.
pub trait Emitter: Send + Sync {
    /// Deliver a single proposal
    fn emit(
        &self,
        proposal: MetadataChangeProposal,
        callback: Option<&EmitCallback<'_>>,
    ) -> Result<(), EmitError>;

    /// Push out anything buffered
    fn flush(&self) -> Result<(), EmitError> {
        Ok(())
    }
}

impl<E: Emitter + ?Sized> Emitter for Arc<E> {
    fn emit(
        &self,
        proposal: MetadataChangeProposal,
        callback: Option<&EmitCallback<'_>>,
    ) -> Result<(), EmitError> {
        (**self).emit(proposal, callback)
    }

    fn flush(&self) -> Result<(), EmitError> {
        (**self).flush()
    }
}

impl<E: Emitter + ?Sized> Emitter for Box<E> {
    fn emit(
        &self,
        proposal: MetadataChangeProposal,
        callback: Option<&EmitCallback<'_>>,
    ) -> Result<(), EmitError> {
        (**self).emit(proposal, callback)
    }

    fn flush(&self) -> Result<(), EmitError> {
        (**self).flush()
    }
}

/// Errors reported by an emitter
#[derive(Debug, Error)]
pub enum EmitError {
    /// The emitter no longer accepts proposals
    #[error("Emitter closed")]
    Closed,

    /// The receiving side refused the proposal
    #[error("Proposal for '{urn}' rejected: {reason}")]
    Rejected { urn: String, reason: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EmitError {
    pub fn rejected(urn: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            urn: urn.into(),
            reason: reason.into(),
        }
    }
}

/// Fresh id for one delivered proposal
pub fn new_message_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Report an outcome to the callback, if one was given, and pass it on
pub fn complete(
    outcome: Result<(), EmitError>,
    message_id: &str,
    callback: Option<&EmitCallback<'_>>,
) -> Result<(), EmitError> {
    if let Some(callback) = callback {
        callback(outcome.as_ref().err(), message_id);
    }
    outcome
}

/// An emitter that discards all proposals
///
/// Useful for dry runs or when only the callback matters.
pub struct NullEmitter;

impl Emitter for NullEmitter {
    fn emit(
        &self,
        _proposal: MetadataChangeProposal,
        callback: Option<&EmitCallback<'_>>,
    ) -> Result<(), EmitError> {
        complete(Ok(()), &new_message_id(), callback)
    }
}

/// A vector-based emitter that collects proposals in memory
///
/// Useful for testing to verify what an entity produced, and for embedding
/// callers that forward proposals themselves.
pub struct VecEmitter {
    state: Mutex<VecState>,
}

#[derive(Default)]
struct VecState {
    proposals: Vec<MetadataChangeProposal>,
    closed: bool,
}

impl VecEmitter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(VecState::default()),
        }
    }

    /// Get all collected proposals
    pub fn proposals(&self) -> Vec<MetadataChangeProposal> {
        self.state.lock().proposals.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().proposals.is_empty()
    }

    /// Clear all collected proposals
    pub fn clear(&self) {
        self.state.lock().proposals.clear();
    }

    /// Stop accepting proposals; later emits fail with `EmitError::Closed`
    pub fn close(&self) {
        self.state.lock().closed = true;
    }
}

impl Default for VecEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter for VecEmitter {
    fn emit(
        &self,
        proposal: MetadataChangeProposal,
        callback: Option<&EmitCallback<'_>>,
    ) -> Result<(), EmitError> {
        let outcome = {
            let mut state = self.state.lock();
            if state.closed {
                Err(EmitError::Closed)
            } else {
                state.proposals.push(proposal);
                Ok(())
            }
        };
        complete(outcome, &new_message_id(), callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aspects::Status;
    use ssis_urn::DatasetUrn;
    use std::cell::RefCell;

    fn proposal() -> MetadataChangeProposal {
        MetadataChangeProposal::dataset_present(&DatasetUrn::from("ds:a"))
    }

    #[test]
    fn test_vec_emitter() {
        let emitter = VecEmitter::new();
        emitter.emit(proposal(), None).unwrap();

        let proposals = emitter.proposals();
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].entity_urn, "ds:a");
        assert_eq!(
            proposals[0].aspect,
            crate::aspects::Aspect::Status(Status { removed: false })
        );

        emitter.clear();
        assert!(emitter.is_empty());
    }

    #[test]
    fn test_callback_receives_message_id() {
        let emitter = VecEmitter::new();
        let seen = RefCell::new(Vec::new());
        let callback = |err: Option<&EmitError>, id: &str| {
            seen.borrow_mut().push((err.is_some(), id.to_string()));
        };

        emitter.emit(proposal(), Some(&callback)).unwrap();
        emitter.emit(proposal(), Some(&callback)).unwrap();

        let seen = seen.into_inner();
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|(failed, id)| !failed && !id.is_empty()));
        assert_ne!(seen[0].1, seen[1].1);
    }

    #[test]
    fn test_closed_emitter_reports_through_callback() {
        let emitter = VecEmitter::new();
        emitter.close();

        let failures = RefCell::new(0);
        let callback = |err: Option<&EmitError>, _id: &str| {
            if matches!(err, Some(EmitError::Closed)) {
                *failures.borrow_mut() += 1;
            }
        };

        let result = emitter.emit(proposal(), Some(&callback));
        assert!(matches!(result, Err(EmitError::Closed)));
        assert_eq!(failures.into_inner(), 1);
        assert!(emitter.is_empty());
    }

    #[test]
    fn test_close_races_with_emitters() {
        let emitter = Arc::new(VecEmitter::new());
        let accepted = Arc::new(std::sync::atomic::AtomicUsize::new(0));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let emitter = Arc::clone(&emitter);
                let accepted = Arc::clone(&accepted);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        if emitter.emit(proposal(), None).is_ok() {
                            accepted.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                        }
                    }
                })
            })
            .collect();
        emitter.close();
        for handle in handles {
            handle.join().unwrap();
        }

        // Every accepted proposal is stored, and nothing lands after close
        let stored = emitter.len();
        assert_eq!(stored, accepted.load(std::sync::atomic::Ordering::SeqCst));
        assert!(emitter.emit(proposal(), None).is_err());
        assert_eq!(emitter.len(), stored);
    }

    #[test]
    fn test_null_emitter() {
        let emitter = NullEmitter;
        // Should not fail
        emitter.emit(proposal(), None).unwrap();
        emitter.flush().unwrap();
    }

    #[test]
    fn test_shared_emitter() {
        let emitter = Arc::new(VecEmitter::new());
        let boxed: Box<dyn Emitter> = Box::new(Arc::clone(&emitter));
        boxed.emit(proposal(), None).unwrap();
        assert_eq!(emitter.len(), 1);
    }
}
