//! Tracking and teardown of GPU-resident resources.
//!
//! Every resource the backend creates for the scene is registered as a
//! [`ResourceHandle`]. Teardown releases each handle once, keeps going past
//! failures and hands back a [`DisposalReport`] listing them.

use std::fmt;

use smallvec::SmallVec;

use crate::error::DisposalError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Geometry,
    Material,
    ParticleBuffer,
    Shader,
    /// The drawing context itself; always released last.
    Context,
}

/// Backend-assigned identifier, unique per backend instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ResourceId(pub u32);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceHandle {
    pub id: ResourceId,
    pub kind: ResourceKind,
    pub label: String,
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} '{}' (#{})", self.kind, self.label, self.id.0)
    }
}

#[derive(Clone, Debug, Default)]
pub struct ResourceLedger {
    handles: Vec<ResourceHandle>,
}

impl ResourceLedger {
    pub fn track(&mut self, handles: impl IntoIterator<Item = ResourceHandle>) {
        self.handles.extend(handles);
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn count(&self, kind: ResourceKind) -> usize {
        self.handles.iter().filter(|h| h.kind == kind).count()
    }

    /// Release every tracked handle through `release`, leaving the ledger
    /// empty. A second call finds nothing to release.
    pub fn release_all(
        &mut self,
        mut release: impl FnMut(&ResourceHandle) -> Result<(), DisposalError>,
    ) -> DisposalReport {
        let mut handles = std::mem::take(&mut self.handles);
        handles.sort_by_key(|h| h.kind == ResourceKind::Context);
        let mut report = DisposalReport::default();
        for handle in &handles {
            report.attempted += 1;
            if let Err(e) = release(handle) {
                report.failures.push(e);
            }
        }
        report
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisposalReport {
    pub attempted: usize,
    pub failures: SmallVec<[DisposalError; 4]>,
}

impl DisposalReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn released(&self) -> usize {
        self.attempted - self.failures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(id: u32, kind: ResourceKind) -> ResourceHandle {
        ResourceHandle {
            id: ResourceId(id),
            kind,
            label: format!("r{id}"),
        }
    }

    #[test]
    fn failures_are_collected_and_context_goes_last() {
        let mut ledger = ResourceLedger::default();
        ledger.track([
            handle(0, ResourceKind::Context),
            handle(1, ResourceKind::Geometry),
            handle(2, ResourceKind::Shader),
        ]);
        let mut order = Vec::new();
        let report = ledger.release_all(|h| {
            order.push(h.kind);
            if h.id.0 == 1 {
                Err(DisposalError::Backend {
                    label: h.label.clone(),
                    reason: "busy".into(),
                })
            } else {
                Ok(())
            }
        });
        assert_eq!(report.attempted, 3);
        assert_eq!(report.released(), 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(order.last(), Some(&ResourceKind::Context));
        assert!(ledger.is_empty());
    }
}
