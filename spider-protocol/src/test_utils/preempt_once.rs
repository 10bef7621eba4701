//! PreemptOnce — a model wrapper that preempts the first read of every property.

use crate::error::{Preempted, ReadError};
use crate::id::ContainerId;
use crate::model::PropertyModel;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Wraps a model so the first read of each `(container, name)` pair fails
/// with [`Preempted`] and every later read goes through. Simulates a
/// scheduler whose slice runs out exactly once per property.
pub struct PreemptOnce<M> {
    inner: M,
    attempted: Mutex<HashSet<(ContainerId, String)>>,
    preemptions: AtomicU64,
}

impl<M> PreemptOnce<M> {
    /// Wrap `inner`.
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            attempted: Mutex::new(HashSet::new()),
            preemptions: AtomicU64::new(0),
        }
    }

    /// How many reads were preempted so far.
    pub fn preemptions(&self) -> u64 {
        self.preemptions.load(Ordering::SeqCst)
    }

    /// The wrapped model.
    pub fn inner(&self) -> &M {
        &self.inner
    }
}

#[async_trait]
impl<M: PropertyModel> PropertyModel for PreemptOnce<M> {
    type Value = M::Value;

    fn container_id(&self, value: &Self::Value) -> Option<ContainerId> {
        self.inner.container_id(value)
    }

    fn own_property_names(&self, container: &Self::Value) -> Vec<String> {
        self.inner.own_property_names(container)
    }

    async fn read_property(
        &self,
        container: &Self::Value,
        name: &str,
    ) -> Result<Self::Value, ReadError> {
        if let Some(id) = self.inner.container_id(container) {
            let first = self
                .attempted
                .lock()
                .unwrap()
                .insert((id, name.to_owned()));
            if first {
                self.preemptions.fetch_add(1, Ordering::SeqCst);
                return Err(Preempted.into());
            }
        }
        self.inner.read_property(container, name).await
    }
}
