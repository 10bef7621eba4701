//! The Model protocol — what a traversable value looks like.

use crate::{error::ReadError, id::ContainerId};
use async_trait::async_trait;
use std::sync::Arc;

/// Protocol ① — Property model
///
/// Exposes a host's dynamic values to the spider: which values are
/// containers, what identifies them, which own properties they have and
/// in what order, and how to read one.
///
/// Implementations:
/// - `spider_heap_memory::Heap`: arena-backed objects with data and getter
///   properties (testing, embedding)
/// - An interpreter's object heap, exposing its own objects directly
///
/// `container_id` and `own_property_names` are total: they must never fail
/// or block, so traversal decisions are always safe to make. Only
/// `read_property` may do arbitrary work and fail.
#[async_trait]
pub trait PropertyModel: Send + Sync {
    /// The host's value type.
    type Value: Send + Sync;

    /// Identity of `value` if it is a container, `None` for leaves.
    fn container_id(&self, value: &Self::Value) -> Option<ContainerId>;

    /// Whether `value` is worth traversing. Objects of every class,
    /// callable ones included, are containers.
    fn is_container(&self, value: &Self::Value) -> bool {
        self.container_id(value).is_some()
    }

    /// Own property names of `container` in the model's stable order:
    /// array-index names ascending numerically, then the remaining names in
    /// insertion order. Leaves have none.
    fn own_property_names(&self, container: &Self::Value) -> Vec<String>;

    /// Read a named property. May run host code (a getter), and may fail
    /// with [`ReadError::Preempted`] if that code ran past the scheduler's
    /// slice, or with any other error.
    async fn read_property(
        &self,
        container: &Self::Value,
        name: &str,
    ) -> Result<Self::Value, ReadError>;
}

/// Blanket implementation: a shared model is a model.
#[async_trait]
impl<M: PropertyModel + ?Sized> PropertyModel for Arc<M> {
    type Value = M::Value;

    fn container_id(&self, value: &Self::Value) -> Option<ContainerId> {
        (**self).container_id(value)
    }

    fn is_container(&self, value: &Self::Value) -> bool {
        (**self).is_container(value)
    }

    fn own_property_names(&self, container: &Self::Value) -> Vec<String> {
        (**self).own_property_names(container)
    }

    async fn read_property(
        &self,
        container: &Self::Value,
        name: &str,
    ) -> Result<Self::Value, ReadError> {
        (**self).read_property(container, name).await
    }
}
