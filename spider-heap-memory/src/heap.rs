//! The object arena and its PropertyModel implementation.

use crate::keys;
use crate::value::{HeapValue, ObjectId};
use async_trait::async_trait;
use spider_protocol::{ContainerId, PropertyModel, ReadError};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

/// Computed-property body. Runs with no heap lock held, so it may read
/// (or write) the heap it belongs to.
pub type Getter = Arc<dyn Fn(&Heap) -> Result<HeapValue, ReadError> + Send + Sync>;

/// Heap mutation errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HeapError {
    /// The target value is not an object.
    #[error("not an object: {0:?}")]
    NotAnObject(HeapValue),

    /// The object id does not belong to this heap.
    #[error("unknown object: {0}")]
    UnknownObject(ObjectId),
}

/// What kind of object this is. All kinds are containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// A plain object.
    Plain,
    /// An array; index keys plus `length`.
    Array,
    /// A callable object.
    Function,
}

#[derive(Clone)]
enum Slot {
    Data(HeapValue),
    Getter(Getter),
}

struct Object {
    kind: ObjectKind,
    // Insertion order; enumeration order is derived in `own_keys`.
    props: Vec<(String, Slot)>,
}

impl Object {
    fn new(kind: ObjectKind) -> Self {
        Self {
            kind,
            props: Vec::new(),
        }
    }

    fn slot(&self, key: &str) -> Option<&Slot> {
        self.props.iter().find(|(k, _)| k == key).map(|(_, s)| s)
    }

    fn put(&mut self, key: &str, slot: Slot) {
        match self.props.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = slot,
            None => self.props.push((key.to_owned(), slot)),
        }
    }
}

/// In-memory object heap backed by a `Vec` arena behind a `RwLock`.
///
/// Objects are never freed; an [`ObjectId`] is its arena index. Suitable
/// for tests and for embedding small graphs. Share it as `Arc<Heap>`.
pub struct Heap {
    objects: RwLock<Vec<Object>>,
}

impl Heap {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(Vec::new()),
        }
    }

    /// Number of objects allocated so far.
    pub fn len(&self) -> usize {
        self.objects.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing has been allocated.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn alloc(&self, kind: ObjectKind) -> ObjectId {
        let mut objects = self.objects.write().unwrap_or_else(PoisonError::into_inner);
        objects.push(Object::new(kind));
        ObjectId(objects.len() as u64 - 1)
    }

    /// Allocate an empty plain object.
    pub fn object(&self) -> HeapValue {
        HeapValue::Object(self.alloc(ObjectKind::Plain))
    }

    /// Allocate an array holding `items`, with a `length` property.
    pub fn array(&self, items: Vec<HeapValue>) -> HeapValue {
        let id = self.alloc(ObjectKind::Array);
        let mut objects = self.objects.write().unwrap_or_else(PoisonError::into_inner);
        let obj = &mut objects[id.0 as usize];
        let len = items.len();
        for (i, item) in items.into_iter().enumerate() {
            obj.put(&i.to_string(), Slot::Data(item));
        }
        obj.put("length", Slot::Data(HeapValue::Number(len as f64)));
        HeapValue::Object(id)
    }

    /// Allocate a plain object holding `props` in the given order.
    pub(crate) fn object_with(&self, props: Vec<(String, HeapValue)>) -> HeapValue {
        let id = self.alloc(ObjectKind::Plain);
        let mut objects = self.objects.write().unwrap_or_else(PoisonError::into_inner);
        let obj = &mut objects[id.0 as usize];
        for (key, value) in props {
            obj.put(&key, Slot::Data(value));
        }
        HeapValue::Object(id)
    }

    /// Allocate a callable object with `length`, `name` and a fresh
    /// `prototype` object whose `constructor` points back at it.
    pub fn function(&self, name: &str, arity: u32) -> HeapValue {
        let func = self.alloc(ObjectKind::Function);
        let proto = self.alloc(ObjectKind::Plain);
        let mut objects = self.objects.write().unwrap_or_else(PoisonError::into_inner);
        let f = &mut objects[func.0 as usize];
        f.put("length", Slot::Data(HeapValue::Number(f64::from(arity))));
        f.put("name", Slot::Data(HeapValue::from(name)));
        f.put("prototype", Slot::Data(HeapValue::Object(proto)));
        objects[proto.0 as usize].put("constructor", Slot::Data(HeapValue::Object(func)));
        HeapValue::Object(func)
    }

    /// Kind of the object `value` refers to.
    pub fn kind(&self, value: &HeapValue) -> Result<ObjectKind, HeapError> {
        let id = Self::target(value)?;
        let objects = self.objects.read().unwrap_or_else(PoisonError::into_inner);
        objects
            .get(id.0 as usize)
            .map(|o| o.kind)
            .ok_or(HeapError::UnknownObject(id))
    }

    /// Create or overwrite a data property. Overwriting keeps the key's
    /// enumeration position.
    pub fn set(
        &self,
        target: &HeapValue,
        key: &str,
        value: impl Into<HeapValue>,
    ) -> Result<(), HeapError> {
        self.put(target, key, Slot::Data(value.into()))
    }

    /// Create or overwrite a getter property.
    pub fn define_getter<F>(&self, target: &HeapValue, key: &str, getter: F) -> Result<(), HeapError>
    where
        F: Fn(&Heap) -> Result<HeapValue, ReadError> + Send + Sync + 'static,
    {
        self.put(target, key, Slot::Getter(Arc::new(getter)))
    }

    /// Remove an own property. Returns whether it existed.
    pub fn delete(&self, target: &HeapValue, key: &str) -> Result<bool, HeapError> {
        let id = Self::target(target)?;
        let mut objects = self.objects.write().unwrap_or_else(PoisonError::into_inner);
        let obj = objects
            .get_mut(id.0 as usize)
            .ok_or(HeapError::UnknownObject(id))?;
        let before = obj.props.len();
        obj.props.retain(|(k, _)| k != key);
        Ok(obj.props.len() != before)
    }

    /// Own property names in enumeration order: array indices ascending,
    /// then insertion order. Empty for leaves and unknown ids.
    pub fn own_keys(&self, target: &HeapValue) -> Vec<String> {
        let Some(id) = target.as_object() else {
            return Vec::new();
        };
        let objects = self.objects.read().unwrap_or_else(PoisonError::into_inner);
        match objects.get(id.0 as usize) {
            Some(obj) => keys::ordered(obj.props.iter().map(|(k, _)| k.as_str())),
            None => Vec::new(),
        }
    }

    /// Read a property, running its getter if it has one. Absent
    /// properties read as [`HeapValue::Undefined`].
    pub fn get(&self, target: &HeapValue, key: &str) -> Result<HeapValue, ReadError> {
        let id = Self::target(target).map_err(ReadError::failed)?;
        let slot = {
            let objects = self.objects.read().unwrap_or_else(PoisonError::into_inner);
            let obj = objects
                .get(id.0 as usize)
                .ok_or_else(|| ReadError::failed(HeapError::UnknownObject(id)))?;
            obj.slot(key).cloned()
        };
        match slot {
            Some(Slot::Data(v)) => Ok(v),
            Some(Slot::Getter(g)) => g(self),
            None => Ok(HeapValue::Undefined),
        }
    }

    fn put(&self, target: &HeapValue, key: &str, slot: Slot) -> Result<(), HeapError> {
        let id = Self::target(target)?;
        let mut objects = self.objects.write().unwrap_or_else(PoisonError::into_inner);
        objects
            .get_mut(id.0 as usize)
            .ok_or(HeapError::UnknownObject(id))?
            .put(key, slot);
        Ok(())
    }

    fn target(value: &HeapValue) -> Result<ObjectId, HeapError> {
        value
            .as_object()
            .ok_or_else(|| HeapError::NotAnObject(value.clone()))
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PropertyModel for Heap {
    type Value = HeapValue;

    fn container_id(&self, value: &HeapValue) -> Option<ContainerId> {
        value.as_object().map(ContainerId::from)
    }

    fn own_property_names(&self, container: &HeapValue) -> Vec<String> {
        self.own_keys(container)
    }

    async fn read_property(&self, container: &HeapValue, name: &str) -> Result<HeapValue, ReadError> {
        self.get(container, name)
    }
}
