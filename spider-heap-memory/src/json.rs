//! Building heap graphs from JSON.

use crate::heap::Heap;
use crate::value::HeapValue;
use serde_json::Value;

impl Heap {
    /// Copy a JSON document into the heap and return its root.
    ///
    /// Objects become plain objects (keys in document order), arrays
    /// become arrays, scalars become leaves. Every JSON object or array
    /// produces a distinct heap object, so the result is always a tree.
    pub fn from_json(&self, json: &Value) -> HeapValue {
        match json {
            Value::Null => HeapValue::Null,
            Value::Bool(b) => HeapValue::Bool(*b),
            Value::Number(n) => HeapValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => HeapValue::Str(s.clone()),
            Value::Array(items) => {
                let items = items.iter().map(|v| self.from_json(v)).collect();
                self.array(items)
            }
            Value::Object(map) => {
                let props = map
                    .iter()
                    .map(|(key, v)| (key.clone(), self.from_json(v)))
                    .collect();
                self.object_with(props)
            }
        }
    }
}
