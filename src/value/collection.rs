use super::{Map, Value};

/// Collection view over an ordered list or a keyed map.
///
/// Produced by the `collection` converter. Keyed collections keep their keys
/// through `filter`, and `map` preserves the shape it was called on.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    items: Items,
}

#[derive(Debug, Clone, PartialEq)]
enum Items {
    List(Vec<Value>),
    Keyed(Map),
}

impl Collection {
    pub fn from_list(items: Vec<Value>) -> Self {
        Self {
            items: Items::List(items),
        }
    }

    pub fn from_map(items: Map) -> Self {
        Self {
            items: Items::Keyed(items),
        }
    }

    pub fn is_keyed(&self) -> bool {
        matches!(self.items, Items::Keyed(_))
    }

    pub fn len(&self) -> usize {
        match &self.items {
            Items::List(items) => items.len(),
            Items::Keyed(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values in order, regardless of shape.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        match &self.items {
            Items::List(items) => Box::new(items.iter()),
            Items::Keyed(items) => Box::new(items.values()),
        }
    }

    /// Keys for a keyed collection, stringified positions for a list.
    pub fn keys(&self) -> Vec<String> {
        match &self.items {
            Items::List(items) => (0..items.len()).map(|i| i.to_string()).collect(),
            Items::Keyed(items) => items.keys().cloned().collect(),
        }
    }

    /// Lookup by key; lists accept their numeric position.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match &self.items {
            Items::List(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            Items::Keyed(items) => items.get(key),
        }
    }

    pub fn first(&self) -> Option<&Value> {
        self.iter().next()
    }

    pub fn last(&self) -> Option<&Value> {
        match &self.items {
            Items::List(items) => items.last(),
            Items::Keyed(items) => items.last().map(|(_, v)| v),
        }
    }

    pub fn contains(&self, needle: &Value) -> bool {
        self.iter().any(|v| v == needle)
    }

    pub fn filter(&self, mut keep: impl FnMut(&Value) -> bool) -> Collection {
        match &self.items {
            Items::List(items) => {
                Collection::from_list(items.iter().filter(|v| keep(v)).cloned().collect())
            }
            Items::Keyed(items) => Collection::from_map(
                items
                    .iter()
                    .filter(|(_, v)| keep(v))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            ),
        }
    }

    pub fn map(&self, mut f: impl FnMut(&Value) -> Value) -> Collection {
        match &self.items {
            Items::List(items) => Collection::from_list(items.iter().map(&mut f).collect()),
            Items::Keyed(items) => {
                Collection::from_map(items.iter().map(|(k, v)| (k.clone(), f(v))).collect())
            }
        }
    }

    /// Values of `key` from every map-shaped item.
    pub fn pluck(&self, key: &str) -> Collection {
        Collection::from_list(
            self.iter()
                .filter_map(|item| match item {
                    Value::Map(map) => map.get(key).cloned(),
                    Value::Fluent(fluent) => fluent.get(key).cloned(),
                    Value::Dto(dto) => dto.get(key).cloned(),
                    _ => None,
                })
                .collect(),
        )
    }

    /// Back to a plain container value.
    pub fn to_value(&self) -> Value {
        match &self.items {
            Items::List(items) => Value::List(items.clone()),
            Items::Keyed(items) => Value::Map(items.clone()),
        }
    }

    pub fn into_value(self) -> Value {
        match self.items {
            Items::List(items) => Value::List(items),
            Items::Keyed(items) => Value::Map(items),
        }
    }
}
