use super::{DtoRef, TypeDescriptor};
use std::any::TypeId;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Default number of descriptors kept before eviction starts.
pub const DEFAULT_DESCRIPTOR_CAPACITY: usize = 200;

/// Bounded, thread-safe cache of [`TypeDescriptor`]s keyed by DTO type.
///
/// Eviction is first-in first-out: once full, the entry inserted earliest is
/// dropped, even if it was read a moment ago. Reads never reorder entries.
#[derive(Debug)]
pub struct DescriptorCache {
    inner: RwLock<Entries>,
    capacity: usize,
}

#[derive(Debug, Default)]
struct Entries {
    by_type: HashMap<TypeId, Arc<TypeDescriptor>>,
    insertion_order: VecDeque<TypeId>,
}

impl DescriptorCache {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Entries::default()),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cached descriptor for `target`, describing and inserting it on a miss.
    pub fn get_or_describe(&self, target: DtoRef) -> Arc<TypeDescriptor> {
        {
            let entries = self.inner.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(descriptor) = entries.by_type.get(&target.type_id()) {
                return Arc::clone(descriptor);
            }
        }

        let descriptor = Arc::new(target.describe());
        let mut entries = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        // Another thread may have described the type while we waited
        if let Some(existing) = entries.by_type.get(&target.type_id()) {
            return Arc::clone(existing);
        }

        while entries.by_type.len() >= self.capacity {
            let Some(oldest) = entries.insertion_order.pop_front() else {
                break;
            };
            if let Some(evicted) = entries.by_type.remove(&oldest) {
                debug!(
                    evicted = evicted.name(),
                    capacity = self.capacity,
                    "Descriptor cache full, evicted oldest entry"
                );
            }
        }

        entries
            .by_type
            .insert(target.type_id(), Arc::clone(&descriptor));
        entries.insertion_order.push_back(target.type_id());
        debug!(
            dto = target.name(),
            properties = descriptor.properties().len(),
            cache_size = entries.by_type.len(),
            "Descriptor built and cached"
        );
        descriptor
    }

    pub fn contains(&self, target: DtoRef) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .by_type
            .contains_key(&target.type_id())
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .by_type
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cached type names, oldest first.
    pub fn cached_names(&self) -> Vec<&'static str> {
        let entries = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .insertion_order
            .iter()
            .filter_map(|id| entries.by_type.get(id).map(|d| d.name()))
            .collect()
    }

    pub fn clear(&self) {
        let mut entries = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        entries.by_type.clear();
        entries.insertion_order.clear();
    }
}

impl Default for DescriptorCache {
    fn default() -> Self {
        Self::new(DEFAULT_DESCRIPTOR_CAPACITY)
    }
}
