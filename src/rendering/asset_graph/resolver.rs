use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Caches whatever `G` generates per reference string. Values are cloned out of the cache, so `T`
/// should be cheap to clone (e.g. contain [`std::sync::Arc`]s).
pub struct Resolver<G: ResourceGenerator<T>, T: Clone> {
    ref_cache: DashMap<String, T>,
    generator: G,
}

pub trait ResourceGenerator<T> {
    fn generate(&self, name: &str) -> T;
}

impl<G: ResourceGenerator<T>, T: Clone> Resolver<G, T> {
    pub fn new(generator: G) -> Self {
        Self {
            ref_cache: DashMap::with_capacity(16),
            generator,
        }
    }

    /// Returns the cached value for `name`, generating it on the first request. The flag tells
    /// whether this call generated it.
    pub fn resolve(&self, name: &str) -> (T, bool) {
        // Easy path: The cache contains the value
        if let Some(cached) = self.ref_cache.get(name) {
            return (cached.value().clone(), false);
        }

        // We don't hold any lock on the cache while waiting for the generator. When we have been
        // raced, the faster value wins and ours is dropped, so there's only ever one value per name.
        let generated = self.generator.generate(name);
        match self.ref_cache.entry(name.to_string()) {
            Entry::Occupied(entry) => (entry.get().clone(), false),
            Entry::Vacant(entry) => (entry.insert(generated).value().clone(), true),
        }
    }

    pub fn len(&self) -> usize {
        self.ref_cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ref_cache.is_empty()
    }
}
