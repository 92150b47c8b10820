// Core Layer: Semiring Registry
//
// Named semirings keyed by (name, element type). Built-ins are registered the
// first time the registry is touched; callers may add their own. Lookups only
// take a read lock and hand back a clone, so selecting a semiring has no side
// effects.

use crate::core::error::{GraphBlasError, Result};
use crate::core::semiring::Semiring;
use crate::types::{GraphBLASType, NumericType, TypeCode};
use std::any::Any;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

type Entry = Arc<dyn Any + Send + Sync>;

lazy_static::lazy_static! {
    /// Global registry of named semirings
    static ref SEMIRINGS: RwLock<HashMap<(String, TypeCode), Entry>> =
        RwLock::new(builtin_semirings());
}

fn insert<T: GraphBLASType>(map: &mut HashMap<(String, TypeCode), Entry>, s: Semiring<T>) {
    map.insert((s.name().to_string(), T::TYPE_CODE), Arc::new(s));
}

fn insert_numeric<T: NumericType>(map: &mut HashMap<(String, TypeCode), Entry>) {
    insert(map, Semiring::<T>::plus_times());
    insert(map, Semiring::<T>::min_plus());
    insert(map, Semiring::<T>::max_plus());
    insert(map, Semiring::<T>::max_times());
    insert(map, Semiring::<T>::plus_min());
}

fn builtin_semirings() -> HashMap<(String, TypeCode), Entry> {
    let mut map = HashMap::new();
    insert_numeric::<i8>(&mut map);
    insert_numeric::<i16>(&mut map);
    insert_numeric::<i32>(&mut map);
    insert_numeric::<i64>(&mut map);
    insert_numeric::<u8>(&mut map);
    insert_numeric::<u16>(&mut map);
    insert_numeric::<u32>(&mut map);
    insert_numeric::<u64>(&mut map);
    insert_numeric::<f32>(&mut map);
    insert_numeric::<f64>(&mut map);
    insert(&mut map, Semiring::lor_land());
    insert(&mut map, Semiring::land_lor());
    map
}

/// Look up a semiring by name for element type `T`
///
/// Fails with `DomainMismatch` if the name is registered only for other
/// element types, and with `UnknownSemiring` if it is not registered at all.
pub fn semiring<T: GraphBLASType>(name: &str) -> Result<Semiring<T>> {
    let map = SEMIRINGS
        .read()
        .map_err(|e| GraphBlasError::Panic(e.to_string()))?;

    if let Some(entry) = map.get(&(name.to_string(), T::TYPE_CODE)) {
        return entry
            .downcast_ref::<Semiring<T>>()
            .cloned()
            .ok_or(GraphBlasError::DomainMismatch);
    }

    if map.keys().any(|(n, _)| n == name) {
        log::debug!(
            "Semiring {} is not defined over {}",
            name,
            T::TYPE_CODE.name()
        );
        Err(GraphBlasError::DomainMismatch)
    } else {
        Err(GraphBlasError::UnknownSemiring(name.to_string()))
    }
}

/// Register a user-defined semiring under its own name
///
/// Fails with `InvalidValue` if that name is already taken for `T`.
pub fn register<T: GraphBLASType>(semiring: Semiring<T>) -> Result<()> {
    let mut map = SEMIRINGS
        .write()
        .map_err(|e| GraphBlasError::Panic(e.to_string()))?;
    let key = (semiring.name().to_string(), T::TYPE_CODE);
    if map.contains_key(&key) {
        return Err(GraphBlasError::InvalidValue);
    }
    log::debug!("Registering semiring {} over {}", key.0, key.1.name());
    map.insert(key, Arc::new(semiring));
    Ok(())
}

/// Names of every registered semiring, sorted and deduplicated
pub fn names() -> Vec<String> {
    match SEMIRINGS.read() {
        Ok(map) => map
            .keys()
            .map(|(n, _)| n.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect(),
        Err(_) => Vec::new(),
    }
}
