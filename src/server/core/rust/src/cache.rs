/* src/server/core/rust/src/cache.rs */

//! Compiled unit cache: locale -> page name -> slot.
//!
//! Nothing is evicted. Callers only insert pairs whose locale the page
//! declared at registration, so size is bounded by the declared
//! `#locales x #pages`. Removal happens in [`UnitCache::purge`] when a page
//! is registered again, and for slots a failed build left empty.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use folio_catalog::Locale;

/// Holds at most one value. The mutex is held across construction so
/// concurrent first access builds once while the other callers wait.
type Slot<U> = Mutex<Option<Arc<U>>>;

type Partitions<U> = HashMap<Locale, HashMap<String, Arc<Slot<U>>>>;

pub(crate) struct UnitCache<U> {
  partitions: RwLock<Partitions<U>>,
}

impl<U> Default for UnitCache<U> {
  fn default() -> Self {
    Self { partitions: RwLock::new(HashMap::new()) }
  }
}

impl<U> UnitCache<U> {
  /// Ensure an (empty) partition exists for every locale.
  pub(crate) fn seed(&self, locales: &[Locale]) {
    let mut partitions = self.partitions.write().unwrap_or_else(PoisonError::into_inner);
    for locale in locales {
      partitions.entry(locale.clone()).or_default();
    }
  }

  /// Drop every slot for `page` across all locales. Returns how many held a
  /// compiled value.
  pub(crate) fn purge(&self, page: &str) -> usize {
    let removed: Vec<Arc<Slot<U>>> = {
      let mut partitions = self.partitions.write().unwrap_or_else(PoisonError::into_inner);
      partitions.values_mut().filter_map(|pages| pages.remove(page)).collect()
    };
    // Slot locks may be held by an in-flight build; wait outside the map lock
    removed
      .iter()
      .filter(|slot| slot.lock().unwrap_or_else(PoisonError::into_inner).is_some())
      .count()
  }

  pub(crate) fn get(&self, locale: &Locale, page: &str) -> Option<Arc<U>> {
    let slot = self.existing_slot(locale, page)?;
    let guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
    guard.clone()
  }

  /// Return the cached value for (locale, page), building it with `build` on
  /// a miss. A failed build stores nothing, so a later call retries.
  pub(crate) fn get_or_try_insert_with<E>(
    &self,
    locale: &Locale,
    page: &str,
    build: impl FnOnce() -> Result<U, E>,
  ) -> Result<Arc<U>, E> {
    let slot = match self.existing_slot(locale, page) {
      Some(slot) => slot,
      None => self.create_slot(locale, page),
    };

    let mut guard = slot.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(unit) = guard.as_ref() {
      return Ok(Arc::clone(unit));
    }
    match build() {
      Ok(unit) => {
        let unit = Arc::new(unit);
        *guard = Some(Arc::clone(&unit));
        Ok(unit)
      }
      Err(e) => {
        drop(guard);
        self.discard_empty(locale, page, &slot);
        Err(e)
      }
    }
  }

  /// Number of compiled values held.
  pub(crate) fn len(&self) -> usize {
    let slots: Vec<Arc<Slot<U>>> = {
      let partitions = self.partitions.read().unwrap_or_else(PoisonError::into_inner);
      partitions.values().flat_map(HashMap::values).map(Arc::clone).collect()
    };
    slots.iter().filter(|slot| slot.lock().unwrap_or_else(PoisonError::into_inner).is_some()).count()
  }

  pub(crate) fn locales(&self) -> Vec<Locale> {
    let partitions = self.partitions.read().unwrap_or_else(PoisonError::into_inner);
    let mut locales: Vec<Locale> = partitions.keys().cloned().collect();
    locales.sort();
    locales
  }

  fn existing_slot(&self, locale: &Locale, page: &str) -> Option<Arc<Slot<U>>> {
    let partitions = self.partitions.read().unwrap_or_else(PoisonError::into_inner);
    partitions.get(locale)?.get(page).map(Arc::clone)
  }

  /// Remove `slot` from the map if it is still the registered one and holds
  /// nothing. A slot another caller is building in stays put.
  fn discard_empty(&self, locale: &Locale, page: &str, slot: &Arc<Slot<U>>) {
    let mut partitions = self.partitions.write().unwrap_or_else(PoisonError::into_inner);
    let Some(pages) = partitions.get_mut(locale) else {
      return;
    };
    let registered = pages.get(page).is_some_and(|current| Arc::ptr_eq(current, slot));
    let empty = slot.try_lock().is_ok_and(|guard| guard.is_none());
    if registered && empty {
      pages.remove(page);
    }
  }

  #[cfg(test)]
  pub(crate) fn slot_count(&self) -> usize {
    let partitions = self.partitions.read().unwrap_or_else(PoisonError::into_inner);
    partitions.values().map(HashMap::len).sum()
  }

  fn create_slot(&self, locale: &Locale, page: &str) -> Arc<Slot<U>> {
    let mut partitions = self.partitions.write().unwrap_or_else(PoisonError::into_inner);
    let pages = partitions.entry(locale.clone()).or_default();
    // Another caller may have created it between our read and write lock
    Arc::clone(pages.entry(page.to_string()).or_insert_with(|| Arc::new(Mutex::new(None))))
  }
}
