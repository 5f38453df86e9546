//! # Host Heap
//!
//! In-process [`NativeInterop`] runtime. Payloads live in a refcounted slot
//! table; every handle is a distinct id pointing at a slot, so a copy shares
//! the payload but is released on its own, and a handle is never reissued.
//!
//! ## Rules
//!
//! 1. **One lock** - the slot table sits behind a `parking_lot::Mutex`
//! 2. **Release outside the lock** - handles nested in a freed payload are
//!    destroyed after the lock is dropped, so nested releases never re-enter it
//! 3. **Stale releases are loud** - logged, and an error under `strict_handles`
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use meridian_variant::{HostHeap, Variant, VariantType};
//!
//! let heap = Arc::new(HostHeap::new());
//! let rt = heap.runtime();
//! let greeting = String::from("hello").to_variant(&rt).unwrap();
//! let copy = greeting.clone();
//! drop((greeting, copy));
//! assert_eq!(heap.stats().live, 0);
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::RuntimeConfig;
use crate::error::{InteropError, InteropResult};
use crate::interop::{NativeInterop, PackedData, RawHandle, RawVariant, Runtime};
use crate::kind::VariantKind;
use crate::slots::SlotPool;

/// Handle traffic counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeapStats {
    /// Payloads created.
    pub allocations: u64,
    /// Handles issued by copying an existing one.
    pub copies: u64,
    /// Handles released.
    pub releases: u64,
    /// Handles currently live.
    pub live: usize,
}

enum Payload {
    Text { kind: VariantKind, text: String },
    Array(Vec<RawVariant>),
    Dictionary(Vec<(RawVariant, RawVariant)>),
    Packed(PackedData),
    Object { class: String },
    Bound { kind: VariantKind, object: RawHandle, name: String },
}

impl Payload {
    fn kind(&self) -> VariantKind {
        match self {
            Self::Text { kind, .. } | Self::Bound { kind, .. } => *kind,
            Self::Array(_) => VariantKind::Array,
            Self::Dictionary(_) => VariantKind::Dictionary,
            Self::Packed(data) => data.kind(),
            Self::Object { .. } => VariantKind::Object,
        }
    }

    /// References this payload holds, to be released with it.
    fn into_nested(self) -> Vec<RawVariant> {
        match self {
            Self::Array(items) => items,
            Self::Dictionary(entries) => entries.into_iter().flat_map(|(k, v)| [k, v]).collect(),
            Self::Bound { object, .. } => vec![RawVariant::owned(VariantKind::Object, object)],
            Self::Text { .. } | Self::Packed(_) | Self::Object { .. } => Vec::new(),
        }
    }
}

struct Slot {
    refs: usize,
    payload: Payload,
}

/// Result of a state operation plus the values it let go of. The values are
/// discarded once the lock is dropped.
type Settled<T> = (InteropResult<T>, Vec<RawVariant>);

fn wrong_kind(handle: RawHandle, expected: &'static str, found: &Payload) -> InteropError {
    InteropError::WrongKind { handle, expected, found: found.kind() }
}

struct HeapState {
    slots: SlotPool<Slot>,
    handles: HashMap<RawHandle, usize>,
    interned: HashMap<String, usize>,
    next_id: u64,
    stats: HeapStats,
}

impl HeapState {
    fn new() -> Self {
        Self {
            slots: SlotPool::new(),
            handles: HashMap::new(),
            interned: HashMap::new(),
            next_id: 0,
            stats: HeapStats::default(),
        }
    }

    fn check_room(&self, limit: Option<usize>, needed: usize) -> InteropResult<()> {
        match limit {
            Some(limit) if self.handles.len() + needed > limit => Err(InteropError::HandleLimit { limit }),
            _ => Ok(()),
        }
    }

    fn issue(&mut self, index: usize) -> RawHandle {
        self.next_id += 1;
        let handle = RawHandle::from_id(self.next_id);
        self.handles.insert(handle, index);
        self.stats.live = self.handles.len();
        handle
    }

    fn store(&mut self, payload: Payload) -> (usize, RawHandle) {
        let index = self.slots.allocate(Slot { refs: 1, payload });
        self.stats.allocations += 1;
        (index, self.issue(index))
    }

    fn slot_of(&self, handle: RawHandle) -> InteropResult<usize> {
        self.handles.get(&handle).copied().ok_or(InteropError::StaleHandle { handle })
    }

    fn payload(&self, handle: RawHandle) -> InteropResult<&Payload> {
        let index = self.slot_of(handle)?;
        self.slots
            .get(index)
            .map(|slot| &slot.payload)
            .ok_or(InteropError::StaleHandle { handle })
    }

    fn payload_mut(&mut self, handle: RawHandle) -> InteropResult<&mut Payload> {
        let index = self.slot_of(handle)?;
        self.slots
            .get_mut(index)
            .map(|slot| &mut slot.payload)
            .ok_or(InteropError::StaleHandle { handle })
    }

    fn array(&self, handle: RawHandle) -> InteropResult<&Vec<RawVariant>> {
        match self.payload(handle)? {
            Payload::Array(items) => Ok(items),
            other => Err(wrong_kind(handle, "Array", other)),
        }
    }

    fn array_mut(&mut self, handle: RawHandle) -> InteropResult<&mut Vec<RawVariant>> {
        match self.payload_mut(handle)? {
            Payload::Array(items) => Ok(items),
            other => Err(wrong_kind(handle, "Array", other)),
        }
    }

    fn dictionary(&self, handle: RawHandle) -> InteropResult<&Vec<(RawVariant, RawVariant)>> {
        match self.payload(handle)? {
            Payload::Dictionary(entries) => Ok(entries),
            other => Err(wrong_kind(handle, "Dictionary", other)),
        }
    }

    fn dictionary_mut(&mut self, handle: RawHandle) -> InteropResult<&mut Vec<(RawVariant, RawVariant)>> {
        match self.payload_mut(handle)? {
            Payload::Dictionary(entries) => Ok(entries),
            other => Err(wrong_kind(handle, "Dictionary", other)),
        }
    }

    fn acquire(&mut self, handle: RawHandle, limit: Option<usize>) -> InteropResult<RawHandle> {
        let index = self.slot_of(handle)?;
        self.check_room(limit, 1)?;
        let slot = self.slots.get_mut(index).ok_or(InteropError::StaleHandle { handle })?;
        slot.refs += 1;
        self.stats.copies += 1;
        Ok(self.issue(index))
    }

    /// Turns a borrowed view into a value the caller owns.
    fn share(&mut self, view: RawVariant, limit: Option<usize>) -> InteropResult<RawVariant> {
        match view.handle() {
            Some(handle) if !handle.is_null() => Ok(RawVariant::owned(view.kind(), self.acquire(handle, limit)?)),
            _ => Ok(view),
        }
    }

    fn release(&mut self, handle: RawHandle) -> InteropResult<Vec<RawVariant>> {
        let index = self.handles.remove(&handle).ok_or(InteropError::StaleHandle { handle })?;
        self.stats.releases += 1;
        self.stats.live = self.handles.len();

        let Some(slot) = self.slots.get_mut(index) else {
            return Ok(Vec::new());
        };
        slot.refs -= 1;
        if slot.refs > 0 {
            return Ok(Vec::new());
        }
        let Some(Slot { payload, .. }) = self.slots.free(index) else {
            return Ok(Vec::new());
        };
        if let Payload::Text { kind: VariantKind::StringName, text } = &payload {
            if self.interned.get(text) == Some(&index) {
                self.interned.remove(text);
            }
        }
        Ok(payload.into_nested())
    }

    fn text_of(&self, handle: RawHandle, kind: VariantKind) -> Option<&str> {
        if handle.is_null() {
            return matches!(kind, VariantKind::StringName | VariantKind::NodePath).then_some("");
        }
        match self.payload(handle).ok()? {
            Payload::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Dictionary key equality: values for trivial kinds, text for the text
    /// kinds, payload identity for everything else.
    fn keys_match(&self, a: &RawVariant, b: &RawVariant) -> bool {
        if a.kind() != b.kind() {
            return false;
        }
        match (a.as_inline(), b.as_inline(), a.handle(), b.handle()) {
            (Some(x), Some(y), _, _) => x == y,
            (None, None, Some(ha), Some(hb)) => {
                if ha == hb {
                    return true;
                }
                if let (Some(x), Some(y)) = (self.text_of(ha, a.kind()), self.text_of(hb, b.kind())) {
                    return x == y;
                }
                matches!((self.slot_of(ha), self.slot_of(hb)), (Ok(x), Ok(y)) if x == y)
            }
            _ => false,
        }
    }

    fn array_get(&mut self, array: RawHandle, index: usize, limit: Option<usize>) -> InteropResult<RawVariant> {
        let items = self.array(array)?;
        let view = items
            .get(index)
            .map(RawVariant::view)
            .ok_or(InteropError::IndexOutOfRange { index, len: items.len() })?;
        self.share(view, limit)
    }

    fn array_set(&mut self, array: RawHandle, index: usize, value: RawVariant) -> Settled<()> {
        let items = match self.array_mut(array) {
            Ok(items) => items,
            Err(err) => return (Err(err), vec![value]),
        };
        let len = items.len();
        match items.get_mut(index) {
            Some(slot) => {
                let old = std::mem::replace(slot, value);
                (Ok(()), vec![old])
            }
            None => (Err(InteropError::IndexOutOfRange { index, len }), vec![value]),
        }
    }

    fn array_push(&mut self, array: RawHandle, value: RawVariant) -> Settled<()> {
        match self.array_mut(array) {
            Ok(items) => {
                items.push(value);
                (Ok(()), Vec::new())
            }
            Err(err) => (Err(err), vec![value]),
        }
    }

    fn dictionary_find(&self, dictionary: RawHandle, key: &RawVariant) -> InteropResult<Option<usize>> {
        let entries = self.dictionary(dictionary)?;
        Ok(entries.iter().position(|(k, _)| self.keys_match(k, key)))
    }

    fn dictionary_get(
        &mut self,
        dictionary: RawHandle,
        key: &RawVariant,
        limit: Option<usize>,
    ) -> InteropResult<Option<RawVariant>> {
        let Some(position) = self.dictionary_find(dictionary, key)? else {
            return Ok(None);
        };
        let view = self.dictionary(dictionary)?[position].1.view();
        self.share(view, limit).map(Some)
    }

    fn dictionary_insert(&mut self, dictionary: RawHandle, key: RawVariant, value: RawVariant) -> Settled<()> {
        let position = match self.dictionary_find(dictionary, &key) {
            Ok(position) => position,
            Err(err) => return (Err(err), vec![key, value]),
        };
        let entries = match self.dictionary_mut(dictionary) {
            Ok(entries) => entries,
            Err(err) => return (Err(err), vec![key, value]),
        };
        match position {
            Some(i) => {
                let old = std::mem::replace(&mut entries[i].1, value);
                (Ok(()), vec![key, old])
            }
            None => {
                entries.push((key, value));
                (Ok(()), Vec::new())
            }
        }
    }

    fn dictionary_remove(&mut self, dictionary: RawHandle, key: &RawVariant) -> Settled<bool> {
        let position = match self.dictionary_find(dictionary, key) {
            Ok(Some(position)) => position,
            Ok(None) => return (Ok(false), Vec::new()),
            Err(err) => return (Err(err), Vec::new()),
        };
        match self.dictionary_mut(dictionary) {
            Ok(entries) => {
                let (k, v) = entries.remove(position);
                (Ok(true), vec![k, v])
            }
            Err(err) => (Err(err), Vec::new()),
        }
    }

    fn dictionary_keys(&mut self, dictionary: RawHandle, limit: Option<usize>) -> Settled<Vec<RawVariant>> {
        let views: Vec<RawVariant> = match self.dictionary(dictionary) {
            Ok(entries) => entries.iter().map(|(k, _)| k.view()).collect(),
            Err(err) => return (Err(err), Vec::new()),
        };
        let mut keys = Vec::with_capacity(views.len());
        for view in views {
            match self.share(view, limit) {
                Ok(key) => keys.push(key),
                Err(err) => return (Err(err), keys),
            }
        }
        (Ok(keys), Vec::new())
    }

    fn bind(&mut self, kind: VariantKind, object: RawHandle, name: &str, limit: Option<usize>) -> InteropResult<RawHandle> {
        match self.payload(object)? {
            Payload::Object { .. } => {}
            other => return Err(wrong_kind(object, "Object", other)),
        }
        self.check_room(limit, 2)?;
        let held = self.acquire(object, None)?;
        let (_, handle) = self.store(Payload::Bound { kind, object: held, name: name.to_owned() });
        Ok(handle)
    }
}

/// In-process runtime with allocation counters, string-name interning and
/// leak reporting.
pub struct HostHeap {
    config: RuntimeConfig,
    state: Mutex<HeapState>,
}

impl Default for HostHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl HostHeap {
    /// Creates a heap with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    /// Creates a heap with explicit settings.
    #[must_use]
    pub fn with_config(config: RuntimeConfig) -> Self {
        Self { config, state: Mutex::new(HeapState::new()) }
    }

    /// This heap as a shareable [`Runtime`].
    #[must_use]
    pub fn runtime(self: &Arc<Self>) -> Runtime {
        Arc::<Self>::clone(self)
    }

    /// Active settings.
    #[must_use]
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Snapshot of the traffic counters.
    #[must_use]
    pub fn stats(&self) -> HeapStats {
        self.state.lock().stats
    }

    /// Payloads currently stored. Copies share one payload.
    #[must_use]
    pub fn live_payloads(&self) -> usize {
        self.state.lock().slots.allocated_count()
    }

    /// Live handles and the kinds they refer to, oldest first.
    #[must_use]
    pub fn leaks(&self) -> Vec<(RawHandle, VariantKind)> {
        let state = self.state.lock();
        let mut leaks: Vec<(RawHandle, VariantKind)> = state
            .handles
            .keys()
            .filter_map(|&handle| state.payload(handle).ok().map(|p| (handle, p.kind())))
            .collect();
        leaks.sort_unstable_by_key(|(handle, _)| *handle);
        leaks
    }

    fn limit(&self) -> Option<usize> {
        self.config.max_live_handles
    }

    fn allocate(&self, payload: Payload) -> InteropResult<RawHandle> {
        let kind = payload.kind();
        let mut state = self.state.lock();
        state.check_room(self.limit(), 1)?;
        let (_, handle) = state.store(payload);
        drop(state);
        tracing::trace!(handle = %handle, kind = %kind, "allocated");
        Ok(handle)
    }

    /// Releases whatever `raw` owns.
    fn discard(&self, raw: RawVariant) {
        if let Some(handle) = raw.handle().filter(|h| !h.is_null()) {
            if let Err(err) = self.destroy(handle) {
                tracing::warn!(handle = %handle, error = %err, "nested release failed");
            }
        }
    }

    fn settle<T>(&self, (result, released): Settled<T>) -> InteropResult<T> {
        for raw in released {
            self.discard(raw);
        }
        result
    }
}

impl NativeInterop for HostHeap {
    fn string_new(&self, text: &str) -> InteropResult<RawHandle> {
        self.allocate(Payload::Text { kind: VariantKind::String, text: text.to_owned() })
    }

    fn string_name_new(&self, name: &str) -> InteropResult<RawHandle> {
        let intern = self.config.intern_string_names;
        let mut state = self.state.lock();
        state.check_room(self.limit(), 1)?;
        if intern {
            if let Some(&index) = state.interned.get(name) {
                if let Some(slot) = state.slots.get_mut(index) {
                    slot.refs += 1;
                    let handle = state.issue(index);
                    tracing::trace!(handle = %handle, name, "interned name reused");
                    return Ok(handle);
                }
            }
        }
        let (index, handle) =
            state.store(Payload::Text { kind: VariantKind::StringName, text: name.to_owned() });
        if intern {
            state.interned.insert(name.to_owned(), index);
        }
        Ok(handle)
    }

    fn node_path_new(&self, path: &str) -> InteropResult<RawHandle> {
        self.allocate(Payload::Text { kind: VariantKind::NodePath, text: path.to_owned() })
    }

    fn string_read(&self, handle: RawHandle) -> InteropResult<String> {
        match self.state.lock().payload(handle)? {
            Payload::Text { text, .. } => Ok(text.clone()),
            other => Err(wrong_kind(handle, "String", other)),
        }
    }

    fn array_new(&self) -> InteropResult<RawHandle> {
        self.allocate(Payload::Array(Vec::new()))
    }

    fn array_len(&self, array: RawHandle) -> InteropResult<usize> {
        Ok(self.state.lock().array(array)?.len())
    }

    fn array_get(&self, array: RawHandle, index: usize) -> InteropResult<RawVariant> {
        self.state.lock().array_get(array, index, self.limit())
    }

    fn array_set(&self, array: RawHandle, index: usize, value: RawVariant) -> InteropResult<()> {
        let settled = self.state.lock().array_set(array, index, value);
        self.settle(settled)
    }

    fn array_push(&self, array: RawHandle, value: RawVariant) -> InteropResult<()> {
        let settled = self.state.lock().array_push(array, value);
        self.settle(settled)
    }

    fn dictionary_new(&self) -> InteropResult<RawHandle> {
        self.allocate(Payload::Dictionary(Vec::new()))
    }

    fn dictionary_len(&self, dictionary: RawHandle) -> InteropResult<usize> {
        Ok(self.state.lock().dictionary(dictionary)?.len())
    }

    fn dictionary_get(&self, dictionary: RawHandle, key: &RawVariant) -> InteropResult<Option<RawVariant>> {
        self.state.lock().dictionary_get(dictionary, key, self.limit())
    }

    fn dictionary_insert(&self, dictionary: RawHandle, key: RawVariant, value: RawVariant) -> InteropResult<()> {
        let settled = self.state.lock().dictionary_insert(dictionary, key, value);
        self.settle(settled)
    }

    fn dictionary_remove(&self, dictionary: RawHandle, key: &RawVariant) -> InteropResult<bool> {
        let settled = self.state.lock().dictionary_remove(dictionary, key);
        self.settle(settled)
    }

    fn dictionary_keys(&self, dictionary: RawHandle) -> InteropResult<Vec<RawVariant>> {
        let settled = self.state.lock().dictionary_keys(dictionary, self.limit());
        self.settle(settled)
    }

    fn packed_array_new(&self, data: PackedData) -> InteropResult<RawHandle> {
        self.allocate(Payload::Packed(data))
    }

    fn packed_array_read(&self, handle: RawHandle) -> InteropResult<PackedData> {
        match self.state.lock().payload(handle)? {
            Payload::Packed(data) => Ok(data.clone()),
            other => Err(wrong_kind(handle, "packed array", other)),
        }
    }

    fn object_new(&self, class_name: &str) -> InteropResult<RawHandle> {
        self.allocate(Payload::Object { class: class_name.to_owned() })
    }

    fn object_class(&self, object: RawHandle) -> InteropResult<String> {
        match self.state.lock().payload(object)? {
            Payload::Object { class } => Ok(class.clone()),
            other => Err(wrong_kind(object, "Object", other)),
        }
    }

    fn callable_new(&self, target: RawHandle, method: &str) -> InteropResult<RawHandle> {
        self.state.lock().bind(VariantKind::Callable, target, method, self.limit())
    }

    fn signal_new(&self, owner: RawHandle, name: &str) -> InteropResult<RawHandle> {
        self.state.lock().bind(VariantKind::Signal, owner, name, self.limit())
    }

    fn bound_read(&self, handle: RawHandle) -> InteropResult<(RawHandle, String)> {
        let mut state = self.state.lock();
        let (object, name) = match state.payload(handle)? {
            Payload::Bound { object, name, .. } => (*object, name.clone()),
            other => return Err(wrong_kind(handle, "Callable or Signal", other)),
        };
        let object = state.acquire(object, self.limit())?;
        Ok((object, name))
    }

    fn new_copy(&self, handle: RawHandle) -> InteropResult<RawHandle> {
        let copy = self.state.lock().acquire(handle, self.limit())?;
        tracing::trace!(handle = %handle, copy = %copy, "copied");
        Ok(copy)
    }

    fn destroy(&self, handle: RawHandle) -> InteropResult<()> {
        let released = self.state.lock().release(handle);
        match released {
            Ok(nested) => {
                tracing::trace!(handle = %handle, "released");
                for raw in nested {
                    self.discard(raw);
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(handle = %handle, "release of stale handle");
                if self.config.strict_handles {
                    Err(err)
                } else {
                    Ok(())
                }
            }
        }
    }

    fn same_payload(&self, a: RawHandle, b: RawHandle) -> InteropResult<bool> {
        let state = self.state.lock();
        Ok(state.slot_of(a)? == state.slot_of(b)?)
    }
}

impl Drop for HostHeap {
    fn drop(&mut self) {
        if !self.config.report_leaks_on_drop {
            return;
        }
        let leaks = self.leaks();
        if leaks.is_empty() {
            return;
        }
        tracing::warn!(live = leaks.len(), "host heap dropped with live handles");
        for (handle, kind) in leaks {
            tracing::warn!(handle = %handle, kind = %kind, "leaked");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heap() -> Arc<HostHeap> {
        Arc::new(HostHeap::new())
    }

    #[test]
    fn test_copy_shares_payload() {
        let heap = heap();
        let a = heap.string_new("shared").unwrap();
        let b = heap.new_copy(a).unwrap();
        assert_ne!(a, b);
        assert_eq!(heap.live_payloads(), 1);
        assert_eq!(heap.string_read(b).unwrap(), "shared");

        heap.destroy(a).unwrap();
        assert_eq!(heap.string_read(b).unwrap(), "shared");
        heap.destroy(b).unwrap();
        assert_eq!(heap.live_payloads(), 0);
        assert_eq!(
            heap.stats(),
            HeapStats { allocations: 1, copies: 1, releases: 2, live: 0 }
        );
    }

    #[test]
    fn test_stale_release() {
        let heap = heap();
        let a = heap.object_new("Node").unwrap();
        heap.destroy(a).unwrap();
        assert_eq!(heap.destroy(a), Err(InteropError::StaleHandle { handle: a }));
        assert_eq!(heap.destroy(RawHandle::NULL), Err(InteropError::StaleHandle { handle: RawHandle::NULL }));
        assert_eq!(heap.stats().releases, 1);

        let lenient = HostHeap::with_config(RuntimeConfig { strict_handles: false, ..RuntimeConfig::default() });
        let b = lenient.object_new("Node").unwrap();
        lenient.destroy(b).unwrap();
        assert_eq!(lenient.destroy(b), Ok(()));
    }

    #[test]
    fn test_string_names_are_interned() {
        let heap = heap();
        let a = heap.string_name_new("jump").unwrap();
        let b = heap.string_name_new("jump").unwrap();
        assert_ne!(a, b);
        assert_eq!(heap.live_payloads(), 1);
        assert_eq!(heap.stats().allocations, 1);

        heap.destroy(a).unwrap();
        heap.destroy(b).unwrap();
        assert_eq!(heap.live_payloads(), 0);

        let c = heap.string_name_new("jump").unwrap();
        assert_eq!(heap.stats().allocations, 2);
        heap.destroy(c).unwrap();

        let plain = HostHeap::with_config(RuntimeConfig { intern_string_names: false, ..RuntimeConfig::default() });
        let x = plain.string_name_new("jump").unwrap();
        let y = plain.string_name_new("jump").unwrap();
        assert_eq!(plain.live_payloads(), 2);
        plain.destroy(x).unwrap();
        plain.destroy(y).unwrap();
    }

    #[test]
    fn test_handle_limit() {
        let heap = HostHeap::with_config(RuntimeConfig { max_live_handles: Some(2), ..RuntimeConfig::default() });
        let a = heap.string_new("a").unwrap();
        let b = heap.new_copy(a).unwrap();
        assert_eq!(heap.string_new("c"), Err(InteropError::HandleLimit { limit: 2 }));
        assert_eq!(heap.new_copy(a), Err(InteropError::HandleLimit { limit: 2 }));
        heap.destroy(a).unwrap();
        heap.destroy(b).unwrap();
        assert!(heap.string_new("c").is_ok());
    }

    #[test]
    fn test_nested_payloads_release_with_container() {
        let heap = heap();
        let array = heap.array_new().unwrap();
        let text = heap.string_new("inner").unwrap();
        heap.array_push(array, RawVariant::owned(VariantKind::String, text)).unwrap();
        assert_eq!(heap.live_payloads(), 2);

        heap.destroy(array).unwrap();
        assert_eq!(heap.live_payloads(), 0);
        assert_eq!(heap.stats().live, 0);
        assert!(heap.leaks().is_empty());
    }

    #[test]
    fn test_wrong_kind() {
        let heap = heap();
        let text = heap.string_new("not an array").unwrap();
        assert!(matches!(
            heap.array_len(text),
            Err(InteropError::WrongKind { found: VariantKind::String, .. })
        ));
        assert!(matches!(heap.callable_new(text, "run"), Err(InteropError::WrongKind { .. })));
        heap.destroy(text).unwrap();
    }

    #[test]
    fn test_same_payload_follows_copies() {
        let heap = heap();
        let a = heap.array_new().unwrap();
        let b = heap.new_copy(a).unwrap();
        let c = heap.array_new().unwrap();
        assert_eq!(heap.same_payload(a, b), Ok(true));
        assert_eq!(heap.same_payload(a, c), Ok(false));
        heap.destroy(c).unwrap();
        assert_eq!(heap.same_payload(a, c), Err(InteropError::StaleHandle { handle: c }));
        heap.destroy(a).unwrap();
        heap.destroy(b).unwrap();
    }

    #[test]
    fn test_leak_report() {
        let heap = heap();
        let a = heap.dictionary_new().unwrap();
        let b = heap.packed_array_new(PackedData::Byte(vec![1, 2])).unwrap();
        assert_eq!(
            heap.leaks(),
            vec![(a, VariantKind::Dictionary), (b, VariantKind::PackedByteArray)]
        );
        heap.destroy(a).unwrap();
        heap.destroy(b).unwrap();
    }
}
