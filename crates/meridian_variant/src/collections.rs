//! # Runtime Collections
//!
//! Arrays, dictionaries and packed arrays live in the runtime. The wrappers
//! here hold a handle; clones share the same storage, so a push through one
//! is visible through every other.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::convert::VariantType;
use crate::error::{InteropResult, VariantResult};
use crate::interop::{NativeHandle, PackedData, RawHandle, Runtime};
use crate::kind::VariantKind;
use crate::variant::Variant;

/// Untyped array of variants.
#[derive(Clone, Debug, PartialEq)]
pub struct VariantArray {
    handle: NativeHandle,
}

impl VariantArray {
    /// Creates an empty array.
    ///
    /// # Errors
    ///
    /// Whatever the runtime reports from `array_new`.
    pub fn new(rt: &Runtime) -> InteropResult<Self> {
        let raw = rt.array_new()?;
        Ok(Self::from_handle(NativeHandle::from_owned(Arc::clone(rt), raw)))
    }

    pub(crate) fn from_handle(handle: NativeHandle) -> Self {
        Self { handle }
    }

    fn rt(&self) -> &Runtime {
        self.handle.runtime()
    }

    /// Number of elements.
    ///
    /// # Errors
    ///
    /// [`InteropError::StaleHandle`](crate::InteropError::StaleHandle) if the
    /// runtime lost the array.
    pub fn len(&self) -> InteropResult<usize> {
        self.rt().array_len(self.handle.raw())
    }

    /// Returns `true` when the array has no elements.
    ///
    /// # Errors
    ///
    /// See [`VariantArray::len`].
    pub fn is_empty(&self) -> InteropResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Appends a value. The array takes ownership.
    ///
    /// # Errors
    ///
    /// Whatever the runtime reports from `array_push`.
    pub fn push(&self, value: Variant) -> InteropResult<()> {
        self.rt().array_push(self.handle.raw(), value.into_raw())
    }

    /// Returns a copy of the element at `index`.
    ///
    /// # Errors
    ///
    /// [`InteropError::IndexOutOfRange`](crate::InteropError::IndexOutOfRange)
    /// past the end.
    pub fn get(&self, index: usize) -> InteropResult<Variant> {
        let raw = self.rt().array_get(self.handle.raw(), index)?;
        Ok(Variant::from_raw(raw, self.rt()))
    }

    /// Replaces the element at `index`.
    ///
    /// # Errors
    ///
    /// [`InteropError::IndexOutOfRange`](crate::InteropError::IndexOutOfRange)
    /// past the end.
    pub fn set(&self, index: usize, value: Variant) -> InteropResult<()> {
        self.rt().array_set(self.handle.raw(), index, value.into_raw())
    }

    /// Copies of every element, front to back.
    pub fn iter(&self) -> impl Iterator<Item = InteropResult<Variant>> + '_ {
        let (len, failed) = match self.len() {
            Ok(len) => (len, None),
            Err(err) => (0, Some(Err(err))),
        };
        failed.into_iter().chain((0..len).map(move |i| self.get(i)))
    }

    /// Copies the array reference through the runtime.
    ///
    /// # Errors
    ///
    /// Whatever the runtime reports from `new_copy`.
    pub fn try_clone(&self) -> InteropResult<Self> {
        self.handle.try_clone().map(Self::from_handle)
    }

    /// Owning handle.
    #[must_use]
    pub fn handle(&self) -> &NativeHandle {
        &self.handle
    }

    pub(crate) fn raw(&self) -> RawHandle {
        self.handle.raw()
    }

    pub(crate) fn into_raw(self) -> RawHandle {
        self.handle.into_raw()
    }
}

/// Untyped dictionary of variants, in insertion order.
#[derive(Clone, Debug, PartialEq)]
pub struct VariantDictionary {
    handle: NativeHandle,
}

impl VariantDictionary {
    /// Creates an empty dictionary.
    ///
    /// # Errors
    ///
    /// Whatever the runtime reports from `dictionary_new`.
    pub fn new(rt: &Runtime) -> InteropResult<Self> {
        let raw = rt.dictionary_new()?;
        Ok(Self::from_handle(NativeHandle::from_owned(Arc::clone(rt), raw)))
    }

    pub(crate) fn from_handle(handle: NativeHandle) -> Self {
        Self { handle }
    }

    fn rt(&self) -> &Runtime {
        self.handle.runtime()
    }

    /// Number of entries.
    ///
    /// # Errors
    ///
    /// [`InteropError::StaleHandle`](crate::InteropError::StaleHandle) if the
    /// runtime lost the dictionary.
    pub fn len(&self) -> InteropResult<usize> {
        self.rt().dictionary_len(self.handle.raw())
    }

    /// Returns `true` when there are no entries.
    ///
    /// # Errors
    ///
    /// See [`VariantDictionary::len`].
    pub fn is_empty(&self) -> InteropResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Inserts or replaces an entry. The dictionary takes ownership of both.
    ///
    /// # Errors
    ///
    /// Whatever the runtime reports from `dictionary_insert`.
    pub fn insert(&self, key: Variant, value: Variant) -> InteropResult<()> {
        self.rt()
            .dictionary_insert(self.handle.raw(), key.into_raw(), value.into_raw())
    }

    /// Returns a copy of the value stored under `key`.
    ///
    /// # Errors
    ///
    /// [`InteropError::StaleHandle`](crate::InteropError::StaleHandle) if the
    /// runtime lost the dictionary.
    pub fn get(&self, key: &Variant) -> InteropResult<Option<Variant>> {
        let found = self.rt().dictionary_get(self.handle.raw(), &key.raw_view())?;
        Ok(found.map(|raw| Variant::from_raw(raw, self.rt())))
    }

    /// Returns `true` if `key` has an entry.
    ///
    /// # Errors
    ///
    /// See [`VariantDictionary::get`].
    pub fn contains_key(&self, key: &Variant) -> InteropResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Removes an entry. Returns `true` if it existed.
    ///
    /// # Errors
    ///
    /// See [`VariantDictionary::get`].
    pub fn remove(&self, key: &Variant) -> InteropResult<bool> {
        self.rt().dictionary_remove(self.handle.raw(), &key.raw_view())
    }

    /// Copies of every key, in insertion order.
    ///
    /// # Errors
    ///
    /// See [`VariantDictionary::get`].
    pub fn keys(&self) -> InteropResult<Vec<Variant>> {
        let keys = self.rt().dictionary_keys(self.handle.raw())?;
        Ok(keys.into_iter().map(|raw| Variant::from_raw(raw, self.rt())).collect())
    }

    /// Copies the dictionary reference through the runtime.
    ///
    /// # Errors
    ///
    /// Whatever the runtime reports from `new_copy`.
    pub fn try_clone(&self) -> InteropResult<Self> {
        self.handle.try_clone().map(Self::from_handle)
    }

    /// Owning handle.
    #[must_use]
    pub fn handle(&self) -> &NativeHandle {
        &self.handle
    }

    pub(crate) fn raw(&self) -> RawHandle {
        self.handle.raw()
    }

    pub(crate) fn into_raw(self) -> RawHandle {
        self.handle.into_raw()
    }
}

/// Array whose elements convert to and from `T`.
///
/// Shares storage with the [`VariantArray`] it wraps. Elements are checked
/// when read, not when the array is wrapped.
pub struct TypedArray<T: VariantType> {
    array: VariantArray,
    _element: PhantomData<fn() -> T>,
}

impl<T: VariantType> TypedArray<T> {
    /// Creates an empty array.
    ///
    /// # Errors
    ///
    /// Whatever the runtime reports from `array_new`.
    pub fn new(rt: &Runtime) -> InteropResult<Self> {
        VariantArray::new(rt).map(Self::from_untyped)
    }

    /// Views an untyped array as typed.
    #[must_use]
    pub fn from_untyped(array: VariantArray) -> Self {
        Self { array, _element: PhantomData }
    }

    /// The untyped array underneath.
    #[must_use]
    pub fn as_untyped(&self) -> &VariantArray {
        &self.array
    }

    /// Number of elements.
    ///
    /// # Errors
    ///
    /// See [`VariantArray::len`].
    pub fn len(&self) -> InteropResult<usize> {
        self.array.len()
    }

    /// Returns `true` when the array has no elements.
    ///
    /// # Errors
    ///
    /// See [`VariantArray::len`].
    pub fn is_empty(&self) -> InteropResult<bool> {
        self.array.is_empty()
    }

    /// Converts and appends a value.
    ///
    /// # Errors
    ///
    /// Conversion or runtime failure.
    pub fn push(&self, value: &T) -> VariantResult<()> {
        let variant = value.to_variant(self.array.rt())?;
        Ok(self.array.push(variant)?)
    }

    /// Reads and converts the element at `index`.
    ///
    /// # Errors
    ///
    /// [`VariantError::TypeMismatch`](crate::VariantError::TypeMismatch) if the
    /// element has another kind, or the runtime failure.
    pub fn get(&self, index: usize) -> VariantResult<T> {
        T::from_variant(&self.array.get(index)?)
    }

    /// Reads and converts every element.
    ///
    /// # Errors
    ///
    /// The first conversion or runtime failure.
    pub fn to_vec(&self) -> VariantResult<Vec<T>> {
        self.array.iter().map(|v| T::from_variant(&v?)).collect()
    }

    /// Copies the array reference through the runtime.
    ///
    /// # Errors
    ///
    /// Whatever the runtime reports from `new_copy`.
    pub fn try_clone(&self) -> InteropResult<Self> {
        self.array.try_clone().map(Self::from_untyped)
    }
}

impl<T: VariantType> Clone for TypedArray<T> {
    fn clone(&self) -> Self {
        Self::from_untyped(self.array.clone())
    }
}

impl<T: VariantType> fmt::Debug for TypedArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypedArray").field(&self.array.raw()).finish()
    }
}

/// Dictionary whose keys convert to and from `K` and values to and from `V`.
pub struct TypedDictionary<K: VariantType, V: VariantType> {
    dictionary: VariantDictionary,
    _entry: PhantomData<fn() -> (K, V)>,
}

impl<K: VariantType, V: VariantType> TypedDictionary<K, V> {
    /// Creates an empty dictionary.
    ///
    /// # Errors
    ///
    /// Whatever the runtime reports from `dictionary_new`.
    pub fn new(rt: &Runtime) -> InteropResult<Self> {
        VariantDictionary::new(rt).map(Self::from_untyped)
    }

    /// Views an untyped dictionary as typed.
    #[must_use]
    pub fn from_untyped(dictionary: VariantDictionary) -> Self {
        Self { dictionary, _entry: PhantomData }
    }

    /// The untyped dictionary underneath.
    #[must_use]
    pub fn as_untyped(&self) -> &VariantDictionary {
        &self.dictionary
    }

    /// Number of entries.
    ///
    /// # Errors
    ///
    /// See [`VariantDictionary::len`].
    pub fn len(&self) -> InteropResult<usize> {
        self.dictionary.len()
    }

    /// Returns `true` when there are no entries.
    ///
    /// # Errors
    ///
    /// See [`VariantDictionary::len`].
    pub fn is_empty(&self) -> InteropResult<bool> {
        self.dictionary.is_empty()
    }

    /// Converts and inserts an entry.
    ///
    /// # Errors
    ///
    /// Conversion or runtime failure.
    pub fn insert(&self, key: &K, value: &V) -> VariantResult<()> {
        let rt = self.dictionary.rt();
        let key = key.to_variant(rt)?;
        let value = value.to_variant(rt)?;
        Ok(self.dictionary.insert(key, value)?)
    }

    /// Reads and converts the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Conversion or runtime failure.
    pub fn get(&self, key: &K) -> VariantResult<Option<V>> {
        let key = key.to_variant(self.dictionary.rt())?;
        self.dictionary.get(&key)?.map(|v| V::from_variant(&v)).transpose()
    }

    /// Reads and converts every key, in insertion order.
    ///
    /// # Errors
    ///
    /// The first conversion or runtime failure.
    pub fn keys(&self) -> VariantResult<Vec<K>> {
        self.dictionary.keys()?.iter().map(K::from_variant).collect()
    }

    /// Copies the dictionary reference through the runtime.
    ///
    /// # Errors
    ///
    /// Whatever the runtime reports from `new_copy`.
    pub fn try_clone(&self) -> InteropResult<Self> {
        self.dictionary.try_clone().map(Self::from_untyped)
    }
}

impl<K: VariantType, V: VariantType> Clone for TypedDictionary<K, V> {
    fn clone(&self) -> Self {
        Self::from_untyped(self.dictionary.clone())
    }
}

impl<K: VariantType, V: VariantType> fmt::Debug for TypedDictionary<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypedDictionary").field(&self.dictionary.raw()).finish()
    }
}

/// A packed array of one element type.
#[derive(Clone, Debug, PartialEq)]
pub struct PackedArray {
    handle: NativeHandle,
    kind: VariantKind,
}

impl PackedArray {
    /// Hands `data` to the runtime.
    ///
    /// # Errors
    ///
    /// Whatever the runtime reports from `packed_array_new`.
    pub fn new(rt: &Runtime, data: PackedData) -> InteropResult<Self> {
        let kind = data.kind();
        let raw = rt.packed_array_new(data)?;
        Ok(Self::from_handle(NativeHandle::from_owned(Arc::clone(rt), raw), kind))
    }

    pub(crate) fn from_handle(handle: NativeHandle, kind: VariantKind) -> Self {
        debug_assert!(kind.is_packed_array());
        Self { handle, kind }
    }

    /// Which `Packed*Array` this is.
    #[must_use]
    pub fn kind(&self) -> VariantKind {
        self.kind
    }

    /// Copies the contents out.
    ///
    /// # Errors
    ///
    /// [`InteropError::StaleHandle`](crate::InteropError::StaleHandle) if the
    /// runtime lost the array.
    pub fn read(&self) -> InteropResult<PackedData> {
        self.handle.runtime().packed_array_read(self.handle.raw())
    }

    /// Number of elements.
    ///
    /// # Errors
    ///
    /// See [`PackedArray::read`].
    pub fn len(&self) -> InteropResult<usize> {
        Ok(self.read()?.len())
    }

    /// Returns `true` when there are no elements.
    ///
    /// # Errors
    ///
    /// See [`PackedArray::read`].
    pub fn is_empty(&self) -> InteropResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Copies through the runtime.
    ///
    /// # Errors
    ///
    /// Whatever the runtime reports from `new_copy`.
    pub fn try_clone(&self) -> InteropResult<Self> {
        let handle = self.handle.try_clone()?;
        Ok(Self::from_handle(handle, self.kind))
    }

    /// Owning handle.
    #[must_use]
    pub fn handle(&self) -> &NativeHandle {
        &self.handle
    }

    pub(crate) fn raw(&self) -> RawHandle {
        self.handle.raw()
    }

    pub(crate) fn into_raw(self) -> RawHandle {
        self.handle.into_raw()
    }
}
