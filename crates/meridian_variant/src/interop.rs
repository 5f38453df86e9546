//! # Native Interop
//!
//! The seam between script-side values and the runtime that owns strings,
//! collections and object references.
//!
//! ## Ownership Rules
//!
//! 1. **Every handle is owned by exactly one [`NativeHandle`]** - created by a
//!    `*_new` call or by [`NativeInterop::new_copy`]
//! 2. **Clone = one `new_copy`** - the copy is independently destructible
//! 3. **Drop = one `destroy`** - never zero, never twice
//! 4. **[`RawVariant`] transfers ownership** - passing one into the runtime
//!    hands over its handle; receiving one hands a fresh handle back

use std::fmt;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use meridian_math::{Color, Vector2, Vector3, Vector4};

use crate::error::InteropResult;
use crate::kind::VariantKind;
use crate::variant::Variant;

/// Shared reference to the runtime a handle belongs to.
pub type Runtime = Arc<dyn NativeInterop>;

/// Opaque payload handle issued by the runtime. Zero is never issued.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Pod, Zeroable)]
pub struct RawHandle {
    id: u64,
}

impl RawHandle {
    /// The null handle.
    pub const NULL: Self = Self { id: 0 };

    /// Wraps a raw id.
    #[inline]
    #[must_use]
    pub const fn from_id(id: u64) -> Self {
        Self { id }
    }

    /// Raw id.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u64 {
        self.id
    }

    /// Returns `true` for [`RawHandle::NULL`].
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.id == 0
    }
}

impl fmt::Display for RawHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}

/// Contents of a packed array, one vector per element type.
#[derive(Clone, Debug, PartialEq)]
pub enum PackedData {
    /// `PackedByteArray`
    Byte(Vec<u8>),
    /// `PackedInt32Array`
    Int32(Vec<i32>),
    /// `PackedInt64Array`
    Int64(Vec<i64>),
    /// `PackedFloat32Array`
    Float32(Vec<f32>),
    /// `PackedFloat64Array`
    Float64(Vec<f64>),
    /// `PackedStringArray`
    String(Vec<String>),
    /// `PackedVector2Array`
    Vector2(Vec<Vector2>),
    /// `PackedVector3Array`
    Vector3(Vec<Vector3>),
    /// `PackedColorArray`
    Color(Vec<Color>),
    /// `PackedVector4Array`
    Vector4(Vec<Vector4>),
}

impl PackedData {
    /// Runtime tag of this packed array.
    #[must_use]
    pub const fn kind(&self) -> VariantKind {
        match self {
            Self::Byte(_) => VariantKind::PackedByteArray,
            Self::Int32(_) => VariantKind::PackedInt32Array,
            Self::Int64(_) => VariantKind::PackedInt64Array,
            Self::Float32(_) => VariantKind::PackedFloat32Array,
            Self::Float64(_) => VariantKind::PackedFloat64Array,
            Self::String(_) => VariantKind::PackedStringArray,
            Self::Vector2(_) => VariantKind::PackedVector2Array,
            Self::Vector3(_) => VariantKind::PackedVector3Array,
            Self::Color(_) => VariantKind::PackedColorArray,
            Self::Vector4(_) => VariantKind::PackedVector4Array,
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Byte(v) => v.len(),
            Self::Int32(v) => v.len(),
            Self::Int64(v) => v.len(),
            Self::Float32(v) => v.len(),
            Self::Float64(v) => v.len(),
            Self::String(v) => v.len(),
            Self::Vector2(v) => v.len(),
            Self::Vector3(v) => v.len(),
            Self::Color(v) => v.len(),
            Self::Vector4(v) => v.len(),
        }
    }

    /// Returns `true` when there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A variant in the form the runtime stores it: trivial payloads inline,
/// runtime-owned payloads as a bare handle.
///
/// A `RawVariant` carrying a handle owns it but has no destructor; it must be
/// handed to the runtime or turned back into a [`Variant`] with
/// [`Variant::from_raw`].
#[derive(Debug)]
pub struct RawVariant(RawRepr);

#[derive(Debug)]
enum RawRepr {
    Inline(Variant),
    Owned { kind: VariantKind, handle: RawHandle },
}

impl RawVariant {
    /// Wraps a trivially copyable variant.
    pub(crate) fn inline(value: Variant) -> Self {
        debug_assert!(value.kind().is_trivially_copyable());
        Self(RawRepr::Inline(value))
    }

    pub(crate) fn owned(kind: VariantKind, handle: RawHandle) -> Self {
        Self(RawRepr::Owned { kind, handle })
    }

    /// Runtime tag of the payload.
    #[must_use]
    pub fn kind(&self) -> VariantKind {
        match &self.0 {
            RawRepr::Inline(value) => value.kind(),
            RawRepr::Owned { kind, .. } => *kind,
        }
    }

    /// Handle of a runtime-owned payload.
    #[must_use]
    pub fn handle(&self) -> Option<RawHandle> {
        match &self.0 {
            RawRepr::Inline(_) => None,
            RawRepr::Owned { handle, .. } => Some(*handle),
        }
    }

    /// The inline value of a trivially copyable payload.
    #[must_use]
    pub fn as_inline(&self) -> Option<&Variant> {
        match &self.0 {
            RawRepr::Inline(value) => Some(value),
            RawRepr::Owned { .. } => None,
        }
    }

    /// Shallow copy that shares the handle without acquiring it.
    pub(crate) fn view(&self) -> Self {
        match &self.0 {
            RawRepr::Inline(value) => Self::inline(value.clone()),
            RawRepr::Owned { kind, handle } => Self::owned(*kind, *handle),
        }
    }

    pub(crate) fn into_inline(self) -> Result<Variant, (VariantKind, RawHandle)> {
        match self.0 {
            RawRepr::Inline(value) => Ok(value),
            RawRepr::Owned { kind, handle } => Err((kind, handle)),
        }
    }
}

/// Entry points of the runtime that owns non-trivial payloads.
///
/// Every `*_new` call returns a handle the caller owns. Accessors that return
/// a [`RawVariant`] hand out a fresh reference the caller owns; accessors that
/// take one by value consume it.
pub trait NativeInterop: Send + Sync {
    /// Creates a string.
    fn string_new(&self, text: &str) -> InteropResult<RawHandle>;

    /// Creates a string name. Runtimes may intern equal names.
    fn string_name_new(&self, name: &str) -> InteropResult<RawHandle>;

    /// Creates a node path.
    fn node_path_new(&self, path: &str) -> InteropResult<RawHandle>;

    /// Reads the text of a string, string name or node path.
    fn string_read(&self, handle: RawHandle) -> InteropResult<String>;

    /// Creates an empty array.
    fn array_new(&self) -> InteropResult<RawHandle>;

    /// Number of elements in an array.
    fn array_len(&self, array: RawHandle) -> InteropResult<usize>;

    /// Returns a new reference to the element at `index`.
    fn array_get(&self, array: RawHandle, index: usize) -> InteropResult<RawVariant>;

    /// Replaces the element at `index`, consuming `value`.
    fn array_set(&self, array: RawHandle, index: usize, value: RawVariant) -> InteropResult<()>;

    /// Appends an element, consuming `value`.
    fn array_push(&self, array: RawHandle, value: RawVariant) -> InteropResult<()>;

    /// Creates an empty dictionary.
    fn dictionary_new(&self) -> InteropResult<RawHandle>;

    /// Number of entries in a dictionary.
    fn dictionary_len(&self, dictionary: RawHandle) -> InteropResult<usize>;

    /// Returns a new reference to the value stored under `key`.
    /// `key` is borrowed, not consumed.
    fn dictionary_get(&self, dictionary: RawHandle, key: &RawVariant) -> InteropResult<Option<RawVariant>>;

    /// Inserts or replaces an entry, consuming `key` and `value`.
    fn dictionary_insert(&self, dictionary: RawHandle, key: RawVariant, value: RawVariant) -> InteropResult<()>;

    /// Removes an entry. Returns `true` if it existed.
    fn dictionary_remove(&self, dictionary: RawHandle, key: &RawVariant) -> InteropResult<bool>;

    /// New references to every key, in insertion order.
    fn dictionary_keys(&self, dictionary: RawHandle) -> InteropResult<Vec<RawVariant>>;

    /// Creates a packed array holding `data`.
    fn packed_array_new(&self, data: PackedData) -> InteropResult<RawHandle>;

    /// Copies the contents of a packed array out.
    fn packed_array_read(&self, handle: RawHandle) -> InteropResult<PackedData>;

    /// Instantiates an object of the given class.
    fn object_new(&self, class_name: &str) -> InteropResult<RawHandle>;

    /// Class name of an object.
    fn object_class(&self, object: RawHandle) -> InteropResult<String>;

    /// Binds `method` on `target`. The target handle is borrowed.
    fn callable_new(&self, target: RawHandle, method: &str) -> InteropResult<RawHandle>;

    /// Names signal `name` on `owner`. The owner handle is borrowed.
    fn signal_new(&self, owner: RawHandle, name: &str) -> InteropResult<RawHandle>;

    /// Object and name of a callable or signal. The object handle is a new
    /// reference the caller owns.
    fn bound_read(&self, handle: RawHandle) -> InteropResult<(RawHandle, String)>;

    /// Issues an independently destructible copy of `handle`.
    fn new_copy(&self, handle: RawHandle) -> InteropResult<RawHandle>;

    /// Releases `handle`.
    fn destroy(&self, handle: RawHandle) -> InteropResult<()>;

    /// Returns `true` if `a` and `b` refer to the same payload. Copies made by
    /// [`NativeInterop::new_copy`] share their source's payload.
    fn same_payload(&self, a: RawHandle, b: RawHandle) -> InteropResult<bool> {
        Ok(a == b)
    }
}

/// Owning handle to a runtime payload.
///
/// `Clone` calls [`NativeInterop::new_copy`] once; `Drop` calls
/// [`NativeInterop::destroy`] once.
pub struct NativeHandle {
    rt: Runtime,
    raw: RawHandle,
}

impl NativeHandle {
    /// Takes ownership of a handle the runtime just issued.
    #[must_use]
    pub fn from_owned(rt: Runtime, raw: RawHandle) -> Self {
        Self { rt, raw }
    }

    /// The raw handle, still owned by `self`.
    #[inline]
    #[must_use]
    pub fn raw(&self) -> RawHandle {
        self.raw
    }

    /// The runtime that issued this handle.
    #[inline]
    #[must_use]
    pub fn runtime(&self) -> &Runtime {
        &self.rt
    }

    /// Copies through the runtime, reporting failure instead of degrading to
    /// a null handle like `Clone` does.
    ///
    /// # Errors
    ///
    /// Whatever [`NativeInterop::new_copy`] reports.
    pub fn try_clone(&self) -> InteropResult<Self> {
        if self.raw.is_null() {
            return Ok(Self::from_owned(Arc::clone(&self.rt), RawHandle::NULL));
        }
        let raw = self.rt.new_copy(self.raw)?;
        Ok(Self::from_owned(Arc::clone(&self.rt), raw))
    }

    /// Gives up ownership without releasing.
    pub(crate) fn into_raw(mut self) -> RawHandle {
        std::mem::replace(&mut self.raw, RawHandle::NULL)
    }
}

impl Clone for NativeHandle {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| {
            tracing::error!(handle = %self.raw, error = %err, "runtime copy failed");
            Self::from_owned(Arc::clone(&self.rt), RawHandle::NULL)
        })
    }
}

impl Drop for NativeHandle {
    fn drop(&mut self) {
        if self.raw.is_null() {
            return;
        }
        if let Err(err) = self.rt.destroy(self.raw) {
            tracing::debug!(handle = %self.raw, error = %err, "release rejected");
        }
    }
}

/// Payload identity: a handle equals its copies, not other payloads with
/// equal contents.
impl PartialEq for NativeHandle {
    fn eq(&self, other: &Self) -> bool {
        if Arc::as_ptr(&self.rt).cast::<()>() != Arc::as_ptr(&other.rt).cast::<()>() {
            return false;
        }
        if self.raw == other.raw {
            return true;
        }
        if self.raw.is_null() || other.raw.is_null() {
            return false;
        }
        self.rt.same_payload(self.raw, other.raw).unwrap_or(false)
    }
}

impl fmt::Debug for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NativeHandle").field(&self.raw).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_handle_layout() {
        assert_eq!(std::mem::size_of::<RawHandle>(), 8);
        let handle = RawHandle::from_id(7);
        let bytes = bytemuck::bytes_of(&handle);
        assert_eq!(bytes, &7u64.to_ne_bytes());
        assert!(RawHandle::default().is_null());
        assert_eq!(RawHandle::from_id(7).to_string(), "#7");
    }

    #[test]
    fn test_packed_data_kind() {
        let data = PackedData::Vector3(vec![Vector3::ZERO, Vector3::ONE]);
        assert_eq!(data.kind(), VariantKind::PackedVector3Array);
        assert_eq!(data.len(), 2);
        assert!(PackedData::Byte(Vec::new()).is_empty());
    }
}
