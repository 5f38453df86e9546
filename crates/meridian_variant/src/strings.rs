//! Runtime-owned text: strings, interned names and node paths.
//!
//! Text never lives on the script side; every read goes through the runtime.

use std::sync::Arc;

use crate::error::InteropResult;
use crate::interop::{NativeHandle, RawHandle, Runtime};

/// A runtime string.
#[derive(Clone, Debug)]
pub struct GString {
    handle: NativeHandle,
}

impl GString {
    /// Creates a string through the runtime.
    ///
    /// # Errors
    ///
    /// Whatever the runtime reports from `string_new`.
    pub fn new(rt: &Runtime, text: &str) -> InteropResult<Self> {
        let raw = rt.string_new(text)?;
        Ok(Self::from_handle(NativeHandle::from_owned(Arc::clone(rt), raw)))
    }

    pub(crate) fn from_handle(handle: NativeHandle) -> Self {
        Self { handle }
    }

    /// Reads the text.
    ///
    /// # Errors
    ///
    /// [`InteropError::StaleHandle`](crate::InteropError::StaleHandle) if the
    /// runtime lost the payload.
    pub fn text(&self) -> InteropResult<String> {
        self.handle.runtime().string_read(self.handle.raw())
    }

    /// Copies through the runtime.
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

macro_rules! impl_optional_text {
    ($ty:ident, $ctor:ident) => {
        impl $ty {
            /// Creates the value through the runtime. The empty text is the
            /// default value and makes no runtime call.
            ///
            /// # Errors
            ///
            /// Whatever the runtime reports from its constructor.
            pub fn new(rt: &Runtime, text: &str) -> InteropResult<Self> {
                if text.is_empty() {
                    return Ok(Self::default());
                }
                let raw = rt.$ctor(text)?;
                Ok(Self { handle: Some(NativeHandle::from_owned(Arc::clone(rt), raw)) })
            }

            pub(crate) fn from_raw(rt: &Runtime, raw: RawHandle) -> Self {
                let handle = (!raw.is_null()).then(|| NativeHandle::from_owned(Arc::clone(rt), raw));
                Self { handle }
            }

            /// Returns `true` for the empty value.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.handle.is_none()
            }

            /// Reads the text. The empty value reads as `""` without a runtime call.
            ///
            /// # Errors
            ///
            /// [`InteropError::StaleHandle`](crate::InteropError::StaleHandle)
            /// if the runtime lost the payload.
            pub fn text(&self) -> InteropResult<String> {
                match &self.handle {
                    Some(handle) => handle.runtime().string_read(handle.raw()),
                    None => Ok(String::new()),
                }
            }

            /// Copies through the runtime. Copying the empty value is free.
            ///
            /// # Errors
            ///
            /// Whatever the runtime reports from `new_copy`.
            pub fn try_clone(&self) -> InteropResult<Self> {
                let handle = self.handle.as_ref().map(NativeHandle::try_clone).transpose()?;
                Ok(Self { handle })
            }

            /// Owning handle, absent for the empty value.
            #[must_use]
            pub fn handle(&self) -> Option<&NativeHandle> {
                self.handle.as_ref()
            }

            pub(crate) fn raw(&self) -> RawHandle {
                self.handle.as_ref().map_or(RawHandle::NULL, NativeHandle::raw)
            }

            pub(crate) fn into_raw(self) -> RawHandle {
                self.handle.map_or(RawHandle::NULL, NativeHandle::into_raw)
            }
        }
    };
}

/// An interned name. Runtimes may share one payload between equal names.
#[derive(Clone, Debug, Default)]
pub struct StringName {
    handle: Option<NativeHandle>,
}

impl_optional_text!(StringName, string_name_new);

/// A path through the scene tree, such as `../Player/Camera:fov`.
#[derive(Clone, Debug, Default)]
pub struct NodePath {
    handle: Option<NativeHandle>,
}

impl_optional_text!(NodePath, node_path_new);

// Equal when they share a payload or hold the same text. A payload the
// runtime lost compares unequal to everything but itself.
macro_rules! impl_text_eq {
    ($($ty:ident),+) => {$(
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.handle == other.handle
                    || matches!((self.text(), other.text()), (Ok(a), Ok(b)) if a == b)
            }
        }
    )+};
}

impl_text_eq!(GString, StringName, NodePath);

impl NodePath {
    /// Returns `true` if the path starts at the tree root.
    ///
    /// # Errors
    ///
    /// See [`NodePath::text`].
    pub fn is_absolute(&self) -> InteropResult<bool> {
        Ok(self.text()?.starts_with('/'))
    }

    /// Node names along the path, without subnames.
    ///
    /// # Errors
    ///
    /// See [`NodePath::text`].
    pub fn names(&self) -> InteropResult<Vec<String>> {
        let text = self.text()?;
        let nodes = text.split(':').next().unwrap_or_default();
        Ok(nodes.split('/').filter(|n| !n.is_empty()).map(str::to_owned).collect())
    }

    /// Property subnames after the first `:`.
    ///
    /// # Errors
    ///
    /// See [`NodePath::text`].
    pub fn subnames(&self) -> InteropResult<Vec<String>> {
        let text = self.text()?;
        Ok(text.split(':').skip(1).filter(|n| !n.is_empty()).map(str::to_owned).collect())
    }
}
