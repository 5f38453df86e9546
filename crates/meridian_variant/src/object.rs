//! Object references and the two kinds bound to an object: callables and
//! signals.

use std::sync::Arc;

use crate::error::InteropResult;
use crate::interop::{NativeHandle, RawHandle, Runtime};

/// Reference to a runtime object.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectRef {
    handle: NativeHandle,
}

impl ObjectRef {
    /// Instantiates `class_name` in the runtime.
    ///
    /// # Errors
    ///
    /// Whatever the runtime reports from `object_new`.
    pub fn new(rt: &Runtime, class_name: &str) -> InteropResult<Self> {
        let raw = rt.object_new(class_name)?;
        Ok(Self::from_handle(NativeHandle::from_owned(Arc::clone(rt), raw)))
    }

    pub(crate) fn from_handle(handle: NativeHandle) -> Self {
        Self { handle }
    }

    /// Class the object was instantiated as.
    ///
    /// # Errors
    ///
    /// [`InteropError::StaleHandle`](crate::InteropError::StaleHandle) if the
    /// runtime lost the object.
    pub fn class_name(&self) -> InteropResult<String> {
        self.handle.runtime().object_class(self.handle.raw())
    }

    /// Copies the reference through the runtime.
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

macro_rules! impl_bound {
    ($ty:ident, $ctor:ident, $object:ident, $name:ident) => {
        impl $ty {
            /// Binds to an object through the object's runtime.
            ///
            /// # Errors
            ///
            /// Whatever the runtime reports from its constructor.
            pub fn new(object: &ObjectRef, $name: &str) -> InteropResult<Self> {
                let rt = object.handle().runtime();
                let raw = rt.$ctor(object.raw(), $name)?;
                Ok(Self::from_handle(NativeHandle::from_owned(Arc::clone(rt), raw)))
            }

            pub(crate) fn from_handle(handle: NativeHandle) -> Self {
                Self { handle }
            }

            /// The object this is bound to.
            ///
            /// # Errors
            ///
            /// [`InteropError::StaleHandle`](crate::InteropError::StaleHandle)
            /// if the runtime lost the payload.
            pub fn $object(&self) -> InteropResult<ObjectRef> {
                let rt = self.handle.runtime();
                let (object, _) = rt.bound_read(self.handle.raw())?;
                Ok(ObjectRef::from_handle(NativeHandle::from_owned(Arc::clone(rt), object)))
            }

            /// The bound name.
            ///
            /// # Errors
            ///
            /// [`InteropError::StaleHandle`](crate::InteropError::StaleHandle)
            /// if the runtime lost the payload.
            pub fn $name(&self) -> InteropResult<String> {
                let rt = self.handle.runtime();
                let (object, name) = rt.bound_read(self.handle.raw())?;
                drop(NativeHandle::from_owned(Arc::clone(rt), object));
                Ok(name)
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
    };
}

/// A method bound to an object.
#[derive(Clone, Debug, PartialEq)]
pub struct Callable {
    handle: NativeHandle,
}

impl_bound!(Callable, callable_new, target, method);

/// A signal declared on an object.
#[derive(Clone, Debug, PartialEq)]
pub struct Signal {
    handle: NativeHandle,
}

impl_bound!(Signal, signal_new, owner, name);
