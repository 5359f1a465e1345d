use alloc::boxed::Box;
use core::any::Any;
use core::fmt::Debug;

// -----------------------------------------------------------------------------
// Opaque

/// A leaf value of a type the bean system does not look into.
///
/// Opaque values are written through the [`TextCodec`], so their type must
/// have a registered text conversion to be serializable. Use
/// [`impl_opaque_value!`](crate::impl_opaque_value) to implement this trait
/// together with the value conversions.
///
/// [`TextCodec`]: crate::convert::TextCodec
pub trait Opaque: Any + Debug + Send + Sync {
    /// Full type path of the underlying type.
    fn type_path(&self) -> &'static str;

    fn clone_opaque(&self) -> Box<dyn Opaque>;

    /// Equality against another opaque value, `false` for different types.
    fn opaque_eq(&self, other: &dyn Opaque) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl Clone for Box<dyn Opaque> {
    #[inline]
    fn clone(&self) -> Self {
        self.clone_opaque()
    }
}

impl Opaque for core::time::Duration {
    #[inline]
    fn type_path(&self) -> &'static str {
        crate::info::type_paths::DURATION
    }

    #[inline]
    fn clone_opaque(&self) -> Box<dyn Opaque> {
        Box::new(*self)
    }

    fn opaque_eq(&self, other: &dyn Opaque) -> bool {
        other.as_any().downcast_ref::<Self>() == Some(self)
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
