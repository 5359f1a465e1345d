use alloc::boxed::Box;
use core::any::Any;
use core::fmt::Debug;

use crate::bean::MetaBean;

// -----------------------------------------------------------------------------
// Bean

/// The runtime view of a bean.
///
/// A bean is any value whose state is exposed as named properties described
/// by its [`MetaBean`]. This trait is object safe; code walking an object
/// graph works with `&dyn Bean` and reads property values through
/// [`MetaProperty::get`](crate::bean::MetaProperty::get).
///
/// It is implemented automatically for every [`TypedBean`].
pub trait Bean: Any + Debug + Send + Sync {
    /// Metadata of the runtime type.
    fn meta_bean(&self) -> &'static MetaBean;

    fn clone_bean(&self) -> Box<dyn Bean>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl Clone for Box<dyn Bean> {
    #[inline]
    fn clone(&self) -> Self {
        self.clone_bean()
    }
}

// -----------------------------------------------------------------------------
// TypedBean

/// A concrete bean type with statically known metadata.
///
/// The metadata is built on first access and lives for the rest of the
/// process. See [`MetaBeanCell`](crate::bean::MetaBeanCell) for the usual
/// implementation pattern, and pair the impl with
/// [`impl_bean_value!`](crate::impl_bean_value) so that the type can be used
/// as a property of other beans.
pub trait TypedBean: Clone + Debug + Send + Sync + 'static {
    /// Full type path, unique among all registered types.
    ///
    /// This is a constant rather than a lookup through [`meta`](Self::meta)
    /// so that a bean can declare properties of its own type while its
    /// metadata is being built.
    const TYPE_PATH: &'static str;

    fn meta() -> &'static MetaBean;
}

impl<T: TypedBean> Bean for T {
    #[inline]
    fn meta_bean(&self) -> &'static MetaBean {
        T::meta()
    }

    #[inline]
    fn clone_bean(&self) -> Box<dyn Bean> {
        Box::new(self.clone())
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

// -----------------------------------------------------------------------------
// Equality

/// Deep structural equality of two beans.
///
/// Beans are equal when they share a type path and every readable property
/// holds equal values, compared recursively through [`Value`]'s equality.
///
/// [`Value`]: crate::value::Value
pub fn bean_eq(a: &dyn Bean, b: &dyn Bean) -> bool {
    let meta = a.meta_bean();
    if meta.type_path() != b.meta_bean().type_path() {
        return false;
    }
    meta.properties()
        .iter()
        .filter(|property| property.style().is_readable())
        .all(|property| property.get(a) == property.get(b))
}
