/// Implements [`Typed`], [`ToValue`] and [`FromValue`] for a [`TypedBean`],
/// so that the bean can be used as a property of other beans.
///
/// Registering a type that has a property of this bean type registers the
/// bean too.
///
/// [`Typed`]: crate::info::Typed
/// [`ToValue`]: crate::value::ToValue
/// [`FromValue`]: crate::value::FromValue
/// [`TypedBean`]: crate::bean::TypedBean
#[macro_export]
macro_rules! impl_bean_value {
    ($ty:ty) => {
        impl $crate::info::Typed for $ty {
            #[inline]
            fn type_token() -> $crate::info::TypeToken {
                $crate::info::TypeToken::Named(<$ty as $crate::bean::TypedBean>::TYPE_PATH)
            }

            #[inline]
            fn register_dependencies(registry: &mut $crate::registry::TypeRegistry) {
                registry.register::<$ty>();
            }
        }

        impl $crate::value::ToValue for $ty {
            #[inline]
            fn to_value(&self) -> ::core::option::Option<$crate::value::Value> {
                ::core::option::Option::Some($crate::value::Value::Bean(
                    $crate::__macro_exports::Box::new(::core::clone::Clone::clone(self)),
                ))
            }
        }

        impl $crate::value::FromValue for $ty {
            fn from_value(
                value: ::core::option::Option<$crate::value::Value>,
            ) -> ::core::result::Result<Self, $crate::value::ValueError> {
                match value {
                    ::core::option::Option::Some($crate::value::Value::Bean(bean)) => {
                        let found = bean.meta_bean().type_path();
                        $crate::bean::Bean::into_any(bean)
                            .downcast::<$ty>()
                            .map(|bean| *bean)
                            .map_err(|_| {
                                $crate::value::ValueError::Invalid($crate::__macro_exports::format!(
                                    "expected bean `{}` but found `{}`",
                                    <$ty as $crate::bean::TypedBean>::TYPE_PATH,
                                    found,
                                ))
                            })
                    }
                    ::core::option::Option::Some(other) => {
                        ::core::result::Result::Err($crate::value::ValueError::Mismatch {
                            expected: "bean",
                            found: other.kind_name(),
                        })
                    }
                    ::core::option::Option::None => {
                        ::core::result::Result::Err($crate::value::ValueError::Null {
                            expected: <$ty as $crate::bean::TypedBean>::TYPE_PATH,
                        })
                    }
                }
            }
        }
    };
}

/// Implements [`Opaque`], [`Typed`], [`ToValue`] and [`FromValue`] for a
/// leaf type with the given type path.
///
/// The type must be `Clone + PartialEq + Debug + Send + Sync + 'static`.
/// Pair it with a [`TextConvert`] impl registered in the [`TypeRegistry`] to
/// make it serializable.
///
/// ```
/// use beans_reflect::convert::TextConvert;
/// use beans_reflect::registry::TypeRegistry;
/// use beans_reflect::{impl_opaque_value, Value, ValueError};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Celsius(f64);
///
/// impl_opaque_value!(Celsius, "units::Celsius");
///
/// impl TextConvert for Celsius {
///     fn to_text(&self) -> String {
///         format!("{}C", self.0)
///     }
///
///     fn from_text(text: &str) -> Result<Self, ValueError> {
///         let number = text.strip_suffix('C').unwrap_or(text);
///         number
///             .parse()
///             .map(Celsius)
///             .map_err(|_| ValueError::Invalid(format!("bad temperature `{text}`")))
///     }
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register_convert::<Celsius>();
///
/// let value = Value::Opaque(Box::new(Celsius(21.5)));
/// assert_eq!(registry.codec().to_text(&value).unwrap(), "21.5C");
/// ```
///
/// [`Opaque`]: crate::value::Opaque
/// [`Typed`]: crate::info::Typed
/// [`ToValue`]: crate::value::ToValue
/// [`FromValue`]: crate::value::FromValue
/// [`TextConvert`]: crate::convert::TextConvert
/// [`TypeRegistry`]: crate::registry::TypeRegistry
#[macro_export]
macro_rules! impl_opaque_value {
    ($ty:ty, $path:expr) => {
        impl $crate::value::Opaque for $ty {
            #[inline]
            fn type_path(&self) -> &'static str {
                $path
            }

            #[inline]
            fn clone_opaque(&self) -> $crate::__macro_exports::Box<dyn $crate::value::Opaque> {
                $crate::__macro_exports::Box::new(::core::clone::Clone::clone(self))
            }

            fn opaque_eq(&self, other: &dyn $crate::value::Opaque) -> bool {
                other
                    .as_any()
                    .downcast_ref::<$ty>()
                    .is_some_and(|other| ::core::cmp::PartialEq::eq(self, other))
            }

            #[inline]
            fn as_any(&self) -> &dyn $crate::__macro_exports::Any {
                self
            }

            #[inline]
            fn into_any(
                self: $crate::__macro_exports::Box<Self>,
            ) -> $crate::__macro_exports::Box<dyn $crate::__macro_exports::Any> {
                self
            }
        }

        impl $crate::info::Typed for $ty {
            #[inline]
            fn type_token() -> $crate::info::TypeToken {
                $crate::info::TypeToken::Named($path)
            }
        }

        impl $crate::value::ToValue for $ty {
            #[inline]
            fn to_value(&self) -> ::core::option::Option<$crate::value::Value> {
                ::core::option::Option::Some($crate::value::Value::Opaque(
                    $crate::__macro_exports::Box::new(::core::clone::Clone::clone(self)),
                ))
            }
        }

        impl $crate::value::FromValue for $ty {
            fn from_value(
                value: ::core::option::Option<$crate::value::Value>,
            ) -> ::core::result::Result<Self, $crate::value::ValueError> {
                match value {
                    ::core::option::Option::Some($crate::value::Value::Opaque(opaque)) => {
                        $crate::value::Opaque::into_any(opaque)
                            .downcast::<$ty>()
                            .map(|value| *value)
                            .map_err(|_| $crate::value::ValueError::Mismatch {
                                expected: $path,
                                found: "opaque value",
                            })
                    }
                    ::core::option::Option::Some(other) => {
                        ::core::result::Result::Err($crate::value::ValueError::Mismatch {
                            expected: $path,
                            found: other.kind_name(),
                        })
                    }
                    ::core::option::Option::None => {
                        ::core::result::Result::Err($crate::value::ValueError::Null {
                            expected: $path,
                        })
                    }
                }
            }
        }
    };
}
