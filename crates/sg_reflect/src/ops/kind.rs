use crate::component::ComponentRef;
use crate::info::{ReflectKind, ReflectKindError};
use crate::ops::{Array, List, Map, Nullable, Struct};
use crate::reflection::Reflect;

// -----------------------------------------------------------------------------
// ReflectRef / ReflectMut

macro_rules! impl_kind_cast {
    ($name:ident, { $($method:ident : $kind:ident => $target:ty,)* }) => {
        impl<'a> $name<'a> {
            /// Returns the [`ReflectKind`] of the referenced value.
            pub fn kind(&self) -> ReflectKind {
                match self {
                    $(Self::$kind(_) => ReflectKind::$kind,)*
                }
            }

            $(
                #[doc = concat!("Attempts a cast to the [`", stringify!($kind), "`](ReflectKind::", stringify!($kind), ") kind.")]
                pub fn $method(self) -> Result<$target, ReflectKindError> {
                    match self {
                        Self::$kind(value) => Ok(value),
                        _ => Err(ReflectKindError {
                            expected: ReflectKind::$kind,
                            received: self.kind(),
                        }),
                    }
                }
            )*
        }
    };
}

/// An immutable, kind-dispatched view of a reflected value.
///
/// Produced by [`Reflect::reflect_ref`]; the variant decides which operation
/// trait the value exposes.
///
/// # Examples
///
/// ```
/// use sg_reflect::Reflect;
///
/// let vec = vec![1, 2, 3];
/// let list = vec.reflect_ref().as_list().unwrap();
///
/// assert_eq!(list.len(), 3);
/// ```
pub enum ReflectRef<'a> {
    /// A named-field aggregate.
    Struct(&'a dyn Struct),
    /// A growable, ordered container.
    List(&'a dyn List),
    /// A fixed-capacity container.
    Array(&'a dyn Array),
    /// A keyed container.
    Map(&'a dyn Map),
    /// An optional slot.
    Nullable(&'a dyn Nullable),
    /// A shared component handle.
    Component(&'a ComponentRef),
    /// A structureless leaf.
    Opaque(&'a dyn Reflect),
}

impl_kind_cast!(ReflectRef, {
    as_struct: Struct => &'a dyn Struct,
    as_list: List => &'a dyn List,
    as_array: Array => &'a dyn Array,
    as_map: Map => &'a dyn Map,
    as_nullable: Nullable => &'a dyn Nullable,
    as_component: Component => &'a ComponentRef,
    as_opaque: Opaque => &'a dyn Reflect,
});

/// A mutable, kind-dispatched view of a reflected value.
///
/// Produced by [`Reflect::reflect_mut`].
pub enum ReflectMut<'a> {
    /// A named-field aggregate.
    Struct(&'a mut dyn Struct),
    /// A growable, ordered container.
    List(&'a mut dyn List),
    /// A fixed-capacity container.
    Array(&'a mut dyn Array),
    /// A keyed container.
    Map(&'a mut dyn Map),
    /// An optional slot.
    Nullable(&'a mut dyn Nullable),
    /// A shared component handle.
    Component(&'a mut ComponentRef),
    /// A structureless leaf.
    Opaque(&'a mut dyn Reflect),
}

impl_kind_cast!(ReflectMut, {
    as_struct: Struct => &'a mut dyn Struct,
    as_list: List => &'a mut dyn List,
    as_array: Array => &'a mut dyn Array,
    as_map: Map => &'a mut dyn Map,
    as_nullable: Nullable => &'a mut dyn Nullable,
    as_component: Component => &'a mut ComponentRef,
    as_opaque: Opaque => &'a mut dyn Reflect,
});
