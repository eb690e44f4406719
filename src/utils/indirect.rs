//! Dereference through nested pointer-like layers to the base value

use std::rc::Rc;
use std::sync::Arc;

/// Reach the innermost value behind references, boxes, shared pointers and
/// options. An empty `Option` at any layer yields `None`.
///
/// ```
/// use cmdkit::utils::indirect::Indirect;
///
/// let value = Some(Box::new(Some(5_i32)));
/// assert_eq!(value.indirect(), Some(&5));
/// ```
pub trait Indirect {
    type Base: ?Sized;

    fn indirect(&self) -> Option<&Self::Base>;
}

/// Implement [`Indirect`] for types that are their own base.
#[macro_export]
macro_rules! impl_indirect_base {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::utils::indirect::Indirect for $ty {
                type Base = $ty;

                fn indirect(&self) -> Option<&Self::Base> {
                    Some(self)
                }
            }
        )*
    };
}

impl_indirect_base!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, str,
    String,
);

impl<T: Indirect + ?Sized> Indirect for &T {
    type Base = T::Base;

    fn indirect(&self) -> Option<&Self::Base> {
        (**self).indirect()
    }
}

impl<T: Indirect + ?Sized> Indirect for &mut T {
    type Base = T::Base;

    fn indirect(&self) -> Option<&Self::Base> {
        (**self).indirect()
    }
}

impl<T: Indirect + ?Sized> Indirect for Box<T> {
    type Base = T::Base;

    fn indirect(&self) -> Option<&Self::Base> {
        (**self).indirect()
    }
}

impl<T: Indirect + ?Sized> Indirect for Rc<T> {
    type Base = T::Base;

    fn indirect(&self) -> Option<&Self::Base> {
        (**self).indirect()
    }
}

impl<T: Indirect + ?Sized> Indirect for Arc<T> {
    type Base = T::Base;

    fn indirect(&self) -> Option<&Self::Base> {
        (**self).indirect()
    }
}

impl<T: Indirect> Indirect for Option<T> {
    type Base = T::Base;

    fn indirect(&self) -> Option<&Self::Base> {
        self.as_ref()?.indirect()
    }
}
