//! The contract domain objects implement to be persisted.

use crate::{Formatter, Quaternion, Result, Vector3};
use std::borrow::Cow;

/// An object that can write itself to, and populate itself from, any
/// [`Formatter`].
///
/// `load` must read exactly what `save` wrote, in the same order. Nested objects
/// go through [`Formatter::save`] and [`Formatter::load`] rather than calling
/// their own `save`/`load` directly, so that hierarchical formatters open a new
/// node for them.
///
/// # Examples
///
/// ```rust
/// use save_tree::{Formatter, Result, Saveable, Vector3};
///
/// #[derive(Default)]
/// struct Transform {
///     position: Vector3,
/// }
///
/// #[derive(Default)]
/// struct Player {
///     name: String,
///     health: i32,
///     transform: Transform,
/// }
///
/// impl Saveable for Transform {
///     fn save<F: Formatter>(&self, f: &mut F) -> Result<()> {
///         f.write_vector3(self.position)
///     }
///
///     fn load<F: Formatter>(&mut self, f: &mut F) -> Result<()> {
///         self.position = f.read_vector3()?;
///         Ok(())
///     }
/// }
///
/// impl Saveable for Player {
///     fn save<F: Formatter>(&self, f: &mut F) -> Result<()> {
///         f.write_str(&self.name)?;
///         f.write_i32(self.health)?;
///         f.save(&self.transform)
///     }
///
///     fn load<F: Formatter>(&mut self, f: &mut F) -> Result<()> {
///         f.read_into(&mut self.name)?;
///         f.read_into(&mut self.health)?;
///         f.load(&mut self.transform)
///     }
/// }
///
/// let player = Player {
///     name: "hero".into(),
///     health: 90,
///     transform: Transform { position: Vector3::new(1.0, 0.0, 4.0) },
/// };
/// let doc = save_tree::to_document(&player).unwrap();
/// assert_eq!(doc.children()[0].name(), "Transform");
///
/// let mut back = Player::default();
/// save_tree::from_document(doc, &mut back).unwrap();
/// assert_eq!(back.health, 90);
/// assert_eq!(back.transform.position, Vector3::new(1.0, 0.0, 4.0));
/// ```
pub trait Saveable {
    fn save<F: Formatter>(&self, formatter: &mut F) -> Result<()>;

    fn load<F: Formatter>(&mut self, formatter: &mut F) -> Result<()>;

    /// Name given to the node this object is saved into.
    ///
    /// Defaults to the short type name, without module path or generic arguments.
    /// Compound types such as tuples keep their full type name; override this
    /// to give them something shorter.
    fn node_name(&self) -> Cow<'static, str> {
        Cow::Borrowed(short_type_name(std::any::type_name::<Self>()))
    }
}

impl<T: Saveable> Saveable for Box<T> {
    fn save<F: Formatter>(&self, formatter: &mut F) -> Result<()> {
        (**self).save(formatter)
    }

    fn load<F: Formatter>(&mut self, formatter: &mut F) -> Result<()> {
        (**self).load(formatter)
    }

    fn node_name(&self) -> Cow<'static, str> {
        (**self).node_name()
    }
}

/// `my_game::world::Chunk<u8>` becomes `Chunk`.
///
/// Tuples, arrays, slices, references and pointers have no single path to
/// shorten and keep their full name.
pub(crate) fn short_type_name(full: &'static str) -> &'static str {
    if full.starts_with(['(', '[', '&', '*']) {
        return full;
    }
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

/// A value that maps onto exactly one field of a [`Formatter`].
///
/// This is what lets [`Formatter::write`], [`Formatter::read`] and
/// [`Formatter::read_into`] work generically over every field kind.
pub trait Primitive: Sized {
    fn write_to<F: Formatter>(&self, formatter: &mut F) -> Result<()>;

    fn read_from<F: Formatter>(formatter: &mut F) -> Result<Self>;
}

macro_rules! impl_primitive_copy {
    ($($ty:ty => $write:ident, $read:ident;)*) => {
        $(
            impl Primitive for $ty {
                #[inline]
                fn write_to<F: Formatter>(&self, formatter: &mut F) -> Result<()> {
                    formatter.$write(*self)
                }

                #[inline]
                fn read_from<F: Formatter>(formatter: &mut F) -> Result<Self> {
                    formatter.$read()
                }
            }
        )*
    };
}

impl_primitive_copy! {
    i32 => write_i32, read_i32;
    u32 => write_u32, read_u32;
    i64 => write_i64, read_i64;
    u8 => write_u8, read_u8;
    bool => write_bool, read_bool;
    f32 => write_f32, read_f32;
    Vector3 => write_vector3, read_vector3;
    Quaternion => write_quaternion, read_quaternion;
}

impl Primitive for String {
    fn write_to<F: Formatter>(&self, formatter: &mut F) -> Result<()> {
        formatter.write_str(self)
    }

    fn read_from<F: Formatter>(formatter: &mut F) -> Result<Self> {
        formatter.read_string()
    }
}

impl Primitive for Vec<i32> {
    fn write_to<F: Formatter>(&self, formatter: &mut F) -> Result<()> {
        formatter.write_i32_array(self)
    }

    fn read_from<F: Formatter>(formatter: &mut F) -> Result<Self> {
        formatter.read_i32_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Plain;
    struct Generic<T>(T);

    impl Saveable for Plain {
        fn save<F: Formatter>(&self, _: &mut F) -> Result<()> {
            Ok(())
        }

        fn load<F: Formatter>(&mut self, _: &mut F) -> Result<()> {
            Ok(())
        }
    }

    impl<T> Saveable for Generic<T> {
        fn save<F: Formatter>(&self, _: &mut F) -> Result<()> {
            Ok(())
        }

        fn load<F: Formatter>(&mut self, _: &mut F) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("a::b::Chunk<c::D>"), "Chunk");
        assert_eq!(short_type_name("Plain"), "Plain");
        assert_eq!(Plain.node_name(), "Plain");
        assert_eq!(Generic(Vec::<u8>::new()).node_name(), "Generic");
        assert_eq!(Box::new(Plain).node_name(), "Plain");
    }

    #[test]
    fn test_compound_type_names_are_kept() {
        assert_eq!(short_type_name("(a::A, b::B)"), "(a::A, b::B)");
        assert_eq!(short_type_name("[a::A; 2]"), "[a::A; 2]");
        assert_eq!(short_type_name("&a::A"), "&a::A");
        assert_eq!(short_type_name("*const a::A"), "*const a::A");
    }
}
