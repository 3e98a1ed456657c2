//! The encoding side of the persistence contract.

use crate::{Error, Primitive, Quaternion, Result, Saveable, Vector3};

/// Reads and writes fields and nested objects over one encoding.
///
/// Each `write_*` call produces one logical field and each `read_*` call consumes
/// one, in call order. Flat formatters map a field to the next unit of their
/// stream; the tree formatter maps it to the next slot of the current node.
///
/// [`save`](Formatter::save) and [`load`](Formatter::load) are the recursion point
/// for nested objects. Collection helpers write a count field followed by one
/// nested save per element, so they work the same on every formatter.
pub trait Formatter: Sized {
    fn write_i32(&mut self, value: i32) -> Result<()>;
    fn write_u32(&mut self, value: u32) -> Result<()>;
    fn write_i64(&mut self, value: i64) -> Result<()>;
    fn write_u8(&mut self, value: u8) -> Result<()>;
    fn write_bool(&mut self, value: bool) -> Result<()>;
    fn write_f32(&mut self, value: f32) -> Result<()>;
    fn write_str(&mut self, value: &str) -> Result<()>;
    fn write_vector3(&mut self, value: Vector3) -> Result<()>;
    fn write_quaternion(&mut self, value: Quaternion) -> Result<()>;
    fn write_i32_array(&mut self, value: &[i32]) -> Result<()>;

    fn read_i32(&mut self) -> Result<i32>;
    fn read_u32(&mut self) -> Result<u32>;
    fn read_i64(&mut self) -> Result<i64>;
    fn read_u8(&mut self) -> Result<u8>;
    fn read_bool(&mut self) -> Result<bool>;
    fn read_f32(&mut self) -> Result<f32>;
    fn read_string(&mut self) -> Result<String>;
    fn read_vector3(&mut self) -> Result<Vector3>;
    fn read_quaternion(&mut self) -> Result<Quaternion>;
    fn read_i32_array(&mut self) -> Result<Vec<i32>>;

    /// Saves a nested object.
    fn save<S: Saveable>(&mut self, child: &S) -> Result<()>;

    /// Loads a nested object saved by the matching [`save`](Formatter::save).
    fn load<S: Saveable>(&mut self, child: &mut S) -> Result<()>;

    #[inline]
    fn write<T: Primitive>(&mut self, value: &T) -> Result<()> {
        value.write_to(self)
    }

    #[inline]
    fn read<T: Primitive>(&mut self) -> Result<T> {
        T::read_from(self)
    }

    /// Reads the next field straight into `slot`. `slot` is left alone on error.
    #[inline]
    fn read_into<T: Primitive>(&mut self, slot: &mut T) -> Result<()> {
        *slot = T::read_from(self)?;
        Ok(())
    }

    /// Writes `items.len()` followed by one nested save per item.
    fn save_seq<S: Saveable>(&mut self, items: &[S]) -> Result<()> {
        let count =
            i32::try_from(items.len()).map_err(|_| Error::InvalidLength(items.len() as i64))?;
        self.write_i32(count)?;
        for item in items {
            self.save(item)?;
        }
        Ok(())
    }

    /// Reads a count written by [`save_seq`](Formatter::save_seq), then loads that
    /// many elements built by `factory` and appends them to `items`.
    fn load_into<S, G>(&mut self, items: &mut Vec<S>, mut factory: G) -> Result<()>
    where
        S: Saveable,
        G: FnMut() -> S,
    {
        let count = self.read_count()?;
        for _ in 0..count {
            let mut item = factory();
            self.load(&mut item)?;
            items.push(item);
        }
        Ok(())
    }

    fn load_vec<S, G>(&mut self, factory: G) -> Result<Vec<S>>
    where
        S: Saveable,
        G: FnMut() -> S,
    {
        let mut items = Vec::new();
        self.load_into(&mut items, factory)?;
        Ok(items)
    }

    fn load_boxed<S, G>(&mut self, factory: G) -> Result<Box<[S]>>
    where
        S: Saveable,
        G: FnMut() -> S,
    {
        Ok(self.load_vec(factory)?.into_boxed_slice())
    }

    /// Loads a fixed-size array. The saved count must be exactly `N`.
    fn load_array<S, G, const N: usize>(&mut self, mut factory: G) -> Result<[S; N]>
    where
        S: Saveable,
        G: FnMut() -> S,
    {
        let count = self.read_count()?;
        if count != N {
            return Err(Error::LengthMismatch {
                expected: N,
                found: count,
            });
        }
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            let mut item = factory();
            self.load(&mut item)?;
            items.push(item);
        }
        <[S; N]>::try_from(items).map_err(|items| Error::LengthMismatch {
            expected: N,
            found: items.len(),
        })
    }

    /// Reads a collection count, rejecting negative values.
    fn read_count(&mut self) -> Result<usize> {
        let count = self.read_i32()?;
        usize::try_from(count).map_err(|_| Error::InvalidLength(i64::from(count)))
    }
}
