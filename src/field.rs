//! Field values stored in a node's slots.
//!
//! A [`Field`] is one positional value written by a Saveable. The set of kinds is
//! closed; the tree formatter checks the kind of a slot when it is read back.

use crate::{Error, Map, Number, Result, Value};
use serde::{Deserialize, Serialize};

/// A 3-component vector, typically a position or scale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vector3 { x, y, z }
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Vector3 { x, y, z }
    }
}

impl From<Vector3> for [f32; 3] {
    fn from(v: Vector3) -> Self {
        [v.x, v.y, v.z]
    }
}

/// A rotation stored as its four components.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Quaternion {
    pub const IDENTITY: Quaternion = Quaternion::new(0.0, 0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Quaternion { x, y, z, w }
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Quaternion::IDENTITY
    }
}

impl From<[f32; 4]> for Quaternion {
    fn from([x, y, z, w]: [f32; 4]) -> Self {
        Quaternion { x, y, z, w }
    }
}

impl From<Quaternion> for [f32; 4] {
    fn from(q: Quaternion) -> Self {
        [q.x, q.y, q.z, q.w]
    }
}

/// One field slot of a [`Node`](crate::Node).
///
/// # Examples
///
/// ```rust
/// use save_tree::{Field, Vector3};
///
/// let health = Field::from(100);
/// assert_eq!(health.kind(), "i32");
/// assert_eq!(health.as_i32(), Some(100));
/// assert_eq!(health.as_f32(), None);
///
/// let pos = Field::from(Vector3::new(1.0, 2.0, 3.0));
/// assert_eq!(pos.kind(), "vec3");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Field {
    Int(i32),
    UInt(u32),
    Long(i64),
    Byte(u8),
    Bool(bool),
    Float(f32),
    String(String),
    Vector3(Vector3),
    Quaternion(Quaternion),
    IntArray(Vec<i32>),
}

impl Field {
    /// The tag naming this kind in documents and error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Field::Int(_) => "i32",
            Field::UInt(_) => "u32",
            Field::Long(_) => "i64",
            Field::Byte(_) => "u8",
            Field::Bool(_) => "bool",
            Field::Float(_) => "f32",
            Field::String(_) => "str",
            Field::Vector3(_) => "vec3",
            Field::Quaternion(_) => "quat",
            Field::IntArray(_) => "ints",
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Field::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Field::UInt(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Field::Long(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_u8(&self) -> Option<u8> {
        match self {
            Field::Byte(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Field::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Field::Float(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::String(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_vector3(&self) -> Option<Vector3> {
        match self {
            Field::Vector3(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_quaternion(&self) -> Option<Quaternion> {
        match self {
            Field::Quaternion(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i32_array(&self) -> Option<&[i32]> {
        match self {
            Field::IntArray(v) => Some(v),
            _ => None,
        }
    }

    /// Converts this field to a single-entry object `{ tag: payload }`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let payload = match self {
            Field::Int(v) => Value::from(*v),
            Field::UInt(v) => Value::from(*v),
            Field::Long(v) => Value::from(*v),
            Field::Byte(v) => Value::from(*v),
            Field::Bool(v) => Value::from(*v),
            Field::Float(v) => float_value(*v),
            Field::String(v) => Value::from(v.as_str()),
            Field::Vector3(v) => {
                Value::Array(<[f32; 3]>::from(*v).into_iter().map(float_value).collect())
            }
            Field::Quaternion(q) => {
                Value::Array(<[f32; 4]>::from(*q).into_iter().map(float_value).collect())
            }
            Field::IntArray(v) => Value::Array(v.iter().copied().map(Value::from).collect()),
        };

        let mut map = Map::with_capacity(1);
        map.insert(self.kind().to_string(), payload);
        Value::Object(map)
    }

    /// Reads a field back from its `{ tag: payload }` object.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value.as_object().ok_or_else(|| {
            Error::invalid_document(format!(
                "field must be an object, found {}",
                value.kind()
            ))
        })?;
        if map.len() != 1 {
            return Err(Error::invalid_document(format!(
                "field must have exactly one tag, found {}",
                map.len()
            )));
        }
        let (tag, payload) = match map.iter().next() {
            Some(entry) => entry,
            None => return Err(Error::invalid_document("field has no tag")),
        };

        let field = match tag.as_str() {
            "i32" => Field::Int(integer(tag, payload)?),
            "u32" => Field::UInt(integer(tag, payload)?),
            "i64" => Field::Long(integer(tag, payload)?),
            "u8" => Field::Byte(integer(tag, payload)?),
            "bool" => Field::Bool(
                payload
                    .as_bool()
                    .ok_or_else(|| payload_error(tag, "a boolean", payload))?,
            ),
            "f32" => Field::Float(float(tag, payload)?),
            "str" => Field::String(
                payload
                    .as_str()
                    .ok_or_else(|| payload_error(tag, "a string", payload))?
                    .to_string(),
            ),
            "vec3" => Field::Vector3(Vector3::from(floats::<3>(tag, payload)?)),
            "quat" => Field::Quaternion(Quaternion::from(floats::<4>(tag, payload)?)),
            "ints" => {
                let items = payload
                    .as_array()
                    .ok_or_else(|| payload_error(tag, "an array", payload))?;
                Field::IntArray(
                    items
                        .iter()
                        .map(|item| integer(tag, item))
                        .collect::<Result<_>>()?,
                )
            }
            other => return Err(Error::invalid_document(format!("unknown field tag '{}'", other))),
        };
        Ok(field)
    }
}

fn float_value(v: f32) -> Value {
    Value::Number(Number::from_f64(f64::from(v)))
}

fn payload_error(tag: &str, expected: &str, found: &Value) -> Error {
    Error::invalid_document(format!(
        "field '{}' expects {}, found {}",
        tag,
        expected,
        found.kind()
    ))
}

fn integer<T: TryFrom<i64>>(tag: &str, payload: &Value) -> Result<T> {
    let raw = payload
        .as_i64()
        .ok_or_else(|| payload_error(tag, "an integer", payload))?;
    T::try_from(raw).map_err(|_| {
        Error::invalid_document(format!("{} is out of range for field '{}'", raw, tag))
    })
}

fn float(tag: &str, payload: &Value) -> Result<f32> {
    payload
        .as_f64()
        .map(|f| f as f32)
        .ok_or_else(|| payload_error(tag, "a number", payload))
}

fn floats<const N: usize>(tag: &str, payload: &Value) -> Result<[f32; N]> {
    let items = payload
        .as_array()
        .filter(|items| items.len() == N)
        .ok_or_else(|| payload_error(tag, &format!("{} numbers", N), payload))?;
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = float(tag, item)?;
    }
    Ok(out)
}

macro_rules! impl_from_field {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Field {
                fn from(v: $ty) -> Self {
                    Field::$variant(v)
                }
            }
        )*
    };
}

impl_from_field!(
    i32 => Int,
    u32 => UInt,
    i64 => Long,
    u8 => Byte,
    bool => Bool,
    f32 => Float,
    String => String,
    Vector3 => Vector3,
    Quaternion => Quaternion,
    Vec<i32> => IntArray,
);

impl From<&str> for Field {
    fn from(v: &str) -> Self {
        Field::String(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree_value;

    #[test]
    fn test_field_value_shape() {
        assert_eq!(Field::Int(-4).to_value(), tree_value!({ "i32": (-4) }));
        assert_eq!(
            Field::Vector3(Vector3::new(1.0, 0.5, -2.0)).to_value(),
            tree_value!({ "vec3": [1.0, 0.5, (-2.0)] })
        );
        assert_eq!(
            Field::IntArray(vec![]).to_value(),
            tree_value!({ "ints": [] })
        );
    }

    #[test]
    fn test_float_survives_widening() {
        let original = Field::Float(0.1);
        let back = Field::from_value(&original.to_value()).unwrap();
        assert_eq!(back, original);

        let nan = Field::from_value(&Field::Float(f32::NAN).to_value()).unwrap();
        assert!(nan.as_f32().unwrap().is_nan());
    }

    #[test]
    fn test_rejects_bad_fields() {
        let cases = [
            tree_value!({ "i16": 1 }),
            tree_value!({ "u8": 256 }),
            tree_value!({ "u32": (-1) }),
            tree_value!({ "vec3": [1.0, 2.0] }),
            tree_value!({ "bool": "yes" }),
            tree_value!({ "i32": 1, "u8": 2 }),
            tree_value!([1]),
        ];
        for case in &cases {
            assert!(
                matches!(Field::from_value(case), Err(Error::InvalidDocument(_))),
                "accepted {:?}",
                case
            );
        }
    }

    #[test]
    fn test_accessors_are_strict() {
        let field = Field::Byte(7);
        assert_eq!(field.as_u8(), Some(7));
        assert_eq!(field.as_i32(), None);
        assert_eq!(Field::from("a").as_str(), Some("a"));
    }
}
