/// Builds a document [`Value`](crate::Value) from a JSON-like literal.
///
/// Object keys keep the order they are written in.
///
/// ```rust
/// use save_tree::{tree_value, Value};
///
/// let node = tree_value!({
///     "name": "Player",
///     "fields": [{ "i32": 100 }, { "str": "hero" }],
///     "children": []
/// });
/// assert_eq!(node.as_object().unwrap().len(), 3);
/// ```
#[macro_export]
macro_rules! tree_value {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::tree_value!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::Map::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Map::new();
        $(
            object.insert($key.to_string(), $crate::tree_value!($value));
        )*
        $crate::Value::Object(object)
    }};

    // Any other expression goes through `From`
    ($s:expr) => {
        $crate::Value::from($s)
    };
}
