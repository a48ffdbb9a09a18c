/// Maps a type keyword to a [`ValueType`](crate::ValueType).
///
/// ```rust
/// use tiddlywinks::{ValueType, tw_type};
///
/// assert_eq!(tw_type!(integer), ValueType::Integer);
/// assert_eq!(tw_type!(any), ValueType::Any);
/// ```
#[macro_export]
macro_rules! tw_type {
    (boolean) => {
        $crate::ValueType::Boolean
    };
    (integer) => {
        $crate::ValueType::Integer
    };
    (number) => {
        $crate::ValueType::Number
    };
    (string) => {
        $crate::ValueType::String
    };
    (any) => {
        $crate::ValueType::Any
    };
    ($other:ident) => {
        compile_error!("unsupported type keyword: use boolean, integer, number, string, or any")
    };
}

/// Declares a single [`Field`](crate::Field) from `name: type` shorthand,
/// with an optional default and description.
///
/// ```rust
/// use tiddlywinks::tw_field;
///
/// let x = tw_field!(x: integer, "The first number");
/// assert_eq!(x.name(), "x");
/// assert!(x.is_required());
///
/// let y = tw_field!(y: integer = 2);
/// assert!(!y.is_required());
/// ```
#[macro_export]
macro_rules! tw_field {
    ($name:ident : $ty:ident) => {
        $crate::Field::new(stringify!($name), $crate::tw_type!($ty))
    };
    ($name:ident : $ty:ident, $description:expr $(,)?) => {
        $crate::Field::new(stringify!($name), $crate::tw_type!($ty)).description($description)
    };
    ($name:ident : $ty:ident = $default:expr) => {
        $crate::Field::new(stringify!($name), $crate::tw_type!($ty))
            .default_value($crate::serde_json::json!($default))
    };
    ($name:ident : $ty:ident = $default:expr, $description:expr $(,)?) => {
        $crate::Field::new(stringify!($name), $crate::tw_type!($ty))
            .default_value($crate::serde_json::json!($default))
            .description($description)
    };
}

/// Declares a `Vec<Field>` from `name: type` pairs.
///
/// ```rust
/// use tiddlywinks::tw_params;
///
/// let params = tw_params![x: integer, label: string];
/// assert_eq!(params.len(), 2);
/// assert_eq!(params[1].name(), "label");
/// ```
#[macro_export]
macro_rules! tw_params {
    () => {
        Vec::<$crate::Field>::new()
    };
    ($($name:ident : $ty:ident),+ $(,)?) => {
        vec![$($crate::tw_field!($name : $ty)),+]
    };
}
