pub mod builtin;
pub mod parameter;
pub mod shape;

pub use builtin::{BUILTIN_NAMESPACE, BuiltinBase, BuiltinType};
pub use parameter::*;
pub use shape::*;
