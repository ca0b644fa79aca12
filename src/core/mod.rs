mod value;
pub use value::*;

mod property_key;
pub use property_key::*;

mod number;
pub use number::*;

mod bindings;
pub use bindings::*;

mod interop;
pub use interop::*;

mod delete;
pub use delete::*;
