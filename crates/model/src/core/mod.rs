pub mod expr;
pub mod ident;
pub mod value;
