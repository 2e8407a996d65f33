pub mod compare;
pub mod row;

pub use compare::*;
pub use row::*;
