pub mod jwt;
pub mod money;
pub mod pagination;
pub mod validation;

pub use jwt::*;
pub use money::{format_cents, parse_cents};
pub use pagination::*;
pub use validation::*;
