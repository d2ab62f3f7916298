pub mod check;
pub mod tokens;
