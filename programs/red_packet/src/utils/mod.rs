pub mod account;
pub mod token;

pub use account::*;
pub use token::*;
