//! Password hashing and token implementations.

pub mod password;
pub mod token;

pub use password::BcryptPasswordHasher;
pub use token::JwtTokenService;
