// Authentication: password hashing, bearer tokens, and the register/login API.
// Every protected handler takes an `AuthUser`, which is resolved from the
// `Authorization: Bearer <jwt>` header.

pub mod extractor;
pub mod handlers;
pub mod password;
pub mod token;

pub use extractor::AuthUser;
pub use token::TokenService;
