// Authentication: password hashing, signed session tokens carried in the
// `rr_token` cookie, and the `AuthUser` extractor that gates handlers by role.

pub mod cookie;
pub mod extractor;
pub mod handlers;
pub mod password;
pub mod token;

pub use extractor::AuthUser;
