mod crypto;
mod extractor;
mod token;

pub use crypto::{hash_password, verify_password};
pub use extractor::AuthUser;
pub use token::{Claims, TokenService, TOKEN_TTL_DAYS};
