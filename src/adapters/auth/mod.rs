//! Authentication adapters.
//!
//! Implementations of the `TokenValidator` port:
//!
//! - `jwt` - HS256 JWT validation with audience/issuer/expiry checks
//! - `mock` - Test implementation that doesn't require real tokens

mod jwt;
mod mock;

pub use jwt::JwtTokenValidator;
pub use mock::MockTokenValidator;
