//! Authentication: password credentials, bearer tokens, login.

mod authenticator;
mod credentials;
mod handlers;
mod jwt;
pub mod password;

pub use authenticator::{AuthMethod, Authenticator};
pub use credentials::{CredentialCheck, CredentialVerifier, Rejection};
pub use handlers::{login, LoginRequest, LoginResponse};
pub use jwt::{Claims, Subject, TokenError, TokenService, TOKEN_TTL_DAYS};
