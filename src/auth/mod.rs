//! Authentication building blocks.
//!
//! - **`password`** - bcrypt hashing and verification
//! - **`validate`** - pure field validation with field-keyed error lists
//! - **`transport`** - AES-256-CBC obfuscation of the password in transit
//! - **`token`** - signed session token codec
//! - **`session`** - cookie-backed session store
//! - **`state`** - runtime configuration shared by the handlers

pub mod password;
pub mod session;
pub mod state;
pub mod token;
pub mod transport;
pub mod validate;

pub use state::AuthConfig;
pub use validate::{FieldErrors, PasswordPolicy};
