//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod flow;
pub mod ownership;
pub mod password;
pub mod profile;
pub mod session;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod token;
pub mod update_profile;

// Re-exports
pub use config::AuthConfig;
pub use flow::AuthFlow;
pub use ownership::{Action, Authorization, Denial, Owned, OwnershipGuard};
pub use password::{PasswordService, Verification};
pub use profile::ProfileUseCase;
pub use session::SessionContext;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpUseCase};
pub use token::{SessionToken, TokenClaims, TokenError, TokenService};
pub use update_profile::{UpdateProfileInput, UpdateProfileOutput, UpdateProfileUseCase};
