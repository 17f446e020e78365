//! End-user use cases

pub mod authenticate;
pub mod me;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

pub use authenticate::AuthenticateUserUseCase;
pub use me::{UserMeOutput, UserMeUseCase};
pub use sign_in::{UserSignInOutput, UserSignInUseCase};
pub use sign_out::UserSignOutUseCase;
pub use sign_up::{SignUpOutput, SignUpUseCase};
