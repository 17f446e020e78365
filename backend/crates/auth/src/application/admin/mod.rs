//! Admin use cases

pub mod authenticate;
pub mod me;
pub mod sign_in;
pub mod sign_out;

pub use authenticate::AuthenticateAdminUseCase;
pub use me::{AdminMeOutput, AdminMeUseCase};
pub use sign_in::{AdminSignInOutput, AdminSignInUseCase};
pub use sign_out::AdminSignOutUseCase;
