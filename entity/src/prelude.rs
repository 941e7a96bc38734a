pub use super::build::Entity as Build;
pub use super::clearance_token::Entity as ClearanceToken;
pub use super::halo_xsts_token::Entity as HaloXstsToken;
pub use super::oauth_token::Entity as OAuthToken;
pub use super::spartan_token::Entity as SpartanToken;
pub use super::user_token::Entity as UserToken;
pub use super::xsts_token::Entity as XstsToken;
