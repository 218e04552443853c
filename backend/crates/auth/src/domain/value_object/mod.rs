//! Value Object Module

pub mod confirmation_code;
pub mod email;
pub mod user_id;
pub mod user_role;
pub mod username;

pub use confirmation_code::ConfirmationCode;
pub use email::Email;
pub use user_id::UserId;
pub use user_role::UserRole;
pub use username::Username;
