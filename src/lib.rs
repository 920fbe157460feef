pub mod moderation;

pub use moderation::access_token::AccessToken;
pub use moderation::image::{ModerationResult, Upload};
pub use moderation::{Client, Config, Error};
