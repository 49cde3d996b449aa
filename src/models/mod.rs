pub mod claim;
pub mod item;
pub mod session;

pub use claim::{Claim, ClaimLine};
pub use item::{format_money, Image, ImageStatus, Item};
pub use session::UploadSessionResponse;
