//! Core protocol types.

mod announcement;
mod request;
mod stealth_id;
mod withdrawal;

pub use announcement::Announcement;
pub use request::{BridgePrefs, BridgeProtocol, ReceivePrefs, Scene, TokenInfo, TransferRequest};
pub use stealth_id::StealthId;
pub use withdrawal::WithdrawalRequest;
