//! Storage keys
//!
//! One JSON document per key. The names match the layout existing data
//! files already use.

/// Registered users
pub const USERS: &str = "users";

/// Public listing catalog
pub const ACCOUNTS: &str = "accounts";

/// Admin tracking collection of seller submissions
pub const SELLER_ACCOUNTS: &str = "sellerAccounts";

pub const CHATS: &str = "chats";

pub const MESSAGES: &str = "messages";

/// Signed-in session
pub const SESSION: &str = "user";

/// Outstanding verification challenge
pub const PENDING_OTP: &str = "pendingOTP";

/// Every key the store manages
pub const ALL: [&str; 7] = [
    USERS,
    ACCOUNTS,
    SELLER_ACCOUNTS,
    CHATS,
    MESSAGES,
    SESSION,
    PENDING_OTP,
];
