//! Data models for the study catalog.
//!
//! Notes, previous-year papers, question banks and purchases as returned by
//! the backend, plus the user profile.

pub mod note;
pub mod purchase;
pub mod pyq;
pub mod question_bank;
pub mod user_info;
mod wire;

pub use note::Note;
pub use purchase::{format_purchase_date, Purchase, PurchasedNote};
pub use pyq::Pyq;
pub use question_bank::QuestionBank;
pub use user_info::UserInfo;
