//! Identifier types shared by every crate in the workspace.

mod ids;
mod transaction_id;

pub use ids::{UserId, Username};
pub use transaction_id::{TRANSACTION_ID_ALPHABET, TRANSACTION_ID_LEN, TransactionId};
