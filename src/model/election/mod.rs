mod receipt;
mod session;

pub use receipt::{RegistrationError, VoteError, VoteReceipt};
pub use session::ElectionSession;
