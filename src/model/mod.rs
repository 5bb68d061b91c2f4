pub mod candidate;
pub mod dump;
pub mod election;
pub mod region;
pub mod tally;
pub mod validator;
pub mod voter;
