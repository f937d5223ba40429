//! Pure processing stages of the review bot: status translation, response
//! validation and duplicate-failure suppression. Nothing here performs I/O.

pub mod dedup;
pub mod validator;
pub mod verdict;
