//! One module per subcommand, each exposing an `execute` function.

pub mod check;
pub mod completions;
pub mod load;
pub mod save;
pub mod sign;
pub mod verify;
pub mod version;
