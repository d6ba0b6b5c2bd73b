pub mod aspa;
pub mod cli;
pub mod common;
pub mod constants;
pub mod error;
pub mod output;
pub mod path;
pub mod process;
pub mod verify;
