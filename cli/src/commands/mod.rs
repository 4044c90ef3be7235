//! CLI commands for the akshara tokenizer.

pub mod encode;
pub mod session;
pub mod train;

pub use encode::EncodeCommand;
pub use session::SessionCommand;
pub use train::TrainCommand;
