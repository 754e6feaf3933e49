pub mod cli;
pub mod fetch;
pub mod logging;
pub mod pipeline;
pub mod process;
pub mod write;
