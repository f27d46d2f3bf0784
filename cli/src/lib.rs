//! Terminal host for `product-core`.
//!
//! Performs the HTTP round-trips with ureq, prints the product list to
//! stdout, and reads commands and prompt answers from stdin.

pub mod config;
pub mod input;
pub mod session;
pub mod terminal;
pub mod transport;

pub use config::Args;
pub use session::{run, TerminalClient};
pub use terminal::{Console, TerminalView};
pub use transport::UreqTransport;
