pub mod quote_worker;

pub use quote_worker::run as run_quote_worker;
