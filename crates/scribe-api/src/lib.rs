pub mod chain;
pub mod config;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod role;
pub mod routes;
pub mod server;
pub mod state;

pub use chain::{run_chain, ChainOutcome};
pub use role::Role;
pub use server::{build_router, serve};
