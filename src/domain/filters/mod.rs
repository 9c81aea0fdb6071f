//! Filter system deciding which records survive.

mod chain;
mod filter_trait;
mod request_filter;
mod status_filter;
mod user_agent_filter;
mod window_filter;

pub use chain::FilterChain;
pub use filter_trait::Filter;
pub use request_filter::RequestFilter;
pub use status_filter::StatusFilter;
pub use user_agent_filter::UserAgentFilter;
pub use window_filter::WindowFilter;
