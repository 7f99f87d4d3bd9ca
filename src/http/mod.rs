pub mod random_headers;
pub mod retry_middleware;
pub mod user_agent_middleware;
