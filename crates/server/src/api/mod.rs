pub mod articles;
pub mod handlers;
pub mod maintenance;
pub mod middleware;
pub mod notify;
pub mod publish;
pub mod rewrite;
pub mod routes;

pub use routes::create_router;
