pub mod auth;
pub mod customer;
pub mod discord;
pub mod sheet;
pub mod tagmango;

mod router;
pub use router::get_router;
