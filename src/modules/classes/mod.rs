pub mod controller;
pub mod crud;
pub mod interface;
pub mod memory;
pub mod model;
pub mod routes;
pub mod schema;

pub use routes::class_routes;
