pub mod context;
pub mod infrastructure;
pub mod ports;
pub mod postgres;
