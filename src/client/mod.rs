pub mod cart_client;

pub use cart_client::*;
