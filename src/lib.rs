pub mod editor;
pub mod engine;
pub mod example;
pub mod list_nodes;
pub mod model;
pub mod schema;
pub mod validate;

#[cfg(feature = "full")]
pub mod api;
#[cfg(feature = "full")]
pub mod config;
#[cfg(feature = "full")]
pub mod jupiter;
#[cfg(feature = "full")]
pub mod run;
#[cfg(feature = "full")]
pub mod signer;
#[cfg(feature = "full")]
pub mod sim;
#[cfg(feature = "full")]
pub mod store;
#[cfg(feature = "full")]
pub mod wallet;

#[cfg(feature = "wasm")]
pub mod wasm;
