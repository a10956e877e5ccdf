pub mod jupiter;
pub mod preview;
pub mod quote;
pub mod simulate;
pub mod templates;
pub mod validate;
pub mod wallet;
pub mod workflows;
