//! Domain models for the EnvanterX client

mod movement;
mod partner;
mod product;
mod stock;

pub use movement::*;
pub use partner::*;
pub use product::*;
pub use stock::*;
