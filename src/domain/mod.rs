pub mod client;
pub mod common;
pub mod invoice;
pub mod revenue;

pub use client::Client;
pub use common::{Displayable, Identifiable};
pub use invoice::Invoice;
pub use revenue::Revenue;
