pub mod hub;
pub mod queue;

pub use hub::{ChangeHub, SubscriberId};
pub use queue::EventQueue;
