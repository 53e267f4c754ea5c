pub mod binder;
pub mod state;

pub use binder::ViewModelBinder;
pub use state::{Availability, Field, ProductState, ProductStateBuilder, StateError, Variant};
pub use vitrine_reactive::SubscriberId;
