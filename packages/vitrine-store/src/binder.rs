use crate::state::{Field, ProductState};
use vitrine_reactive::{ChangeHub, SubscriberId};

/// Owns the [`ProductState`] and exposes the two user-invocable actions.
///
/// The display layer reads fields through [`state`](Self::state), dispatches
/// actions, and receives a [`Field`] token per mutation through its
/// subscription. Mutation happens only here, synchronously, on the
/// dispatching context.
pub struct ViewModelBinder {
    state: ProductState,
    hub: ChangeHub<Field>,
}

impl ViewModelBinder {
    pub fn new(state: ProductState) -> Self {
        Self {
            state,
            hub: ChangeHub::new(),
        }
    }

    pub fn state(&self) -> &ProductState {
        &self.state
    }

    /// Register a display-layer callback; it runs synchronously after every
    /// mutation, receiving the token of the field that changed.
    pub fn subscribe<F>(&self, callback: F) -> SubscriberId
    where
        F: Fn(Field) + 'static,
    {
        self.hub.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.hub.unsubscribe(id)
    }

    /// Run several actions with notification deferred to the end of the
    /// scope; duplicate field tokens are coalesced.
    pub fn batch<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.hub.enter_batch();
        let result = f(self);
        self.hub.exit_batch();
        result
    }

    /// Increments the cart count by one. Never fails, never decrements, and
    /// deliberately leaves `inventory` untouched, so the cart count may
    /// exceed inventory.
    pub fn add_to_cart(&mut self) {
        self.state.cart += 1;
        tracing::debug!(cart = self.state.cart, "add_to_cart");
        self.hub.publish(Field::Cart);
    }

    /// Sets the display image unconditionally. The value is expected to
    /// match one variant's image, but this is advisory only: an arbitrary
    /// string is accepted and desynchronizes `image` from `variants`. A
    /// mismatch is logged, never surfaced to the caller.
    pub fn update_product(&mut self, variant_image: &str) {
        if !self
            .state
            .variants
            .iter()
            .any(|variant| variant.image == variant_image)
        {
            tracing::warn!(image = variant_image, "image matches no variant");
        }
        self.state.image = variant_image.to_string();
        tracing::debug!(image = variant_image, "update_product");
        self.hub.publish(Field::Image);
    }
}
