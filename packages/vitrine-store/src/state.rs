use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

/// One token per ProductState field, published to subscribers when the
/// field is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Product,
    Image,
    AltText,
    Link,
    InStock,
    Inventory,
    OnSale,
    Details,
    Variants,
    Cart,
}

/// Derived stock status for conditional rendering: in stock above ten
/// units, almost sold out at ten or fewer, otherwise out of stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    InStock,
    LowStock,
    OutOfStock,
}

/// One selectable configuration of the product, with its own display image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub variant_id: u32,
    pub color: String,
    pub image: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("product must declare at least one variant")]
    NoVariants,
    #[error("duplicate variant id {0}")]
    DuplicateVariantId(u32),
}

/// The view-model record bound to the display layer.
///
/// Constructed once per session through [`ProductStateBuilder`], mutated
/// only via the binder's actions, dropped with the session. Fields are read
/// through accessors; the display layer never writes them directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductState {
    pub(crate) product: String,
    pub(crate) image: String,
    pub(crate) alt_text: String,
    pub(crate) link: String,
    pub(crate) in_stock: bool,
    pub(crate) inventory: u32,
    pub(crate) on_sale: bool,
    pub(crate) details: Vec<String>,
    pub(crate) variants: SmallVec<[Variant; 2]>,
    pub(crate) cart: u32,
}

impl ProductState {
    pub fn builder() -> ProductStateBuilder {
        ProductStateBuilder::default()
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    /// The image currently on display. Guaranteed to match a variant image
    /// only as long as callers pass valid values to `update_product`.
    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn alt_text(&self) -> &str {
        &self.alt_text
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }

    pub fn inventory(&self) -> u32 {
        self.inventory
    }

    pub fn on_sale(&self) -> bool {
        self.on_sale
    }

    pub fn details(&self) -> &[String] {
        &self.details
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn cart(&self) -> u32 {
        self.cart
    }

    pub fn availability(&self) -> Availability {
        if !self.in_stock || self.inventory == 0 {
            Availability::OutOfStock
        } else if self.inventory <= 10 {
            Availability::LowStock
        } else {
            Availability::InStock
        }
    }

    pub fn sale_banner(&self) -> Option<&'static str> {
        self.on_sale.then_some("On Sale!")
    }
}

/// Builder for the initial state literal. The only validated invariants
/// live here: at least one variant, no duplicate variant ids.
#[derive(Debug, Default)]
pub struct ProductStateBuilder {
    product: String,
    image: Option<String>,
    alt_text: String,
    link: String,
    in_stock: bool,
    inventory: u32,
    on_sale: bool,
    details: Vec<String>,
    variants: SmallVec<[Variant; 2]>,
}

impl ProductStateBuilder {
    pub fn product(mut self, product: impl Into<String>) -> Self {
        self.product = product.into();
        self
    }

    pub fn image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn alt_text(mut self, alt_text: impl Into<String>) -> Self {
        self.alt_text = alt_text.into();
        self
    }

    pub fn link(mut self, link: impl Into<String>) -> Self {
        self.link = link.into();
        self
    }

    pub fn in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    pub fn inventory(mut self, inventory: u32) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn on_sale(mut self, on_sale: bool) -> Self {
        self.on_sale = on_sale;
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    pub fn variant(
        mut self,
        variant_id: u32,
        color: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        self.variants.push(Variant {
            variant_id,
            color: color.into(),
            image: image.into(),
        });
        self
    }

    /// When no explicit image was set, the first variant's image becomes the
    /// initial display image.
    pub fn build(self) -> Result<ProductState, StateError> {
        if self.variants.is_empty() {
            return Err(StateError::NoVariants);
        }
        for (i, variant) in self.variants.iter().enumerate() {
            if self.variants[..i]
                .iter()
                .any(|other| other.variant_id == variant.variant_id)
            {
                return Err(StateError::DuplicateVariantId(variant.variant_id));
            }
        }
        let image = self
            .image
            .unwrap_or_else(|| self.variants[0].image.clone());
        Ok(ProductState {
            product: self.product,
            image,
            alt_text: self.alt_text,
            link: self.link,
            in_stock: self.in_stock,
            inventory: self.inventory,
            on_sale: self.on_sale,
            details: self.details,
            variants: self.variants,
            cart: 0,
        })
    }
}
