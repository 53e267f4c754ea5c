//! Console stand-in for the template layer: renders the product page as
//! text and re-renders on change notifications from the binder.
//!
//! Run with: cargo run -p product-page
//! Set RUST_LOG=debug to see action dispatch, or trace for fan-out.

use std::cell::RefCell;
use std::rc::Rc;
use tracing_subscriber::EnvFilter;
use vitrine_store::{Availability, Field, ProductState, StateError, ViewModelBinder};

fn main() -> Result<(), StateError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let state = ProductState::builder()
        .product("Socks")
        .alt_text("A pair of socks")
        .link("https://www.google.com")
        .in_stock(true)
        .inventory(100)
        .on_sale(true)
        .detail("80% cotton")
        .detail("20% polyester")
        .detail("Gender-neutral")
        .variant(2234, "green", "./assets/vmSocks-green.jpg")
        .variant(2235, "blue", "./assets/vmSocks-blue.jpg")
        .build()?;

    let mut binder = ViewModelBinder::new(state);

    // The "bound view": remember which fields changed, repaint between
    // user gestures.
    let dirty: Rc<RefCell<Vec<Field>>> = Rc::new(RefCell::new(Vec::new()));
    let dirty_writer = dirty.clone();
    binder.subscribe(move |field| {
        tracing::info!(?field, "change notification");
        dirty_writer.borrow_mut().push(field);
    });

    render(binder.state());

    println!("\n--- user selects the blue variant ---\n");
    let blue = binder.state().variants()[1].image.clone();
    binder.update_product(&blue);
    repaint(&binder, &dirty);

    println!("\n--- user clicks Add to Cart three times ---\n");
    binder.batch(|binder| {
        binder.add_to_cart();
        binder.add_to_cart();
        binder.add_to_cart();
    });
    repaint(&binder, &dirty);

    Ok(())
}

fn repaint(binder: &ViewModelBinder, dirty: &Rc<RefCell<Vec<Field>>>) {
    let changed = std::mem::take(&mut *dirty.borrow_mut());
    println!("changed fields: {changed:?}\n");
    render(binder.state());
}

fn render(state: &ProductState) {
    println!("== {} ==", state.product());
    if let Some(banner) = state.sale_banner() {
        println!("{banner}");
    }
    println!("img src={} alt=\"{}\"", state.image(), state.alt_text());
    println!("more products: {}", state.link());
    match state.availability() {
        Availability::InStock => println!("In Stock"),
        Availability::LowStock => println!("Almost sold out!"),
        Availability::OutOfStock => println!("Out of Stock"),
    }
    println!("details:");
    for detail in state.details() {
        println!("  - {detail}");
    }
    println!("variants:");
    for variant in state.variants() {
        println!("  [{}] {} -> {}", variant.variant_id, variant.color, variant.image);
    }
    println!("cart: {}", state.cart());
}
