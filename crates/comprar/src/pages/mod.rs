//! Page objects over the storefront.
//!
//! One struct per page, each composing [`BasePage`] over a borrowed driver.
//! Pages expose intent (log in, add to cart, sort) and return data; the
//! assertions live in the scenarios.

pub mod base;
pub mod login;
pub mod products;

pub use base::BasePage;
pub use login::LoginPage;
pub use products::{kebab_case, ProductsPage, SortOption};
