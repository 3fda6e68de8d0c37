//! Comprar: Page-Object End-to-End Suite for the Swag Labs Storefront
//!
//! Comprar (Spanish: "to buy/shop") drives the Swag Labs demo storefront
//! through page objects over a swappable driver. Scenarios run against the
//! in-memory storefront model by default, and against real Chromium when
//! the `browser` feature is enabled and a binary is available.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     COMPRAR Architecture                          │
//! ├──────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌─────────────┐    ┌─────────────────────┐  │
//! │   │ Scenario   │    │ Page        │    │ ComprarDriver       │  │
//! │   │ (Rust)     │───►│ Objects     │───►│ mock / chromium     │  │
//! │   └────────────┘    └─────────────┘    └─────────────────────┘  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use comprar::{LoginPage, MockDriver, ProductsPage, TestConfig};
//!
//! # async fn run() -> comprar::ComprarResult<()> {
//! let config = TestConfig::default();
//! let driver = MockDriver::new();
//!
//! let login = LoginPage::new(&driver, &config);
//! login.goto().await?;
//! login.login_as_standard_user().await?;
//!
//! let products = ProductsPage::new(&driver);
//! products.add_to_cart("Sauce Labs Backpack").await?;
//! assert_eq!(products.cart_item_count().await?, 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod config;
pub mod driver;
pub mod mock;
pub mod pages;
pub mod result;

#[cfg(feature = "browser")]
pub mod browser;

#[cfg(feature = "browser")]
pub use browser::{Browser, BrowserConfig, ChromiumDriver};
pub use config::{Credential, TestConfig, UserCredentials, UserType};
pub use driver::{ComprarDriver, ElementHandle};
pub use mock::MockDriver;
pub use pages::{kebab_case, BasePage, LoginPage, ProductsPage, SortOption};
pub use result::{ComprarError, ComprarResult};
