//! Page object for the Swag Labs inventory page.
//!
//! Every query reads the rendered DOM. Cart state in particular is always
//! derived from the badge and the per-product buttons, never cached on the
//! page object, so assertions observe what a user would see.

use crate::driver::ComprarDriver;
use crate::pages::base::BasePage;
use crate::result::{ComprarError, ComprarResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SORT_SELECT: &str = "[data-test=\"product-sort-container\"]";
const CART_BADGE: &str = "[data-test=\"shopping-cart-badge\"]";
const INVENTORY_ITEM: &str = ".inventory_item";
const ITEM_NAME: &str = "[data-test=\"inventory-item-name\"]";
const ITEM_PRICE: &str = "[data-test=\"inventory-item-price\"]";

/// Sort orders offered by the inventory page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortOption {
    /// Name A to Z (the page default)
    #[serde(rename = "az")]
    NameAscending,
    /// Name Z to A
    #[serde(rename = "za")]
    NameDescending,
    /// Price low to high
    #[serde(rename = "lohi")]
    PriceAscending,
    /// Price high to low
    #[serde(rename = "hilo")]
    PriceDescending,
}

impl SortOption {
    /// All sort orders, in the order the select lists them
    pub const ALL: [Self; 4] = [
        Self::NameAscending,
        Self::NameDescending,
        Self::PriceAscending,
        Self::PriceDescending,
    ];

    /// Option value the select control uses for this order
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NameAscending => "az",
            Self::NameDescending => "za",
            Self::PriceAscending => "lohi",
            Self::PriceDescending => "hilo",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for SortOption {
    type Err = ComprarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "az" => Ok(Self::NameAscending),
            "za" => Ok(Self::NameDescending),
            "lohi" => Ok(Self::PriceAscending),
            "hilo" => Ok(Self::PriceDescending),
            other => Err(ComprarError::UnknownSortOption {
                value: other.to_string(),
            }),
        }
    }
}

/// Convert a product title to the storefront's button suffix
///
/// The storefront derives its `data-test` button ids from the product title:
/// lowercased, with each whitespace run replaced by a single hyphen. All
/// other characters survive unchanged, so
/// `Test.allTheThings() T-Shirt (Red)` becomes
/// `test.allthethings()-t-shirt-(red)`.
///
/// Two titles that differ only in case or spacing would collide here; the
/// storefront's catalog has no such pair.
#[must_use]
pub fn kebab_case(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

fn add_to_cart_selector(product_name: &str) -> String {
    format!("[data-test=\"add-to-cart-{}\"]", kebab_case(product_name))
}

fn remove_selector(product_name: &str) -> String {
    format!("[data-test=\"remove-{}\"]", kebab_case(product_name))
}

/// Page object for the inventory page
///
/// Constructed over a driver that has already logged in; the page itself
/// never navigates.
#[derive(Debug)]
pub struct ProductsPage<'d, D: ComprarDriver> {
    base: BasePage<'d, D>,
}

impl<'d, D: ComprarDriver> ProductsPage<'d, D> {
    /// Build the page over a borrowed driver
    pub const fn new(driver: &'d D) -> Self {
        Self {
            base: BasePage::new(driver),
        }
    }

    /// Put one unit of `product_name` in the cart
    ///
    /// # Errors
    ///
    /// Returns error if the product has no add button, which covers both
    /// unknown products and products already in the cart
    pub async fn add_to_cart(&self, product_name: &str) -> ComprarResult<()> {
        tracing::debug!(product = product_name, "add to cart");
        self.base.click(&add_to_cart_selector(product_name)).await
    }

    /// Take `product_name` out of the cart
    ///
    /// # Errors
    ///
    /// Returns error if the product has no remove button, which covers both
    /// unknown products and products not currently in the cart
    pub async fn remove_from_cart(&self, product_name: &str) -> ComprarResult<()> {
        tracing::debug!(product = product_name, "remove from cart");
        self.base.click(&remove_selector(product_name)).await
    }

    /// Add several products, in iteration order
    ///
    /// Stops at the first failure; products added before it stay in the
    /// cart.
    ///
    /// # Errors
    ///
    /// Returns the first add failure
    pub async fn add_multiple_to_cart<I>(&self, product_names: I) -> ComprarResult<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in product_names {
            self.add_to_cart(name.as_ref()).await?;
        }
        Ok(())
    }

    /// Remove several products, in iteration order
    ///
    /// Stops at the first failure; removals before it stand.
    ///
    /// # Errors
    ///
    /// Returns the first remove failure
    pub async fn remove_multiple_from_cart<I>(&self, product_names: I) -> ComprarResult<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in product_names {
            self.remove_from_cart(name.as_ref()).await?;
        }
        Ok(())
    }

    /// Number of items in the cart, read from the badge
    ///
    /// No badge means an empty cart; that is how the storefront renders
    /// zero.
    ///
    /// # Errors
    ///
    /// Returns [`ComprarError::CartBadge`] if a visible badge shows
    /// something other than a number
    pub async fn cart_item_count(&self) -> ComprarResult<u32> {
        if !self.base.is_visible(CART_BADGE).await {
            return Ok(0);
        }
        let text = self.base.text(CART_BADGE).await?;
        let trimmed = text.trim();
        trimmed
            .parse()
            .map_err(|_| ComprarError::CartBadge {
                text: trimmed.to_string(),
            })
    }

    /// Whether the badge agrees with `expected`
    ///
    /// # Errors
    ///
    /// Returns error if the badge cannot be read as a count
    pub async fn verify_cart_item_count(&self, expected: u32) -> ComprarResult<bool> {
        Ok(self.cart_item_count().await? == expected)
    }

    /// Whether the cart holds nothing
    ///
    /// # Errors
    ///
    /// Returns error if the badge cannot be read as a count
    pub async fn is_cart_empty(&self) -> ComprarResult<bool> {
        Ok(self.cart_item_count().await? == 0)
    }

    /// Whether `product_name` is in the cart right now
    ///
    /// A product is in the cart exactly when its remove button is rendered.
    /// Unknown products are simply not in the cart.
    pub async fn is_product_in_cart(&self, product_name: &str) -> bool {
        self.base.is_visible(&remove_selector(product_name)).await
    }

    /// Whether every listed product is in the cart
    ///
    /// Short-circuits on the first missing product.
    pub async fn verify_products_in_cart<I>(&self, product_names: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for name in product_names {
            if !self.is_product_in_cart(name.as_ref()).await {
                return false;
            }
        }
        true
    }

    /// Reorder the product grid
    ///
    /// # Errors
    ///
    /// Returns error if the sort select cannot be driven
    pub async fn sort_products(&self, option: SortOption) -> ComprarResult<()> {
        tracing::debug!(option = option.code(), "sort products");
        self.base.select_option(SORT_SELECT, option.code()).await
    }

    /// Sort by name, A to Z
    ///
    /// # Errors
    ///
    /// Returns error if the sort select cannot be driven
    pub async fn sort_by_name_a_to_z(&self) -> ComprarResult<()> {
        self.sort_products(SortOption::NameAscending).await
    }

    /// Sort by name, Z to A
    ///
    /// # Errors
    ///
    /// Returns error if the sort select cannot be driven
    pub async fn sort_by_name_z_to_a(&self) -> ComprarResult<()> {
        self.sort_products(SortOption::NameDescending).await
    }

    /// Sort by price, low to high
    ///
    /// # Errors
    ///
    /// Returns error if the sort select cannot be driven
    pub async fn sort_by_price_low_to_high(&self) -> ComprarResult<()> {
        self.sort_products(SortOption::PriceAscending).await
    }

    /// Sort by price, high to low
    ///
    /// # Errors
    ///
    /// Returns error if the sort select cannot be driven
    pub async fn sort_by_price_high_to_low(&self) -> ComprarResult<()> {
        self.sort_products(SortOption::PriceDescending).await
    }

    /// Sort order the select currently shows
    ///
    /// # Errors
    ///
    /// Returns [`ComprarError::UnknownSortOption`] if the select holds a
    /// value this suite does not know
    pub async fn current_sort_option(&self) -> ComprarResult<SortOption> {
        let value = self.base.input_value(SORT_SELECT).await?;
        value.parse()
    }

    /// Product names in grid order, trimmed
    ///
    /// # Errors
    ///
    /// Returns error if the grid cannot be queried
    pub async fn all_product_names(&self) -> ComprarResult<Vec<String>> {
        let handles = self.base.query_all(ITEM_NAME).await?;
        let mut names = Vec::with_capacity(handles.len());
        for handle in handles {
            names.push(handle.text().await?.trim().to_string());
        }
        Ok(names)
    }

    /// Number of product cards in the grid
    ///
    /// # Errors
    ///
    /// Returns error if the grid cannot be queried
    pub async fn product_count(&self) -> ComprarResult<usize> {
        Ok(self.base.query_all(INVENTORY_ITEM).await?.len())
    }

    /// Displayed price of `product_name`, if the product is listed
    ///
    /// `Ok(None)` means no card carries that name; that is data, not a
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns error if a product card cannot be read
    pub async fn product_price(&self, product_name: &str) -> ComprarResult<Option<String>> {
        let cards = self.base.query_all(INVENTORY_ITEM).await?;
        for card in cards {
            let name = card.query_one(ITEM_NAME).await?.text().await?;
            if name.trim() == product_name {
                let price = card.query_one(ITEM_PRICE).await?.text().await?;
                return Ok(Some(price.trim().to_string()));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    mod kebab_case_tests {
        use super::*;

        #[test]
        fn test_simple_name() {
            assert_eq!(kebab_case("Sauce Labs Backpack"), "sauce-labs-backpack");
        }

        #[test]
        fn test_punctuation_survives() {
            assert_eq!(
                kebab_case("Test.allTheThings() T-Shirt (Red)"),
                "test.allthethings()-t-shirt-(red)"
            );
        }

        #[test]
        fn test_whitespace_runs_collapse() {
            assert_eq!(kebab_case("Sauce  Labs\tOnesie"), "sauce-labs-onesie");
        }

        #[test]
        fn test_existing_hyphens_kept() {
            assert_eq!(kebab_case("Bolt T-Shirt"), "bolt-t-shirt");
        }

        #[test]
        fn test_leading_trailing_whitespace_dropped() {
            assert_eq!(kebab_case("  Sauce Labs Bike Light "), "sauce-labs-bike-light");
        }
    }

    mod selector_tests {
        use super::*;

        #[test]
        fn test_add_selector() {
            assert_eq!(
                add_to_cart_selector("Sauce Labs Fleece Jacket"),
                "[data-test=\"add-to-cart-sauce-labs-fleece-jacket\"]"
            );
        }

        #[test]
        fn test_remove_selector() {
            assert_eq!(
                remove_selector("Test.allTheThings() T-Shirt (Red)"),
                "[data-test=\"remove-test.allthethings()-t-shirt-(red)\"]"
            );
        }
    }

    mod sort_option_tests {
        use super::*;

        #[test]
        fn test_code_round_trip() {
            for option in SortOption::ALL {
                assert_eq!(option.code().parse::<SortOption>().unwrap(), option);
            }
        }

        #[test]
        fn test_display_matches_code() {
            assert_eq!(SortOption::PriceDescending.to_string(), "hilo");
        }

        #[test]
        fn test_unknown_code_rejected() {
            let err = "name".parse::<SortOption>().unwrap_err();
            match err {
                ComprarError::UnknownSortOption { value } => assert_eq!(value, "name"),
                other => panic!("unexpected error: {other}"),
            }
        }
    }

    mod badge_tests {
        use super::*;
        use crate::config::TestConfig;
        use crate::mock::MockDriver;
        use crate::pages::login::LoginPage;

        async fn logged_in_driver() -> MockDriver {
            let driver = MockDriver::new();
            let config = TestConfig::default();
            let login = LoginPage::new(&driver, &config);
            login.goto().await.unwrap();
            login.login_as_standard_user().await.unwrap();
            driver
        }

        #[tokio::test]
        async fn test_no_badge_means_zero() {
            let driver = logged_in_driver().await;
            let products = ProductsPage::new(&driver);

            assert_eq!(products.cart_item_count().await.unwrap(), 0);
            assert!(products.is_cart_empty().await.unwrap());
        }

        #[tokio::test]
        async fn test_non_numeric_badge_is_a_contract_violation() {
            let driver = logged_in_driver().await;
            driver.set_badge_text("2 items");
            let products = ProductsPage::new(&driver);

            let err = products.cart_item_count().await.unwrap_err();
            match err {
                ComprarError::CartBadge { text } => assert_eq!(text, "2 items"),
                other => panic!("unexpected error: {other}"),
            }
        }

        #[tokio::test]
        async fn test_default_sort_is_name_ascending() {
            let driver = logged_in_driver().await;
            let products = ProductsPage::new(&driver);

            assert_eq!(
                products.current_sort_option().await.unwrap(),
                SortOption::NameAscending
            );
        }
    }
}
