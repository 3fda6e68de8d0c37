//! Shared fixtures for the scenario suites.
//!
//! Every scenario gets a fresh [`MockDriver`], so suites can run in
//! parallel without sharing storefront state.

#![allow(dead_code)]

use comprar::{LoginPage, MockDriver, ProductsPage, TestConfig};

/// Canonical catalog, in the storefront's default (A to Z) order
pub const CATALOG: [(&str, &str); 6] = [
    ("Sauce Labs Backpack", "$29.99"),
    ("Sauce Labs Bike Light", "$9.99"),
    ("Sauce Labs Bolt T-Shirt", "$15.99"),
    ("Sauce Labs Fleece Jacket", "$49.99"),
    ("Sauce Labs Onesie", "$7.99"),
    ("Test.allTheThings() T-Shirt (Red)", "$15.99"),
];

/// Catalog names in default order
pub fn catalog_names() -> Vec<&'static str> {
    CATALOG.iter().map(|(name, _)| *name).collect()
}

/// Fresh storefront fixture
pub fn fixture() -> (MockDriver, TestConfig) {
    (MockDriver::new(), TestConfig::default())
}

/// Open the login form on a fresh driver
pub async fn open_login<'d>(
    driver: &'d MockDriver,
    config: &TestConfig,
) -> LoginPage<'d, MockDriver> {
    let login = LoginPage::new(driver, config);
    login.goto().await.expect("open login form");
    login
}

/// Log in as the standard user and land on the inventory page
pub async fn logged_in<'d>(
    driver: &'d MockDriver,
    config: &TestConfig,
) -> ProductsPage<'d, MockDriver> {
    let login = open_login(driver, config).await;
    login
        .login_as_standard_user()
        .await
        .expect("submit login form");
    ProductsPage::new(driver)
}
