//! Inventory scenarios: catalog census, cart state, and sorting.

mod common;

use common::{catalog_names, fixture, logged_in, CATALOG};
use comprar::{ComprarError, SortOption};

#[tokio::test]
async fn test_inventory_lists_six_products() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;

    assert_eq!(products.product_count().await.unwrap(), 6);
}

#[tokio::test]
async fn test_catalog_names_in_default_order() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;

    assert_eq!(products.all_product_names().await.unwrap(), catalog_names());
}

#[tokio::test]
async fn test_every_product_shows_its_price() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;

    for (name, price) in CATALOG {
        assert_eq!(
            products.product_price(name).await.unwrap().as_deref(),
            Some(price),
            "price of {name}"
        );
    }
}

#[tokio::test]
async fn test_unknown_product_has_no_price() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;

    assert_eq!(
        products.product_price("Sauce Labs Time Machine").await.unwrap(),
        None
    );
}

#[tokio::test]
async fn test_add_single_product_updates_badge() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;
    assert!(products.is_cart_empty().await.unwrap());

    products.add_to_cart("Sauce Labs Backpack").await.unwrap();

    assert_eq!(products.cart_item_count().await.unwrap(), 1);
    assert!(products.is_product_in_cart("Sauce Labs Backpack").await);
    assert!(!products.is_cart_empty().await.unwrap());
}

#[tokio::test]
async fn test_add_multiple_products_counts_each_once() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;

    products
        .add_multiple_to_cart([
            "Sauce Labs Backpack",
            "Sauce Labs Bike Light",
            "Sauce Labs Onesie",
        ])
        .await
        .unwrap();

    assert_eq!(products.cart_item_count().await.unwrap(), 3);
    assert!(
        products
            .verify_products_in_cart(["Sauce Labs Backpack", "Sauce Labs Onesie"])
            .await
    );
}

#[tokio::test]
async fn test_badge_tracks_adds_in_any_order() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;

    // Add in reverse catalog order; the badge only cares about cart size.
    let mut names = catalog_names();
    names.reverse();
    for (added, name) in names.iter().enumerate() {
        products.add_to_cart(name).await.unwrap();
        let expected = u32::try_from(added).unwrap() + 1;
        assert_eq!(products.cart_item_count().await.unwrap(), expected);
    }

    for (removed, name) in names.iter().enumerate() {
        products.remove_from_cart(name).await.unwrap();
        let expected = u32::try_from(names.len() - removed - 1).unwrap();
        assert_eq!(products.cart_item_count().await.unwrap(), expected);
    }
}

#[tokio::test]
async fn test_verify_products_fails_after_a_removal() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;
    let set = ["Sauce Labs Backpack", "Sauce Labs Bike Light"];
    products.add_multiple_to_cart(set).await.unwrap();
    assert!(products.verify_products_in_cart(set).await);

    products.remove_from_cart("Sauce Labs Bike Light").await.unwrap();

    assert!(!products.verify_products_in_cart(set).await);
    assert!(products.verify_products_in_cart(["Sauce Labs Backpack"]).await);
}

#[tokio::test]
async fn test_remove_restores_add_button() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;
    products.add_to_cart("Sauce Labs Bolt T-Shirt").await.unwrap();

    products
        .remove_from_cart("Sauce Labs Bolt T-Shirt")
        .await
        .unwrap();

    assert!(!products.is_product_in_cart("Sauce Labs Bolt T-Shirt").await);
    assert!(products.is_cart_empty().await.unwrap());
    // The add button is back, so a second add succeeds.
    products.add_to_cart("Sauce Labs Bolt T-Shirt").await.unwrap();
    assert_eq!(products.cart_item_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_every_product_round_trips_through_cart() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;

    for name in catalog_names() {
        products.add_to_cart(name).await.unwrap();
        assert!(products.is_product_in_cart(name).await, "{name} in cart");

        products.remove_from_cart(name).await.unwrap();
        assert!(!products.is_product_in_cart(name).await, "{name} removed");
    }
    assert!(products.is_cart_empty().await.unwrap());
}

#[tokio::test]
async fn test_adding_a_product_twice_fails() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;
    products.add_to_cart("Sauce Labs Backpack").await.unwrap();

    let err = products.add_to_cart("Sauce Labs Backpack").await.unwrap_err();

    assert!(
        matches!(err, ComprarError::ElementNotFound { .. }),
        "expected a missing add button, got: {err}"
    );
    assert_eq!(products.cart_item_count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_removing_an_absent_product_fails() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;

    let err = products
        .remove_from_cart("Sauce Labs Backpack")
        .await
        .unwrap_err();

    assert!(matches!(err, ComprarError::ElementNotFound { .. }));
}

#[tokio::test]
async fn test_adding_an_unknown_product_fails() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;

    let err = products
        .add_to_cart("Sauce Labs Time Machine")
        .await
        .unwrap_err();

    assert!(matches!(err, ComprarError::ElementNotFound { .. }));
    assert!(products.is_cart_empty().await.unwrap());
}

#[tokio::test]
async fn test_verify_cart_item_count_checks_the_badge() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;
    products.add_to_cart("Sauce Labs Onesie").await.unwrap();

    assert!(products.verify_cart_item_count(1).await.unwrap());
    assert!(!products.verify_cart_item_count(2).await.unwrap());
}

#[tokio::test]
async fn test_verify_products_in_cart_short_circuits_on_missing() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;
    products.add_to_cart("Sauce Labs Backpack").await.unwrap();

    assert!(
        !products
            .verify_products_in_cart(["Sauce Labs Backpack", "Sauce Labs Fleece Jacket"])
            .await
    );
}

#[tokio::test]
async fn test_sort_by_name_z_to_a_reverses_the_grid() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;

    products.sort_by_name_z_to_a().await.unwrap();

    let mut expected = catalog_names();
    expected.reverse();
    assert_eq!(products.all_product_names().await.unwrap(), expected);
}

#[tokio::test]
async fn test_sort_by_price_low_to_high() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;

    products.sort_by_price_low_to_high().await.unwrap();

    let names = products.all_product_names().await.unwrap();
    assert_eq!(names.first().map(String::as_str), Some("Sauce Labs Onesie"));
    assert_eq!(
        names.last().map(String::as_str),
        Some("Sauce Labs Fleece Jacket")
    );
}

#[tokio::test]
async fn test_sort_by_price_high_to_low() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;

    products.sort_by_price_high_to_low().await.unwrap();

    let names = products.all_product_names().await.unwrap();
    assert_eq!(
        names.first().map(String::as_str),
        Some("Sauce Labs Fleece Jacket")
    );
}

#[tokio::test]
async fn test_sort_round_trips_back_to_default() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;

    products.sort_by_name_z_to_a().await.unwrap();
    products.sort_by_name_a_to_z().await.unwrap();

    assert_eq!(products.all_product_names().await.unwrap(), catalog_names());
    assert_eq!(
        products.current_sort_option().await.unwrap(),
        SortOption::NameAscending
    );
}

#[tokio::test]
async fn test_current_sort_option_follows_every_selection() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;

    for option in SortOption::ALL {
        products.sort_products(option).await.unwrap();
        assert_eq!(products.current_sort_option().await.unwrap(), option);
    }
}

#[tokio::test]
async fn test_cart_survives_sorting() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;
    products
        .add_multiple_to_cart(["Sauce Labs Backpack", "Sauce Labs Fleece Jacket"])
        .await
        .unwrap();

    products.sort_by_price_high_to_low().await.unwrap();

    assert_eq!(products.cart_item_count().await.unwrap(), 2);
    assert!(
        products
            .verify_products_in_cart(["Sauce Labs Backpack", "Sauce Labs Fleece Jacket"])
            .await
    );
}

#[tokio::test]
async fn test_prices_reorder_with_the_grid() {
    let (driver, config) = fixture();
    let products = logged_in(&driver, &config).await;

    products.sort_by_price_low_to_high().await.unwrap();

    // Price lookups go by name, so they are stable under reordering.
    assert_eq!(
        products
            .product_price("Sauce Labs Fleece Jacket")
            .await
            .unwrap()
            .as_deref(),
        Some("$49.99")
    );
    assert_eq!(
        products
            .product_price("Sauce Labs Onesie")
            .await
            .unwrap()
            .as_deref(),
        Some("$7.99")
    );
}
