//! In-memory storefront driver for scenario tests.
//!
//! [`MockDriver`] implements [`ComprarDriver`] over a deterministic model of
//! the demo storefront: the login form with its validation messages, the
//! six-product inventory, the sort dropdown, and a cart whose badge derives
//! from cart size. Scenario suites run against it without a browser; the
//! same scenarios run against `ChromiumDriver` in the live suite.
//!
//! The model is deliberately stricter than a real DOM in two places:
//! selecting an option value the dropdown does not offer is an error rather
//! than a silent empty selection, and visibility checks on selectors the
//! model does not track fail instead of answering `false`. Both surface
//! page-object bugs that a tolerant answer would hide.

use crate::driver::{ComprarDriver, ElementHandle};
use crate::result::{ComprarError, ComprarResult};
use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const VALID_PASSWORD: &str = "secret_sauce";
const LOCKED_USER: &str = "locked_out_user";
const VALID_USERS: [&str; 5] = [
    "standard_user",
    "problem_user",
    "performance_glitch_user",
    "error_user",
    "visual_user",
];

const MSG_USERNAME_REQUIRED: &str = "Epic sadface: Username is required";
const MSG_PASSWORD_REQUIRED: &str = "Epic sadface: Password is required";
const MSG_LOCKED_OUT: &str = "Epic sadface: Sorry, this user has been locked out.";
const MSG_MISMATCH: &str =
    "Epic sadface: Username and password do not match any user in this service";

const SORT_CODES: [&str; 4] = ["az", "za", "lohi", "hilo"];
const ITEM_SELECTOR: &str = ".inventory_item";

/// One inventory entry
#[derive(Debug, Clone)]
struct MockProduct {
    title: String,
    price_cents: u32,
    /// Button id fragment the storefront renders into `data-test` attributes
    slug: String,
}

impl MockProduct {
    fn new(title: &str, price_cents: u32) -> Self {
        Self {
            title: title.to_string(),
            price_cents,
            slug: slug(title),
        }
    }

    fn price(&self) -> String {
        format!("${}.{:02}", self.price_cents / 100, self.price_cents % 100)
    }
}

/// Lowercase the title and join whitespace runs with hyphens, the same way
/// the storefront mints its button ids. Kept separate from the page-object
/// conversion so scenarios prove the two derivations agree.
fn slug(title: &str) -> String {
    let lower = title.to_lowercase();
    lower.split_whitespace().collect::<Vec<_>>().join("-")
}

fn default_catalog() -> Vec<MockProduct> {
    vec![
        MockProduct::new("Sauce Labs Backpack", 29_99),
        MockProduct::new("Sauce Labs Bike Light", 9_99),
        MockProduct::new("Sauce Labs Bolt T-Shirt", 15_99),
        MockProduct::new("Sauce Labs Fleece Jacket", 49_99),
        MockProduct::new("Sauce Labs Onesie", 7_99),
        MockProduct::new("Test.allTheThings() T-Shirt (Red)", 15_99),
    ]
}

/// Extract the value of a `[data-test="..."]` selector
fn data_test(selector: &str) -> Option<&str> {
    selector
        .strip_prefix("[data-test=\"")?
        .strip_suffix("\"]")
}

fn element_not_found(selector: &str, message: &str) -> ComprarError {
    ComprarError::ElementNotFound {
        selector: selector.to_string(),
        message: message.to_string(),
    }
}

fn unsupported(selector: &str) -> ComprarError {
    ComprarError::EvaluationError {
        message: format!("selector not modeled by the mock storefront: {selector}"),
    }
}

#[derive(Debug)]
struct MockState {
    current_url: String,
    username_field: String,
    password_field: String,
    error_message: Option<String>,
    /// Inventory in display order; sorting reorders in place
    catalog: Vec<MockProduct>,
    /// Cart membership by product title
    cart: BTreeSet<String>,
    sort_value: String,
    /// Forces the badge to render arbitrary text, for contract tests
    badge_override: Option<String>,
    call_history: Vec<String>,
}

impl MockState {
    fn new() -> Self {
        Self {
            current_url: String::from("about:blank"),
            username_field: String::new(),
            password_field: String::new(),
            error_message: None,
            catalog: default_catalog(),
            cart: BTreeSet::new(),
            sort_value: String::from("az"),
            badge_override: None,
            call_history: Vec::new(),
        }
    }

    fn on_inventory(&self) -> bool {
        self.current_url.contains("inventory.html")
    }

    fn product_by_slug(&self, slug: &str) -> Option<&MockProduct> {
        self.catalog.iter().find(|p| p.slug == slug)
    }

    fn product_by_title(&self, title: &str) -> Option<&MockProduct> {
        self.catalog.iter().find(|p| p.title == title)
    }

    fn badge_text(&self) -> Option<String> {
        if let Some(ref text) = self.badge_override {
            return Some(text.clone());
        }
        if self.on_inventory() && !self.cart.is_empty() {
            Some(self.cart.len().to_string())
        } else {
            None
        }
    }

    fn apply_sort(&mut self, code: &str) {
        match code {
            "az" => self.catalog.sort_by(|a, b| a.title.cmp(&b.title)),
            "za" => self.catalog.sort_by(|a, b| b.title.cmp(&a.title)),
            "lohi" => self.catalog.sort_by_key(|p| p.price_cents),
            "hilo" => self.catalog.sort_by_key(|p| std::cmp::Reverse(p.price_cents)),
            _ => {}
        }
    }

    fn submit_login(&mut self) {
        let username = self.username_field.clone();
        let password = self.password_field.clone();
        self.error_message = if username.is_empty() {
            Some(MSG_USERNAME_REQUIRED.to_string())
        } else if password.is_empty() {
            Some(MSG_PASSWORD_REQUIRED.to_string())
        } else if username == LOCKED_USER && password == VALID_PASSWORD {
            Some(MSG_LOCKED_OUT.to_string())
        } else if VALID_USERS.contains(&username.as_str()) && password == VALID_PASSWORD {
            let base = self.current_url.trim_end_matches('/').to_string();
            self.current_url = format!("{base}/inventory.html");
            None
        } else {
            Some(MSG_MISMATCH.to_string())
        };
    }
}

/// Deterministic storefront driver
///
/// State sits behind an `Arc` so element handles handed out by
/// [`ComprarDriver::query_all`] stay connected to the same storefront.
#[derive(Debug)]
pub struct MockDriver {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDriver {
    /// Create a storefront with the canonical six-product inventory
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState::new())),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Calls recorded so far, in order
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state().call_history.clone()
    }

    /// Check whether a call with this prefix was made
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.state()
            .call_history
            .iter()
            .any(|c| c.starts_with(method))
    }

    /// Force the cart badge to render arbitrary text
    ///
    /// Lets contract tests observe a badge that is visible but does not
    /// show a count.
    pub fn set_badge_text(&self, text: impl Into<String>) {
        self.state().badge_override = Some(text.into());
    }
}

#[async_trait]
impl ComprarDriver for MockDriver {
    async fn navigate(&self, url: &str) -> ComprarResult<()> {
        let mut state = self.state();
        state.call_history.push(format!("navigate:{url}"));
        state.current_url = url.to_string();
        // A fresh render of the login form: fields empty, no banner.
        // The cart is session state and survives navigation.
        state.username_field.clear();
        state.password_field.clear();
        state.error_message = None;
        Ok(())
    }

    async fn click(&self, selector: &str) -> ComprarResult<()> {
        let mut state = self.state();
        state.call_history.push(format!("click:{selector}"));
        let Some(name) = data_test(selector) else {
            return Err(unsupported(selector));
        };

        if name == "login-button" {
            if state.on_inventory() {
                return Err(element_not_found(selector, "button is not rendered"));
            }
            state.submit_login();
            return Ok(());
        }

        if let Some(slug) = name.strip_prefix("add-to-cart-") {
            if !state.on_inventory() {
                return Err(element_not_found(selector, "button is not rendered"));
            }
            let title = state.product_by_slug(slug).map(|p| p.title.clone());
            return match title {
                Some(title) if !state.cart.contains(&title) => {
                    state.cart.insert(title);
                    Ok(())
                }
                _ => Err(element_not_found(selector, "button is not rendered")),
            };
        }

        if let Some(slug) = name.strip_prefix("remove-") {
            if !state.on_inventory() {
                return Err(element_not_found(selector, "button is not rendered"));
            }
            let title = state.product_by_slug(slug).map(|p| p.title.clone());
            return match title {
                Some(title) if state.cart.contains(&title) => {
                    state.cart.remove(&title);
                    Ok(())
                }
                _ => Err(element_not_found(selector, "button is not rendered")),
            };
        }

        Err(element_not_found(selector, "nothing clickable matches"))
    }

    async fn fill(&self, selector: &str, text: &str) -> ComprarResult<()> {
        let mut state = self.state();
        state.call_history.push(format!("fill:{selector}:{text}"));
        if state.on_inventory() {
            return Err(element_not_found(selector, "field is not rendered"));
        }
        match data_test(selector) {
            Some("username") => {
                state.username_field = text.to_string();
                Ok(())
            }
            Some("password") => {
                state.password_field = text.to_string();
                Ok(())
            }
            _ => Err(element_not_found(selector, "no form control matches")),
        }
    }

    async fn select_option(&self, selector: &str, value: &str) -> ComprarResult<()> {
        let mut state = self.state();
        state
            .call_history
            .push(format!("select_option:{selector}:{value}"));
        if data_test(selector) != Some("product-sort-container") {
            return Err(element_not_found(selector, "no select matches"));
        }
        if !state.on_inventory() {
            return Err(element_not_found(selector, "select is not rendered"));
        }
        if !SORT_CODES.contains(&value) {
            return Err(ComprarError::InteractionError {
                selector: selector.to_string(),
                message: format!("select has no option with value {value:?}"),
            });
        }
        state.sort_value = value.to_string();
        state.apply_sort(value);
        Ok(())
    }

    async fn text(&self, selector: &str) -> ComprarResult<String> {
        let state = self.state();
        match data_test(selector) {
            Some("error") => state
                .error_message
                .clone()
                .ok_or_else(|| element_not_found(selector, "banner is not displayed")),
            Some("shopping-cart-badge") => state
                .badge_text()
                .ok_or_else(|| element_not_found(selector, "badge is not displayed")),
            Some("inventory-item-name") if state.on_inventory() => state
                .catalog
                .first()
                .map(|p| format!(" {}\n", p.title))
                .ok_or_else(|| element_not_found(selector, "inventory is empty")),
            Some("inventory-item-price") if state.on_inventory() => state
                .catalog
                .first()
                .map(|p| format!("{} ", p.price()))
                .ok_or_else(|| element_not_found(selector, "inventory is empty")),
            Some(_) => Err(element_not_found(selector, "nothing matches")),
            None => Err(unsupported(selector)),
        }
    }

    async fn input_value(&self, selector: &str) -> ComprarResult<String> {
        let state = self.state();
        match data_test(selector) {
            Some("username") if !state.on_inventory() => Ok(state.username_field.clone()),
            Some("password") if !state.on_inventory() => Ok(state.password_field.clone()),
            Some("product-sort-container") if state.on_inventory() => {
                Ok(state.sort_value.clone())
            }
            Some(_) => Err(element_not_found(selector, "no form control matches")),
            None => Err(unsupported(selector)),
        }
    }

    async fn is_visible(&self, selector: &str) -> ComprarResult<bool> {
        let state = self.state();
        if selector == ITEM_SELECTOR {
            return Ok(state.on_inventory());
        }
        let Some(name) = data_test(selector) else {
            return Err(unsupported(selector));
        };
        let visible = match name {
            "username" | "password" | "login-button" => !state.on_inventory(),
            "error" => !state.on_inventory() && state.error_message.is_some(),
            "shopping-cart-badge" => state.badge_text().is_some(),
            "product-sort-container" | "inventory-item-name" | "inventory-item-price" => {
                state.on_inventory()
            }
            other => {
                if let Some(slug) = other.strip_prefix("add-to-cart-") {
                    state.on_inventory()
                        && state
                            .product_by_slug(slug)
                            .is_some_and(|p| !state.cart.contains(&p.title))
                } else if let Some(slug) = other.strip_prefix("remove-") {
                    state.on_inventory()
                        && state
                            .product_by_slug(slug)
                            .is_some_and(|p| state.cart.contains(&p.title))
                } else {
                    false
                }
            }
        };
        Ok(visible)
    }

    async fn query_all(&self, selector: &str) -> ComprarResult<Vec<Box<dyn ElementHandle>>> {
        let state = self.state();
        let node_for = |title: &str| -> Option<MockNode> {
            if selector == ITEM_SELECTOR {
                Some(MockNode::Item(title.to_string()))
            } else {
                match data_test(selector) {
                    Some("inventory-item-name") => Some(MockNode::Title(title.to_string())),
                    Some("inventory-item-price") => Some(MockNode::Price(title.to_string())),
                    _ => None,
                }
            }
        };
        if selector != ITEM_SELECTOR && data_test(selector).is_none() {
            return Err(unsupported(selector));
        }
        if !state.on_inventory() {
            return Ok(Vec::new());
        }
        let handles = state
            .catalog
            .iter()
            .filter_map(|p| node_for(&p.title))
            .map(|node| {
                Box::new(MockElement {
                    state: Arc::clone(&self.state),
                    node,
                }) as Box<dyn ElementHandle>
            })
            .collect();
        Ok(handles)
    }

    async fn current_url(&self) -> ComprarResult<String> {
        Ok(self.state().current_url.clone())
    }
}

#[derive(Debug, Clone)]
enum MockNode {
    /// An `.inventory_item` container, keyed by product title
    Item(String),
    /// The title node inside an item
    Title(String),
    /// The price node inside an item
    Price(String),
}

/// Handle into the shared storefront state
///
/// Text nodes carry incidental surrounding whitespace, the way markup
/// formatting leaks into real text content. Readers are expected to trim.
#[derive(Debug)]
struct MockElement {
    state: Arc<Mutex<MockState>>,
    node: MockNode,
}

impl MockElement {
    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ElementHandle for MockElement {
    async fn text(&self) -> ComprarResult<String> {
        let state = self.state();
        let title = match &self.node {
            MockNode::Item(t) | MockNode::Title(t) | MockNode::Price(t) => t,
        };
        let product = state
            .product_by_title(title)
            .ok_or_else(|| element_not_found(title, "product left the inventory"))?;
        let text = match self.node {
            MockNode::Item(_) => format!(" {}\n{}\n", product.title, product.price()),
            MockNode::Title(_) => format!(" {}\n", product.title),
            MockNode::Price(_) => format!("{} ", product.price()),
        };
        Ok(text)
    }

    async fn query_one(&self, selector: &str) -> ComprarResult<Box<dyn ElementHandle>> {
        let MockNode::Item(ref title) = self.node else {
            return Err(element_not_found(selector, "node has no children"));
        };
        match data_test(selector) {
            Some("inventory-item-name") => Ok(Box::new(MockElement {
                state: Arc::clone(&self.state),
                node: MockNode::Title(title.clone()),
            })),
            Some("inventory-item-price") => Ok(Box::new(MockElement {
                state: Arc::clone(&self.state),
                node: MockNode::Price(title.clone()),
            })),
            _ => Err(element_not_found(selector, "no descendant matches")),
        }
    }
}
