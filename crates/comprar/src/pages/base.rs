//! Shared page plumbing.

use crate::driver::{ComprarDriver, ElementHandle};
use crate::result::ComprarResult;

/// Common driver plumbing shared by every page object
///
/// Pages compose a `BasePage` over a borrowed driver; they never own the
/// browser session. All methods delegate to the driver unchanged except
/// [`BasePage::is_visible`], which collapses probe failures to `false`.
#[derive(Debug)]
pub struct BasePage<'d, D: ComprarDriver> {
    driver: &'d D,
}

impl<'d, D: ComprarDriver> BasePage<'d, D> {
    /// Wrap a borrowed driver
    pub const fn new(driver: &'d D) -> Self {
        Self { driver }
    }

    /// Access the underlying driver
    #[must_use]
    pub const fn driver(&self) -> &'d D {
        self.driver
    }

    /// Navigate to a URL and wait for the load to settle
    ///
    /// # Errors
    ///
    /// Returns error if navigation fails or times out
    pub async fn navigate(&self, url: &str) -> ComprarResult<()> {
        self.driver.navigate(url).await
    }

    /// Click the element matching `selector`
    ///
    /// # Errors
    ///
    /// Returns error if the element is missing or the click fails
    pub async fn click(&self, selector: &str) -> ComprarResult<()> {
        self.driver.click(selector).await
    }

    /// Clear the matching form control and type `text` into it
    ///
    /// # Errors
    ///
    /// Returns error if the control is missing or typing fails
    pub async fn fill(&self, selector: &str, text: &str) -> ComprarResult<()> {
        self.driver.fill(selector, text).await
    }

    /// Choose the option with the given value in a select control
    ///
    /// # Errors
    ///
    /// Returns error if the select is missing or the choice fails
    pub async fn select_option(&self, selector: &str, value: &str) -> ComprarResult<()> {
        self.driver.select_option(selector, value).await
    }

    /// Rendered text of the element matching `selector`
    ///
    /// # Errors
    ///
    /// Returns error if the element is missing
    pub async fn text(&self, selector: &str) -> ComprarResult<String> {
        self.driver.text(selector).await
    }

    /// Current value of the form control matching `selector`
    ///
    /// # Errors
    ///
    /// Returns error if the control is missing
    pub async fn input_value(&self, selector: &str) -> ComprarResult<String> {
        self.driver.input_value(selector).await
    }

    /// Whether the element matching `selector` is rendered and visible
    ///
    /// Returns `false` when the element is absent, hidden, or the probe
    /// itself fails. Scenarios that must distinguish "hidden" from "broken
    /// page" ask the driver directly.
    pub async fn is_visible(&self, selector: &str) -> bool {
        self.driver.is_visible(selector).await.unwrap_or(false)
    }

    /// All elements matching `selector`, in document order
    ///
    /// # Errors
    ///
    /// Returns error if the query cannot run
    pub async fn query_all(&self, selector: &str) -> ComprarResult<Vec<Box<dyn ElementHandle>>> {
        self.driver.query_all(selector).await
    }

    /// URL of the page the driver is currently on
    ///
    /// # Errors
    ///
    /// Returns error if the page cannot be asked
    pub async fn current_url(&self) -> ComprarResult<String> {
        self.driver.current_url().await
    }
}
