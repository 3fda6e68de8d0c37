//! Abstract driver trait for storefront automation.
//!
//! Page objects talk to the browser exclusively through [`ComprarDriver`];
//! nothing above this seam touches a CDP type.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  ComprarDriver (abstract trait)                            │
//! ├────────────────────────────────────────────────────────────┤
//! │  ┌──────────────────────┐   ┌───────────────────────────┐  │
//! │  │  ChromiumDriver      │   │  MockDriver               │  │
//! │  │  (`browser` feature) │   │  (always available)       │  │
//! │  │  CDP via             │   │  in-memory storefront     │  │
//! │  │  chromiumoxide       │   │  model for scenario tests │  │
//! │  └──────────────────────┘   └───────────────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation blocks until the driver confirms completion or its
//! timeout aborts it. No retry logic exists at this layer or above it;
//! flake policy belongs to the test runner.

use crate::result::ComprarResult;
use async_trait::async_trait;

/// Handle to a matched DOM element
///
/// Handles come from [`ComprarDriver::query_all`] in document order.
#[async_trait]
pub trait ElementHandle: Send + Sync {
    /// Text content of the element
    async fn text(&self) -> ComprarResult<String>;

    /// First descendant matching a selector; fails if none match
    async fn query_one(&self, selector: &str) -> ComprarResult<Box<dyn ElementHandle>>;
}

/// Abstract driver trait for browser automation
///
/// # Implementations
///
/// - `ChromiumDriver` - default, CDP via the chromiumoxide crate
/// - `MockDriver` - in-memory storefront model for scenario tests
#[async_trait]
pub trait ComprarDriver: Send + Sync {
    /// Navigate to a URL
    async fn navigate(&self, url: &str) -> ComprarResult<()>;

    /// Click the first element matching a selector
    async fn click(&self, selector: &str) -> ComprarResult<()>;

    /// Clear a form control and type text into it
    async fn fill(&self, selector: &str, text: &str) -> ComprarResult<()>;

    /// Pick a `<select>` option by value and fire its change event
    async fn select_option(&self, selector: &str, value: &str) -> ComprarResult<()>;

    /// Text content of the first match; fails if none match
    async fn text(&self, selector: &str) -> ComprarResult<String>;

    /// `value` property of the first matching form control; fails if none match
    async fn input_value(&self, selector: &str) -> ComprarResult<String>;

    /// Whether the first match is rendered visible
    ///
    /// An absent element is `Ok(false)`; only infrastructure failure
    /// (page gone, evaluation refused) is an error.
    async fn is_visible(&self, selector: &str) -> ComprarResult<bool>;

    /// Every match for a selector, in document order
    async fn query_all(&self, selector: &str) -> ComprarResult<Vec<Box<dyn ElementHandle>>>;

    /// URL of the current page view
    async fn current_url(&self) -> ComprarResult<String>;
}
