//! Page object for the Swag Labs login form.

use crate::config::{TestConfig, UserCredentials, UserType};
use crate::driver::ComprarDriver;
use crate::pages::base::BasePage;
use crate::result::ComprarResult;

const USERNAME_INPUT: &str = "[data-test=\"username\"]";
const PASSWORD_INPUT: &str = "[data-test=\"password\"]";
const LOGIN_BUTTON: &str = "[data-test=\"login-button\"]";
const ERROR_MESSAGE: &str = "[data-test=\"error\"]";

/// A successful login lands on the inventory page.
const INVENTORY_URL_FRAGMENT: &str = "inventory.html";

/// Page object for the login form
///
/// ```no_run
/// use comprar::config::TestConfig;
/// use comprar::mock::MockDriver;
/// use comprar::pages::LoginPage;
///
/// # async fn run() -> comprar::ComprarResult<()> {
/// let config = TestConfig::default();
/// let driver = MockDriver::new();
/// let login = LoginPage::new(&driver, &config);
/// login.goto().await?;
/// login.login_as_standard_user().await?;
/// assert!(login.is_login_successful().await?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LoginPage<'d, D: ComprarDriver> {
    base: BasePage<'d, D>,
    base_url: String,
    users: UserCredentials,
}

impl<'d, D: ComprarDriver> LoginPage<'d, D> {
    /// Build the page over a borrowed driver and the suite configuration
    pub fn new(driver: &'d D, config: &TestConfig) -> Self {
        Self {
            base: BasePage::new(driver),
            base_url: config.base_url.clone(),
            users: config.users.clone(),
        }
    }

    /// Open the login form
    ///
    /// # Errors
    ///
    /// Returns error if navigation fails
    pub async fn goto(&self) -> ComprarResult<()> {
        tracing::debug!(url = %self.base_url, "open login form");
        self.base.navigate(&self.base_url).await
    }

    /// Submit the form with the given credentials
    ///
    /// Fills both fields and clicks the login button. Makes no judgement
    /// about the outcome; pair with [`LoginPage::is_login_successful`] or
    /// [`LoginPage::error_message`].
    ///
    /// # Errors
    ///
    /// Returns error if a field or the button cannot be driven
    pub async fn login(&self, username: &str, password: &str) -> ComprarResult<()> {
        // The password never reaches the log.
        tracing::debug!(username, "submit login form");
        self.base.fill(USERNAME_INPUT, username).await?;
        self.base.fill(PASSWORD_INPUT, password).await?;
        self.base.click(LOGIN_BUTTON).await
    }

    /// Submit the form as the standard user
    ///
    /// # Errors
    ///
    /// Returns error if the form cannot be driven
    pub async fn login_as_standard_user(&self) -> ComprarResult<()> {
        self.login_by_user_type(UserType::Standard).await
    }

    /// Submit the form with the configured credential for `user_type`
    ///
    /// # Errors
    ///
    /// Returns error if the form cannot be driven
    pub async fn login_by_user_type(&self, user_type: UserType) -> ComprarResult<()> {
        let credential = self.users.credential_for(user_type);
        self.login(&credential.username, &credential.password).await
    }

    /// Text of the error banner, if one is displayed
    ///
    /// `Ok(None)` means no banner is rendered; that is data, not a failure.
    ///
    /// # Errors
    ///
    /// Returns error if the banner is visible but cannot be read
    pub async fn error_message(&self) -> ComprarResult<Option<String>> {
        if !self.base.is_visible(ERROR_MESSAGE).await {
            return Ok(None);
        }
        let text = self.base.text(ERROR_MESSAGE).await?;
        Ok(Some(text.trim().to_string()))
    }

    /// Whether the error banner is currently displayed
    pub async fn is_error_displayed(&self) -> bool {
        self.base.is_visible(ERROR_MESSAGE).await
    }

    /// Whether the last submit landed on the inventory page
    ///
    /// # Errors
    ///
    /// Returns error if the current URL cannot be read
    pub async fn is_login_successful(&self) -> ComprarResult<bool> {
        let url = self.base.current_url().await?;
        Ok(url.contains(INVENTORY_URL_FRAGMENT))
    }
}
