//! Customer login credentials.

use std::fmt;

/// Credentials for a Dynect customer account.
///
/// Dynect scopes accounts by customer: a login names the customer, a user
/// within that customer, and the user's password.
///
/// # Security
///
/// The password is never exposed in Debug output to prevent accidental
/// logging.
///
/// # Example
///
/// ```
/// use dynect_core::Credentials;
///
/// let creds = Credentials::new("acme", "ops", "hunter2");
/// assert_eq!(creds.customer_name(), "acme");
/// ```
pub struct Credentials {
    customer_name: String,
    user_name: String,
    password: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(
        customer_name: impl Into<String>,
        user_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            user_name: user_name.into(),
            password: password.into(),
        }
    }

    /// Returns the customer name.
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Returns the user name.
    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    /// Returns the password.
    ///
    /// # Security
    ///
    /// Use this only when constructing login requests.  Never log or
    /// display this value.
    pub fn password(&self) -> &str {
        &self.password
    }
}

// Intentionally hide the password in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("customer_name", &self.customer_name)
            .field("user_name", &self.user_name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

// Clone is intentionally implemented to allow credentials to be reused,
// but the type is not Copy to make credential passing explicit.
impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            customer_name: self.customer_name.clone(),
            user_name: self.user_name.clone(),
            password: self.password.clone(),
        }
    }
}
