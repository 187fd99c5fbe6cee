//! Simulated sign-in and sign-out
//!
//! No credentials are checked. Signing in shows an "authenticating" banner,
//! then a welcome message, then sends the user to their role's landing page.
//! Signing out only asks for confirmation before following the logout link.

use clearance_domain::{Credentials, Role};

use crate::application::error::SessionError;
use crate::ports::outbound::{Navigator, PageSurface, SleepProvider};

/// Delays of the sign-in animation, both measured from submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginTiming {
    /// When the welcome message replaces the authenticating banner
    pub greeting_ms: u64,
    /// When the browser leaves for the landing page
    pub redirect_ms: u64,
}

impl Default for LoginTiming {
    fn default() -> Self {
        Self {
            greeting_ms: 2_000,
            redirect_ms: 4_000,
        }
    }
}

/// Drives the simulated sign-in on a login page
pub struct LoginService<P: PageSurface, Sl: SleepProvider, N: Navigator> {
    role: Option<Role>,
    page: P,
    sleep: Sl,
    navigator: N,
    timing: LoginTiming,
}

impl<P: PageSurface, Sl: SleepProvider, N: Navigator> LoginService<P, Sl, N> {
    pub fn new(role: Option<Role>, page: P, sleep: Sl, navigator: N, timing: LoginTiming) -> Self {
        Self {
            role,
            page,
            sleep,
            navigator,
            timing,
        }
    }

    /// Validate the form and play the sign-in sequence.
    ///
    /// Returns the landing page navigated to.
    ///
    /// # Errors
    ///
    /// - `SessionError::RoleUnknown` if the page name carries no role
    /// - `SessionError::InvalidCredentials` if either field is blank
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<&'static str, SessionError> {
        let role = self.role.ok_or(SessionError::RoleUnknown)?;
        let credentials = Credentials::new(email, password)?;
        let name = credentials.display_name();

        tracing::info!(%role, user = name, "Signing in");
        self.page
            .show_auth_status(&format!("Authenticating {name}…"), true);

        self.sleep.sleep_ms(self.timing.greeting_ms).await;
        self.page
            .show_auth_status(&format!("Access granted. Welcome, {name}!"), false);

        let remaining = self.timing.redirect_ms.saturating_sub(self.timing.greeting_ms);
        self.sleep.sleep_ms(remaining).await;

        let landing = role.landing_page();
        self.navigator.navigate(landing);
        Ok(landing)
    }
}

/// Confirms sign-out before leaving the page
pub struct LogoutService<N: Navigator> {
    navigator: N,
}

impl<N: Navigator> LogoutService<N> {
    pub fn new(navigator: N) -> Self {
        Self { navigator }
    }

    /// Follow the logout link once the user has confirmed
    pub fn confirm(&self, logout_href: &str) {
        tracing::info!(href = logout_href, "Signing out");
        self.navigator.navigate(logout_href);
    }
}
