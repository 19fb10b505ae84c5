use tinyapp_core::UserId;
use tower_cookies::{Cookie, Cookies, Key};

/// Name of the cookie carrying the session's user id.
pub const SESSION_COOKIE: &str = "user_id";

/// Reads and writes the user id bound to a client session.
///
/// An absent, tampered or malformed cookie reads as no session. Whether the
/// id still names an existing account is checked by the services, not here.
pub trait SessionAccessor: Send + Sync + 'static {
    fn current(&self, cookies: &Cookies) -> Option<UserId>;

    fn start(&self, cookies: &Cookies, user: &UserId);

    fn end(&self, cookies: &Cookies);
}

fn session_cookie(user: &UserId) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, user.to_string());
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookie
}

fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::from(SESSION_COOKIE);
    cookie.set_path("/");
    cookie
}

/// Stores the user id in a cookie signed with a server-side key, so a
/// client cannot claim an id it was never issued.
#[derive(Clone)]
pub struct SignedCookieSession {
    key: Key,
}

impl std::fmt::Debug for SignedCookieSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedCookieSession").finish_non_exhaustive()
    }
}

impl SignedCookieSession {
    pub fn new(key: Key) -> Self {
        Self { key }
    }

    /// Uses a fresh random key. Sessions do not survive a restart.
    pub fn ephemeral() -> Self {
        Self::new(Key::generate())
    }
}

impl SessionAccessor for SignedCookieSession {
    fn current(&self, cookies: &Cookies) -> Option<UserId> {
        let cookie = cookies.signed(&self.key).get(SESSION_COOKIE)?;
        UserId::new(cookie.value()).ok()
    }

    fn start(&self, cookies: &Cookies, user: &UserId) {
        cookies.signed(&self.key).add(session_cookie(user));
    }

    fn end(&self, cookies: &Cookies) {
        cookies.signed(&self.key).remove(removal_cookie());
    }
}

/// Stores the user id in a plain cookie. Anyone who knows an id can
/// impersonate its account; meant for local development only.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCookieSession;

impl SessionAccessor for PlainCookieSession {
    fn current(&self, cookies: &Cookies) -> Option<UserId> {
        let cookie = cookies.get(SESSION_COOKIE)?;
        UserId::new(cookie.value()).ok()
    }

    fn start(&self, cookies: &Cookies, user: &UserId) {
        cookies.add(session_cookie(user));
    }

    fn end(&self, cookies: &Cookies) {
        cookies.remove(removal_cookie());
    }
}
