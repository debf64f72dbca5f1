mod auth;
mod session;

pub use auth::AuthSession;
pub use auth::TokenManager;
pub use session::SESSION_COOKIE;
pub use session::Session;
pub use session::SessionStore;
