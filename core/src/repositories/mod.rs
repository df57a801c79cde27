//! Repository and store interfaces for the domain layer.

pub mod session;
pub mod user;

pub use session::SessionStore;
pub use user::UserRepository;

pub use session::MockSessionStore;
pub use user::MockUserRepository;
