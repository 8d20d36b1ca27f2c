//! Domain entities - the shapes this client reads from and writes to the
//! hosted backend. The backend owns persistence; these types only mirror it.

mod account;
mod file;
mod post;
mod user;

pub use account::{Account, Session};
pub use file::{FileUpload, StoredFile};
pub use post::{Post, SavedPost};
pub use user::User;
