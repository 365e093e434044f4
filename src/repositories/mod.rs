mod memory;
mod sqlite;
mod traits;

pub use memory::InMemoryEmailRepository;
pub use sqlite::SqliteEmailRepository;
pub use traits::EmailRepository;
