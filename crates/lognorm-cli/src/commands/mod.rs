//! Command implementations.
//!
//! Each command returns its rendered output; `main` prints it.

pub mod extract;
pub mod prompt;
pub mod route;
pub mod schema;
pub mod score;

pub use self::extract::execute_extract;
pub use self::prompt::execute_prompt;
pub use self::route::execute_route;
pub use self::schema::execute_schema;
pub use self::score::execute_score;
