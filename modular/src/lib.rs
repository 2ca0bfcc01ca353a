//! # modular
//!
//! A runtime dependency resolution container. Abstractions, usually shared
//! pointers to trait objects such as `Rc<dyn Database>`, are bound to resolver
//! closures and later resolved as return values, as closure arguments or as
//! fields of a structure.
//!
//! ## Core Concepts
//!
//! - **Container**: The registry of bindings, keyed by abstraction type and name
//! - **Resolver**: A closure producing an abstraction; its parameters are
//!   resolved from the container
//! - **Lifecycle**: A singleton caches its first value, a transient is built anew
//!   on every resolution
//! - **Timing**: An eager binding invokes its resolver at bind time, a lazy one at
//!   the first resolution
//! - **Named bindings**: Bindings registered under an explicit name, reachable
//!   only through named resolution or field injection
//!
//! ## Basic Usage
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use modular::Container;
//!
//! trait Database {
//!     fn url(&self) -> String;
//! }
//!
//! struct Postgres;
//!
//! impl Database for Postgres {
//!     fn url(&self) -> String {
//!         "postgresql://localhost:5432/mydb".to_string()
//!     }
//! }
//!
//! trait Repository {
//!     fn describe(&self) -> String;
//! }
//!
//! struct UserRepository {
//!     db: Rc<dyn Database>,
//! }
//!
//! impl Repository for UserRepository {
//!     fn describe(&self) -> String {
//!         format!("users at {}", self.db.url())
//!     }
//! }
//!
//! # fn main() -> Result<(), modular::Error> {
//! let mut container = Container::new();
//! container.singleton(|| -> Rc<dyn Database> { Rc::new(Postgres) })?;
//! container.transient_lazy(|db: Rc<dyn Database>| -> Rc<dyn Repository> {
//!     Rc::new(UserRepository { db })
//! })?;
//!
//! let repository = container.resolve::<Rc<dyn Repository>>()?;
//! assert_eq!(repository.describe(), "users at postgresql://localhost:5432/mydb");
//! # Ok(())
//! # }
//! ```
//!
//! ## Fallible Resolvers
//!
//! Resolvers may return `Result<P<T>, E>`. A lazy singleton whose resolver
//! fails stays unresolved and is retried by the next resolution:
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use modular::Container;
//!
//! let attempts = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&attempts);
//!
//! let mut container = Container::new();
//! container
//!     .singleton_lazy(move || {
//!         counter.set(counter.get() + 1);
//!         if counter.get() == 1 {
//!             return Err("connection refused");
//!         }
//!         Ok(Rc::new(counter.get()))
//!     })
//!     .unwrap();
//!
//! assert!(container.resolve::<Rc<i32>>().is_err());
//! assert_eq!(*container.resolve::<Rc<i32>>().unwrap(), 2);
//! assert_eq!(attempts.get(), 2);
//! ```
//!
//! ## Features
//!
//! - `macros` (default): Enables `#[derive(Fill)]` for structure field injection

mod binding;
mod config;
mod container;
mod error;
mod fill;
mod must;
mod resolver;

pub use binding::{Lifecycle, Timing};
pub use config::*;
pub use container::*;
pub use error::*;
pub use fill::*;
pub use must::*;
pub use resolver::*;

#[cfg(feature = "macros")]
pub use modular_macros::*;
