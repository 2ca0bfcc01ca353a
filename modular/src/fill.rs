//! Structure field injection.
//!
//! A structure opts into [`Container::fill`] by implementing [`Fill`], which
//! is usually derived:
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use modular::{Container, Fill};
//!
//! trait Database {
//!     fn connect(&self) -> bool;
//! }
//!
//! struct MySql;
//!
//! impl Database for MySql {
//!     fn connect(&self) -> bool {
//!         true
//!     }
//! }
//!
//! #[derive(Default, Fill)]
//! struct App {
//!     #[inject(type)]
//!     db: Option<Rc<dyn Database>>,
//!     #[inject(name)]
//!     replica: Option<Rc<dyn Database>>,
//!     port: u16,
//! }
//!
//! # fn main() -> Result<(), modular::Error> {
//! let mut container = Container::new();
//! container.singleton(|| -> Rc<dyn Database> { Rc::new(MySql) })?;
//! container.named_singleton("replica", || -> Rc<dyn Database> { Rc::new(MySql) })?;
//!
//! let mut app = App::default();
//! container.fill(&mut app)?;
//! assert!(app.db.unwrap().connect());
//! assert!(app.replica.is_some());
//! # Ok(())
//! # }
//! ```

use crate::{Container, Error, Result};

/// A structure whose fields can be populated from a [`Container`].
///
/// Implementations call [`Fields::inject`] (or [`Fields::inject_tagged`]) for
/// every injectable field, in declaration order, and propagate the first
/// error with `?`.
pub trait Fill {
    fn fill(&mut self, fields: &Fields<'_>) -> Result<()>;
}

/// How the binding of an injectable field is selected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldTag {
    /// The default binding of the field type.
    Type,
    /// The binding of the field type named after the field.
    Name,
}

impl FieldTag {
    /// Parses the tag values `type` and `name`.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "type" => Some(Self::Type),
            "name" => Some(Self::Name),
            _ => None,
        }
    }
}

/// Resolves values of injectable fields.
pub struct Fields<'a> {
    container: &'a Container,
}

impl<'a> Fields<'a> {
    pub(crate) fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Resolves the value of `field` selected by the textual `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFieldTag`] for a tag other than `type` or
    /// `name`, and [`Error::CannotPopulateField`] if the value cannot be
    /// resolved.
    pub fn inject<T>(&self, field: &str, tag: &str) -> Result<T>
    where
        T: Clone + 'static,
    {
        let tag = FieldTag::parse(tag).ok_or_else(|| Error::InvalidFieldTag(field.to_owned()))?;
        self.inject_tagged(field, tag)
    }

    /// Resolves the value of `field` selected by `tag`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CannotPopulateField`] if there is no matching binding
    /// or its resolver fails.
    pub fn inject_tagged<T>(&self, field: &str, tag: FieldTag) -> Result<T>
    where
        T: Clone + 'static,
    {
        let name = match tag {
            FieldTag::Type => "",
            FieldTag::Name => field,
        };
        self.container.named_resolve(name).map_err(|err| {
            tracing::debug!(field, ?tag, error = %err, "cannot populate field");
            Error::CannotPopulateField(field.to_owned())
        })
    }
}
