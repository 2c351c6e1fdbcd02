//! The builder contract shared by every request payload.
//!
//! A builder is the only mutable object in a request's life. Setters check
//! their arguments immediately and return `Err` without touching the builder
//! when a check fails. [`Build::build`] walks nested parts bottom-up and
//! returns an independent snapshot, so mutating the builder afterwards never
//! affects a value it already produced.
//!
//! Containers may hold a nested builder instead of a finished value. Wrap it
//! with [`shared`] and keep a clone of the handle: the container calls the
//! nested `build()` only when its own `build()` runs.

mod error;

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};

pub use error::{Result, ValidationError};

/// Produces an immutable value from mutable builder state.
pub trait Build {
    type Output;

    fn build(&self) -> Result<Self::Output>;
}

/// A builder that stays mutable after being handed to a container.
pub type Shared<B> = Rc<RefCell<B>>;

/// Wraps a builder for deferred composition.
pub fn shared<B>(builder: B) -> Shared<B> {
    Rc::new(RefCell::new(builder))
}

impl<B: Build> Build for Rc<RefCell<B>> {
    type Output = B::Output;

    /// Fails with [`ValidationError::BuilderInUse`] while a `borrow_mut`
    /// guard on the builder is alive.
    fn build(&self) -> Result<Self::Output> {
        self.try_borrow()
            .map_err(|_| ValidationError::BuilderInUse)?
            .build()
    }
}

/// A finished value, built by cloning.
#[derive(Debug, Clone, PartialEq)]
pub struct Ready<T>(pub T);

impl<T: Clone> Build for Ready<T> {
    type Output = T;

    fn build(&self) -> Result<T> {
        Ok(self.0.clone())
    }
}

/// A value or a builder that will produce one.
pub(crate) type Part<T> = Box<dyn Build<Output = T>>;

pub(crate) fn require_not_blank(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(())
}

pub(crate) fn require_positive(field: &'static str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(())
}

pub(crate) fn require_ordered(start: &DateTime<Utc>, end: &DateTime<Utc>) -> Result<()> {
    if start > end {
        return Err(ValidationError::InvalidPeriod {
            start: start.to_rfc3339(),
            end: end.to_rfc3339(),
        });
    }
    Ok(())
}

pub(crate) fn require<T>(field: &'static str, value: Option<T>) -> Result<T> {
    value.ok_or(ValidationError::Missing { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct NameBuilder {
        name: Option<String>,
    }

    impl NameBuilder {
        fn name(&mut self, name: &str) -> Result<&mut Self> {
            require_not_blank("name", name)?;
            self.name = Some(name.to_string());
            Ok(self)
        }
    }

    impl Build for NameBuilder {
        type Output = String;

        fn build(&self) -> Result<String> {
            require("name", self.name.clone())
        }
    }

    #[test]
    fn test_shared_builder_sees_later_mutation() {
        let builder = shared(NameBuilder::default());
        let part: Part<String> = Box::new(builder.clone());

        assert_eq!(part.build(), Err(ValidationError::Missing { field: "name" }));

        builder.borrow_mut().name("later").unwrap();
        assert_eq!(part.build().unwrap(), "later");
    }

    #[test]
    fn test_shared_builder_borrowed_for_mutation_fails_to_build() {
        let builder = shared(NameBuilder::default());
        let part: Part<String> = Box::new(builder.clone());

        let mut guard = builder.borrow_mut();
        guard.name("held").unwrap();
        assert_eq!(part.build(), Err(ValidationError::BuilderInUse));

        drop(guard);
        assert_eq!(part.build().unwrap(), "held");
    }

    #[test]
    fn test_ready_clones_value() {
        let ready = Ready(vec![1, 2, 3]);
        assert_eq!(ready.build().unwrap(), vec![1, 2, 3]);
        assert_eq!(ready.build().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_failed_setter_keeps_state() {
        let mut builder = NameBuilder::default();
        builder.name("first").unwrap();
        assert_eq!(
            builder.name("   ").unwrap_err(),
            ValidationError::Blank { field: "name" }
        );
        assert_eq!(builder.build().unwrap(), "first");
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("minutes", 1).is_ok());
        assert_eq!(
            require_positive("minutes", 0),
            Err(ValidationError::NotPositive { field: "minutes" })
        );
    }

    #[test]
    fn test_require_ordered_allows_equal_bounds() {
        let now = Utc::now();
        assert!(require_ordered(&now, &now).is_ok());
        assert!(require_ordered(&now, &(now - chrono::Duration::minutes(1))).is_err());
    }
}
