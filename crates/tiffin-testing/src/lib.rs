//! Fixture components and views for testing Tiffin

pub mod fixtures;

pub use fixtures::*;

pub mod prelude {
    pub use crate::fixtures::*;
}
