//! Fixture adapter - questionnaires and answers from YAML documents.

mod yaml_fixture;

pub use yaml_fixture::{load_fixture, Fixture, FixtureError};
