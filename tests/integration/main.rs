#[path = "../common/mod.rs"]
mod common;

mod physics_tests;
