//! End-to-end tests running the keyval binary against a simulated build.

mod check_tests;
mod common;
mod in_tests;
mod out_tests;
mod pipeline_tests;
