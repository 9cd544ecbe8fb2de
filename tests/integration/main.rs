//! End-to-end tests against an in-process server

mod api_tests;
mod client_tests;
mod common;
mod reconcile_tests;
