//! Test Module
//!
//! Cross-module suites for the sentiment service.
//!
//! ## Test Categories
//! - `normalizer_tests`: idempotence and output properties of normalization
//! - `service_tests`: both prediction paths against fake resources, fault injection
//! - `web_tests`: HTTP adapters driven through the router

pub mod service_tests;
