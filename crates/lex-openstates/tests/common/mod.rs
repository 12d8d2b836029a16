//! Common test utilities for integration tests.
//!
//! - [`http_mock::MockHttpServer`] - Declarative stubs for the OpenStates endpoints

pub mod http_mock;
