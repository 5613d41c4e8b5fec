//! Common test utilities and mock implementations


pub use mock_interface::Operation;
pub use test_utils::{create_initialized_driver, create_mock_driver, MockDelay};
