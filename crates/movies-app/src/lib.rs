pub mod contract;
pub mod error;
pub mod i18n;
pub mod rest_api;
pub mod service;
pub mod state;
pub mod validate;
