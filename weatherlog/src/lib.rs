pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod model;
pub mod page;
pub mod pagination;
pub mod render;
pub mod rest;
pub mod transform;
pub mod validate;
