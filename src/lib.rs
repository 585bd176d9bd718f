// Library for tests to access modules

pub mod aggregator;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod feed;
pub mod health;
pub mod models;
pub mod routes;
pub mod window;
pub mod worker;
