pub mod connection;
pub mod dto;
pub mod pricing;
pub mod repository;
pub mod stats;
