pub mod polish_service;

pub use polish_service::PolishService;
