pub mod catalog;
pub mod environment;
pub mod graph;
pub mod range;
pub mod service;
pub mod solver;
pub mod telemetry;
pub mod validator;

pub use crate::domain::model::{FoodChain, Location, Species, Verdict};
pub use crate::domain::ports::{ConfigProvider, Storage, TelemetrySink};
pub use crate::utils::error::Result;
