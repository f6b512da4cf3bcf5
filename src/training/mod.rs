pub mod accumulator;
pub mod callback;
pub mod data_loader;
pub mod validator;

pub use self::accumulator::Accumulator;
pub use self::callback::{Callback, CallbackGroup, PeriodicCallback};
pub use self::data_loader::{Batch, Dataset, InMemoryDataset};
pub use self::validator::{ValidationReport, Validator, ValidatorState};
