pub mod median;
pub mod probit;
pub mod rates;

pub use median::median;
pub use probit::probit;
pub use rates::{Capacity, Counts, RateError, RateTerm, SignalDetection, pashler_k, signal_detection};
