/// Unordered token pair
pub mod pair;
/// Pool reserves snapshot
pub mod reserves;
/// Token addresses
pub mod token;

pub use pair::Pair;
pub use reserves::Reserves;
pub use token::TokenAddress;
