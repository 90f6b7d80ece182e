pub mod bivariate;
pub mod metric;
pub mod normalize;
pub mod stoch;

pub use bivariate::*;
pub use metric::*;
pub use normalize::*;
pub use stoch::*;
