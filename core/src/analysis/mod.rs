pub use observation::*;
pub use recall::*;

mod observation;
mod recall;
