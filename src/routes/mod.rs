mod forms;
mod health_check;
mod submit;

pub use forms::*;
pub use health_check::*;
pub use submit::*;
