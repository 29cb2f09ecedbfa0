mod dispatcher;
mod templates;

pub use dispatcher::{DispatchError, Dispatcher};
pub use templates::{Branding, RenderError, acknowledgment, admin_notification};
