mod network_app;
mod operation;

pub use network_app::NetworkApp;
pub use operation::NetworkOperation;
