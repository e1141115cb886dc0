pub mod add;
pub mod echo;

pub use add::AddTool;
pub use echo::EchoTool;
