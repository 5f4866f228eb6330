pub mod client;
pub mod connect_four;
pub mod messages;
pub mod session;
pub mod util;
