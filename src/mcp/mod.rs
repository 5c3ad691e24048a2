pub mod dispatcher;
pub mod response;
pub mod server;
pub mod tools;
