pub mod consts;
pub mod http;
pub mod model;
pub mod options;
pub mod router;
pub mod service;
