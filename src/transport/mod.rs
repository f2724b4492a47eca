//! 传输层：面向 Provider 的单次 HTTP 请求执行与状态码/错误体归一化。

pub mod http;

pub use http::{provider_diagnostic, HttpTransport, TransportResponse};
