//! 请求和响应的数据传输对象

pub mod request;
pub mod response;

pub use request::{CreateItemRequest, ItemSearchParams, UpdateItemRequest};
pub use response::{ApiResponse, ItemDto};
