/// Network adapters for the certificate vendor and the CMDB
mod http;
mod sectigo_client;
mod servicenow_client;

pub use sectigo_client::SectigoClient;
pub use servicenow_client::ServiceNowClient;
