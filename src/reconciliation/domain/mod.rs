pub mod certificate_detail;
pub mod cmdb_payload;
pub mod lifecycle_state;
pub mod page_plan;
pub mod report_record;

pub use certificate_detail::CertificateDetail;
pub use cmdb_payload::{
    CiValues, CmdbUpsertPayload, ConfigurationItem, DnsNameValues, Relationship,
    UniqueCertificate, CERTIFICATE_CLASS, DNS_NAME_CLASS, USES_USED_BY, format_cmdb_time,
    parse_cmdb_time,
};
pub use lifecycle_state::LifecycleState;
pub use page_plan::{PagePlan, PageWindow, DEFAULT_PAGE_SIZE};
pub use report_record::{CertificateRecord, OrderRecord, ReportEnvelope, ReportPage};
