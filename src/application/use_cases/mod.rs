/// Use cases module containing application business logic orchestration
mod sync_certificates;

pub use sync_certificates::SyncCertificatesUseCase;
