/// Cryptographic adapters for certificate containers
mod pkcs7_decoder;

pub use pkcs7_decoder::Pkcs7CertificateDecoder;
