mod mock_email_repository;
mod mock_transport;

#[allow(unused_imports)]
pub use mock_email_repository::MockEmailRepository;
#[allow(unused_imports)]
pub use mock_transport::MockTransport;
