//! In-memory repositories for integration tests.

pub mod mock_contact_repository;
pub mod mock_tag_repository;

#[allow(unused_imports)]
pub use mock_contact_repository::MockContactRepository;
#[allow(unused_imports)]
pub use mock_tag_repository::MockTagRepository;
