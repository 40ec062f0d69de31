pub mod memory;
pub mod sample;
pub mod traits;

pub use memory::InMemoryRepository;
pub use sample::sample_catalog;
pub use traits::PropertyRepository;
