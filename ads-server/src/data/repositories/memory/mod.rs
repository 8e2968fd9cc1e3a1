mod repository;
mod store;

pub(crate) use repository::InMemoryRepository;
