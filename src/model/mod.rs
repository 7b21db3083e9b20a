pub mod network;
pub mod person;
pub mod seed;

pub use network::{Collaboration, Network, NetworkError, RemovedPerson};
pub use person::{normalize_tags, program_color, Person, PersonId};
