pub mod index;
pub mod links;

pub use index::{index_path, write_index};
pub use links::{link_name, LinkFarm};
