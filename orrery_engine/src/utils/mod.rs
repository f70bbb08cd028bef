/// Generic containers used by the scene and resource layers

pub mod node_pool;
pub mod growable_list;

pub use node_pool::NodePool;
pub use growable_list::GrowableList;
