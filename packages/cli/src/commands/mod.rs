pub mod move_nodes;
pub mod names;
pub mod set_name;

pub use move_nodes::{move_nodes, MoveArgs};
pub use names::{names, NamesArgs};
pub use set_name::{set_name, SetNameArgs};
