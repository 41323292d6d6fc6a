mod league;
mod player;
mod season;
mod table;

pub use league::*;
pub use player::*;
pub use season::*;
pub use table::*;
