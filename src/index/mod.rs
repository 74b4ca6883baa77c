mod key;

pub use key::{HexKey, KEY_VERSION};
