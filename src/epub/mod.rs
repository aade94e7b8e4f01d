mod nav;
mod unpack;

pub use nav::{find_nav_document, parse_nav_document};
pub use unpack::{Workdir, unpack};
