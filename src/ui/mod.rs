pub mod formatters;

pub use formatters::{print_footer, print_header, print_network_table, print_section};
