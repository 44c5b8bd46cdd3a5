mod catalog_file;

pub use catalog_file::{
    Format, Issue, LoadError, ParseError, builtin_catalog, builtin_catalog_source, load_catalog,
    parse_catalog,
};
