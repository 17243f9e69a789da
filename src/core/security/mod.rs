// Security module for path confinement
//
// Every file name that arrives over HTTP is resolved through a PathGuard
// before any filesystem access, so no request can reach outside the data
// directory.

pub mod path_validator;

pub use path_validator::{PathGuard, PathSecurityError};
