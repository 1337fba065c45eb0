//! Built-in handler names and conventional locations.

use phf::phf_map;

/// Namespace bare handler names are resolved in.
pub const HANDLER_NAMESPACE: &str = "harbor::handler";

/// Prefix under which handler units live.
pub const LOAD_ROOT: &str = "harbor/handler";

/// Names every standard registry starts with.
///
/// Only `cgi` is backed by a type in this crate; the others resolve once a
/// crate defining the matching type is linked in.
pub static DEFAULT_HANDLERS: phf::Map<&'static str, &'static str> = phf_map! {
    "cgi" => "harbor::handler::Cgi",
    "fastcgi" => "harbor::handler::FastCgi",
    "mongrel" => "harbor::handler::Mongrel",
    "emongrel" => "harbor::handler::EventedMongrel",
    "smongrel" => "harbor::handler::SwiftipliedMongrel",
    "webrick" => "harbor::handler::Webrick",
    "lsws" => "harbor::handler::Lsws",
    "scgi" => "harbor::handler::Scgi",
    "thin" => "harbor::handler::Thin",
};

/// The built-in identifier for `name`, if it is a default handler name.
pub fn default_identifier(name: &str) -> Option<&'static str> {
    DEFAULT_HANDLERS.get(name).copied()
}
