use crate::output_type::OutputType;
use crate::parser::ParseOpts;

/// Options that control how a batch conversion is performed.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// The CLI is responsible for mapping user input into this type so that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (APIs, tests, batch jobs) can construct options programmatically
#[derive(Debug, Clone, Default)]
pub struct Opts {
    /// Parser tolerance policy.
    ///
    /// The defaults accept the dot millisecond separator and missing index
    /// lines; see `ParseOpts::strict` for strict SRT conformance.
    pub parse: ParseOpts,

    /// The desired output format for converted segments.
    pub output_type: OutputType,
}
