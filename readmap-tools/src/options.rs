//! Flattening option sets into command-line arguments

use readmap_core::OptionSet;

/// Compile options into bwa-style arguments, in insertion order
///
/// Every key becomes `-key`. Values whose text is `true` or `false` (in any
/// case) are flags and contribute nothing more; anything else is emitted as
/// the following argument.
pub fn compile_options(options: &OptionSet) -> Vec<String> {
    let mut args = Vec::with_capacity(options.len() * 2);

    for (key, value) in options.iter() {
        args.push(format!("-{}", key));

        let text = value.to_string();
        let lowered = text.to_lowercase();
        if lowered != "true" && lowered != "false" {
            args.push(text);
        }
    }

    args
}
